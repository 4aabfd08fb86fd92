/// Core simulation systems.
///
/// This module contains systems for:
/// - Config conversion at startup
/// - Input processing (spawn and retarget commands)
/// - Simulation timing/performance tracking

use bevy::prelude::*;
use crate::game::config::InitialConfig;
use crate::game::control::PointerWorldPosition;
use crate::game::math::FixedVec2;
use crate::game::navigation::NavigationAgent;
use crate::game::patron::Patron;

use super::resources::*;
use super::events::*;

// ============================================================================
// Startup
// ============================================================================

/// Convert the float [`InitialConfig`] into the fixed-point [`SimConfig`]
/// and lock the fixed timestep to the configured tick rate.
pub fn init_sim_config_from_initial(
    mut commands: Commands,
    initial: Option<Res<InitialConfig>>,
) {
    let Some(initial) = initial else {
        warn!("No InitialConfig present, keeping default SimConfig");
        return;
    };

    let sim_config = SimConfig::from_initial(&initial);
    info!(
        "SimConfig: {} Hz, map {}x{}, stall recovery {}",
        sim_config.tick_rate, sim_config.map_width, sim_config.map_height, sim_config.stall_recovery
    );
    commands.insert_resource(Time::<Fixed>::from_hz(initial.tick_rate));
    commands.insert_resource(sim_config);
}

// ============================================================================
// Tick Management
// ============================================================================

pub fn increment_sim_tick(mut tick: ResMut<SimTick>) {
    tick.increment();
}

pub fn sim_start(mut perf: ResMut<SimPerformance>) {
    perf.start_time = Some(std::time::Instant::now());
}

pub fn sim_end(
    mut perf: ResMut<SimPerformance>,
    #[allow(unused_variables)] tick: Res<SimTick>,
) {
    if let Some(start) = perf.start_time.take() {
        perf.last_duration = start.elapsed();
    }
    crate::profile_log!(tick, "[SIM] tick {} took {:?}", tick.0, perf.last_duration);
}

// ============================================================================
// Input Processing
// ============================================================================

/// Apply queued spawn and retarget commands.
///
/// Spawns are handled first so a patron created this tick can pick up a
/// click from the same tick as its first target. Of several clicks in one
/// tick only the last one counts.
pub fn process_input(
    mut commands: Commands,
    mut target_events: MessageReader<SetTargetCommand>,
    mut spawn_events: MessageReader<SpawnPatronCommand>,
    mut agents: Query<&mut NavigationAgent, With<Patron>>,
    pointer: Option<Res<PointerWorldPosition>>,
    sim_config: Res<SimConfig>,
) {
    let clicked = target_events.read().last().map(|event| event.target);

    let spawn_target = clicked.or_else(|| {
        if !sim_config.target_pointer_on_spawn {
            return None;
        }
        pointer.as_ref().and_then(|p| p.0).map(FixedVec2::from_vec2)
    });

    for event in spawn_events.read() {
        let mut agent = event.template.agent();
        if let Some(target) = spawn_target {
            agent.set_target(target);
        }

        let mut patron = commands.spawn(event.template.instantiate(event.position, agent));
        if let Some(parent) = event.parent {
            patron.insert(ChildOf(parent));
        }
        info!("Spawned patron {:?} from spawner {:?} at {:?}", patron.id(), event.spawner, event.position.to_vec2());
    }

    if let Some(target) = clicked {
        let mut retargeted = 0;
        for mut agent in agents.iter_mut() {
            agent.set_target(target);
            retargeted += 1;
        }
        debug!("Retargeted {} patrons to {:?}", retargeted, target.to_vec2());
    }
}
