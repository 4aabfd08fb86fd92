/// Simulation layer - deterministic game logic.
///
/// This module is organized into:
/// - **components**: Simulation components (position, velocity)
/// - **resources**: Simulation resources (config, tick counter, debug flags)
/// - **events**: Commands flowing from input and spawners into the simulation
/// - **physics**: Body movement ("move and slide") and state caching
/// - **systems**: Input processing, tick bookkeeping, config conversion

use bevy::prelude::*;
use crate::game::GameState;

pub mod components;
pub mod resources;
pub mod events;
pub mod physics;
pub mod systems;

pub use components::*;
pub use resources::*;
pub use events::*;

// System sets for organizing execution order
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SimSet {
    Input,      // Spawning and retargeting
    Steering,   // Agent updates and path following
    Integration // Applying displacement to position
}

/// Main simulation plugin
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Replaced by init_sim_config_from_initial once the config is read
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        app.init_resource::<SimConfig>();
        app.init_resource::<SimPerformance>();
        app.init_resource::<SimTick>();
        app.init_resource::<DebugConfig>();

        app.add_message::<SetTargetCommand>();
        app.add_message::<SpawnPatronCommand>();

        app.configure_sets(FixedUpdate, (
            SimSet::Input,
            SimSet::Steering,
            SimSet::Integration,
        ).chain().run_if(in_state(GameState::InGame)));

        app.add_systems(Startup,
            systems::init_sim_config_from_initial.after(crate::game::config::load_initial_config)
        );

        app.add_systems(FixedUpdate, (
            systems::increment_sim_tick.before(systems::sim_start),
            systems::sim_start.before(SimSet::Input),

            physics::cache_previous_state.in_set(SimSet::Input).before(systems::process_input),
            systems::process_input.in_set(SimSet::Input),

            physics::move_and_slide.in_set(SimSet::Integration),

            systems::sim_end.after(SimSet::Integration),
        ).run_if(in_state(GameState::InGame)));
    }
}
