//! Periodic patron spawning.
//!
//! A [`Spawner`] is a fixed marker in the scene with a repeating timer and a
//! [`PatronTemplate`]. Each time the timer fires it queues a
//! [`SpawnPatronCommand`] for a patron at the marker's position, parented
//! under the marker's own parent.

use bevy::prelude::*;
use thiserror::Error;
use crate::game::patron::PatronTemplate;
use crate::game::simulation::{SimConfig, SimPosition, SimSet, SpawnPatronCommand};
use crate::game::simulation::systems::process_input;

#[derive(Debug, Error, PartialEq)]
pub enum SpawnError {
    #[error("spawner has no patron template")]
    MissingTemplate,
    #[error("spawn interval must be positive, got {0}s")]
    NonPositiveInterval(f32),
}

#[derive(Component, Debug, Clone)]
pub struct Spawner {
    pub timer: Timer,
    pub template: Option<PatronTemplate>,
}

impl Spawner {
    pub fn new(interval_secs: f32, template: Option<PatronTemplate>) -> Result<Self, SpawnError> {
        if interval_secs.is_nan() || interval_secs <= 0.0 {
            return Err(SpawnError::NonPositiveInterval(interval_secs));
        }
        Ok(Self {
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
            template,
        })
    }

    /// The template to build a patron from.
    pub fn instantiate(&self) -> Result<PatronTemplate, SpawnError> {
        self.template.ok_or(SpawnError::MissingTemplate)
    }
}

pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate,
            tick_spawners
                .in_set(SimSet::Input)
                .before(process_input));
    }
}

/// Advance spawner timers by one tick and queue a spawn per firing.
pub fn tick_spawners(
    mut spawners: Query<(Entity, &mut Spawner, &SimPosition, Option<&ChildOf>)>,
    mut spawn_events: MessageWriter<SpawnPatronCommand>,
    sim_config: Res<SimConfig>,
) {
    let period = sim_config.tick_period();

    for (entity, mut spawner, pos, child_of) in spawners.iter_mut() {
        spawner.timer.tick(period);
        let firings = spawner.timer.times_finished_this_tick();
        if firings == 0 {
            continue;
        }

        let template = match spawner.instantiate() {
            Ok(template) => template,
            Err(e) => {
                error!("Spawner {:?} cannot spawn: {}", entity, e);
                continue;
            }
        };

        for _ in 0..firings {
            spawn_events.write(SpawnPatronCommand {
                spawner: entity,
                parent: child_of.map(|c| c.parent()),
                position: pos.0,
                template,
            });
        }
    }
}
