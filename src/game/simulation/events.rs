/// Commands flowing into the simulation.
///
/// Input and spawners only ever write these; the simulation applies them at
/// the start of the next tick in `SimSet::Input`.

use bevy::prelude::*;
use crate::game::math::FixedVec2;
use crate::game::patron::PatronTemplate;

/// Retarget every patron to a world-space point
#[derive(Message, Debug, Clone, Copy)]
pub struct SetTargetCommand {
    pub target: FixedVec2,
}

/// Instantiate one patron from a template
#[derive(Message, Debug, Clone)]
pub struct SpawnPatronCommand {
    /// Spawner that produced this command
    pub spawner: Entity,
    /// Scene node the patron is attached under, if any
    pub parent: Option<Entity>,
    pub position: FixedVec2,
    pub template: PatronTemplate,
}
