/// Component definitions for the simulation layer.

use bevy::prelude::*;
use crate::game::math::FixedVec2;

/// Logical world position of an entity.
/// Authoritative for gameplay; `Transform` is only a view of it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SimPosition(pub FixedVec2);

/// Position at the start of the current tick, for render interpolation.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SimPositionPrev(pub FixedVec2);

/// Displacement requested for (and, after integration, achieved during) one tick.
///
/// This is already scaled by the tick duration; the body mover adds it to
/// the position as-is.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SimVelocity(pub FixedVec2);
