/// Body movement for the simulation layer.
///
/// Collision response is limited to the map bounds: a body that would leave
/// the map is clamped back onto the edge and keeps sliding along it.

use bevy::prelude::*;
use patron_macros::profile;
use crate::game::math::FixedVec2;
use super::components::*;
use super::resources::*;

// ============================================================================
// State Caching
// ============================================================================

/// Cache previous state for interpolation
pub fn cache_previous_state(
    mut query: Query<(&mut SimPositionPrev, &SimPosition)>,
) {
    for (mut prev, pos) in query.iter_mut() {
        prev.0 = pos.0;
    }
}

// ============================================================================
// Integration
// ============================================================================

/// Move every body by its per-tick displacement, sliding along the map edge.
///
/// The displacement actually achieved is written back into [`SimVelocity`],
/// so a body pushing straight into a wall ends the tick with zero velocity on
/// that axis.
#[profile]
pub fn move_and_slide(
    mut query: Query<(Entity, &mut SimPosition, &mut SimVelocity)>,
    sim_config: Res<SimConfig>,
    #[allow(unused_variables)] tick: Res<SimTick>,
) {
    let half = sim_config.half_extents();

    for (entity, mut pos, mut vel) in query.iter_mut() {
        if vel.0 == FixedVec2::ZERO {
            continue;
        }

        let desired = pos.0 + vel.0;
        let reached = desired.clamp(-half, half);
        if reached != desired {
            trace!("[BOUNDS] {:?} slid along the map edge at {:?}", entity, reached);
        }

        vel.0 = reached - pos.0;
        pos.0 = reached;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::math::FixedNum;

    fn app_with_bounds(width: f32, height: f32) -> App {
        let mut app = App::new();
        app.insert_resource(SimConfig {
            map_width: FixedNum::from_num(width),
            map_height: FixedNum::from_num(height),
            ..Default::default()
        });
        app.init_resource::<SimTick>();
        app.add_systems(Update, move_and_slide);
        app
    }

    #[test]
    fn free_body_moves_by_its_velocity() {
        let mut app = app_with_bounds(100.0, 100.0);
        let body = app.world_mut().spawn((
            SimPosition(FixedVec2::from_f32(0.0, 0.0)),
            SimVelocity(FixedVec2::from_f32(1.5, -2.0)),
        )).id();

        app.update();

        assert_eq!(app.world().get::<SimPosition>(body).unwrap().0, FixedVec2::from_f32(1.5, -2.0));
        assert_eq!(app.world().get::<SimVelocity>(body).unwrap().0, FixedVec2::from_f32(1.5, -2.0));
    }

    #[test]
    fn body_slides_along_the_edge() {
        let mut app = app_with_bounds(100.0, 100.0);
        let body = app.world_mut().spawn((
            SimPosition(FixedVec2::from_f32(49.0, 0.0)),
            SimVelocity(FixedVec2::from_f32(3.0, 1.0)),
        )).id();

        app.update();

        assert_eq!(app.world().get::<SimPosition>(body).unwrap().0, FixedVec2::from_f32(50.0, 1.0));
        assert_eq!(app.world().get::<SimVelocity>(body).unwrap().0, FixedVec2::from_f32(1.0, 1.0));
    }

    #[test]
    fn body_pinned_in_a_corner_stops() {
        let mut app = app_with_bounds(100.0, 100.0);
        let body = app.world_mut().spawn((
            SimPosition(FixedVec2::from_f32(50.0, 50.0)),
            SimVelocity(FixedVec2::from_f32(1.0, 1.0)),
        )).id();

        app.update();

        assert_eq!(app.world().get::<SimPosition>(body).unwrap().0, FixedVec2::from_f32(50.0, 50.0));
        assert_eq!(app.world().get::<SimVelocity>(body).unwrap().0, FixedVec2::ZERO);
    }
}
