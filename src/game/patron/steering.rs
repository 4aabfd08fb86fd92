/// Path following for patrons.
///
/// Each tick a patron either stops (navigation finished), heads for the next
/// waypoint, or, when it has stalled mid-path, heads for the waypoint after
/// that. A stalled patron with no such waypoint keeps standing still. The result is a per-tick displacement of length
/// `movement_speed * tick_duration`, handed to the body mover.

use bevy::prelude::*;
use patron_macros::profile;
use crate::game::math::{to_local, FixedNum, FixedVec2};
use crate::game::navigation::NavigationAgent;
use crate::game::simulation::{SimConfig, SimPosition, SimTick, SimVelocity};
use super::components::{Motion, MotionPhase, Patron};

/// Decide this tick's displacement and update `motion` to match.
///
/// `velocity` is the displacement the body actually achieved last tick.
pub fn steer(
    agent: &NavigationAgent,
    motion: &mut Motion,
    position: FixedVec2,
    velocity: FixedVec2,
    step: FixedNum,
    stall_recovery: bool,
) -> FixedVec2 {
    if agent.is_navigation_finished() {
        motion.phase = if agent.target().is_some() {
            MotionPhase::Arrived
        } else {
            MotionPhase::Idle
        };
        return FixedVec2::ZERO;
    }

    if stall_recovery && motion.started && velocity == FixedVec2::ZERO {
        // Without a waypoint to skip to the patron stays where it is
        motion.phase = MotionPhase::StalledRecovery;
        return match agent.current_path().get(agent.current_path_index() + 1) {
            Some(&waypoint) => heading(position, waypoint, step),
            None => FixedVec2::ZERO,
        };
    }

    motion.phase = MotionPhase::Following;
    motion.started = true;
    heading(position, agent.next_path_position(position), step)
}

fn heading(position: FixedVec2, waypoint: FixedVec2, step: FixedNum) -> FixedVec2 {
    to_local(position, waypoint).normalize() * step
}

/// Steer every patron along its agent's path.
#[profile]
pub fn follow_path(
    mut query: Query<(Entity, &Patron, &NavigationAgent, &SimPosition, &mut SimVelocity, &mut Motion)>,
    sim_config: Res<SimConfig>,
    #[allow(unused_variables)] tick: Res<SimTick>,
) {
    let dt = sim_config.tick_duration();

    for (entity, patron, agent, pos, mut vel, mut motion) in query.iter_mut() {
        let previous = motion.phase;
        let mut next = *motion;
        let step = patron.movement_speed * dt;

        vel.0 = steer(agent, &mut next, pos.0, vel.0, step, sim_config.stall_recovery);

        if motion.set_if_neq(next) && next.phase != previous {
            debug!("Patron {:?}: {:?} -> {:?}", entity, previous, next.phase);
        }
    }
}
