use bevy::prelude::*;
use crate::game::math::{FixedNum, FixedVec2};
use super::planner::{NavPath, PathPlanner};

/// Per-character handle on the path-planning service.
///
/// Holds the current target and the path the planner returned for it, and
/// tracks how far along that path the body is. The path is planned lazily on
/// the first [`update`](Self::update) after the target changes.
#[derive(Component, Debug, Clone)]
pub struct NavigationAgent {
    target: Option<FixedVec2>,
    path: NavPath,
    path_index: usize,
    path_dirty: bool,
    finished: bool,
    /// A waypoint closer than this counts as passed.
    pub path_desired_distance: FixedNum,
    /// The final waypoint closer than this counts as reached.
    pub target_desired_distance: FixedNum,
}

impl NavigationAgent {
    pub fn new(path_desired_distance: FixedNum, target_desired_distance: FixedNum) -> Self {
        Self {
            target: None,
            path: NavPath::new(),
            path_index: 0,
            path_dirty: false,
            finished: true,
            path_desired_distance,
            target_desired_distance,
        }
    }

    /// Request navigation toward `target`. Any coordinate is accepted.
    pub fn set_target(&mut self, target: FixedVec2) {
        self.target = Some(target);
        self.path_dirty = true;
        self.finished = false;
    }

    pub fn target(&self) -> Option<FixedVec2> {
        self.target
    }

    /// True when there is nothing left to follow: no target was ever set, the
    /// final waypoint was reached, or the planner found no path.
    pub fn is_navigation_finished(&self) -> bool {
        self.finished
    }

    /// The waypoint to head for now, or `position` itself when there is no path.
    pub fn next_path_position(&self, position: FixedVec2) -> FixedVec2 {
        self.path.get(self.path_index).copied().unwrap_or(position)
    }

    pub fn current_path(&self) -> &[FixedVec2] {
        &self.path
    }

    pub fn current_path_index(&self) -> usize {
        self.path_index
    }

    /// Re-plan if the target changed, then advance along the path from `position`.
    pub fn update(&mut self, position: FixedVec2, planner: &dyn PathPlanner) {
        let Some(target) = self.target else { return };

        if self.path_dirty {
            self.path = planner.plan(position, target);
            self.path_index = 0;
            self.path_dirty = false;
            if self.path.is_empty() {
                debug!("No path from {:?} to {:?}", position.to_vec2(), target.to_vec2());
                self.finished = true;
            }
        }

        if self.finished {
            return;
        }

        let waypoint_sq = self.path_desired_distance * self.path_desired_distance;
        while self.path_index + 1 < self.path.len()
            && self.path[self.path_index].distance_squared(position) <= waypoint_sq
        {
            self.path_index += 1;
        }

        let target_sq = self.target_desired_distance * self.target_desired_distance;
        let is_last = self.path_index + 1 == self.path.len();
        if is_last && self.path[self.path_index].distance_squared(position) <= target_sq {
            self.finished = true;
        }
    }
}
