use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::game::config::InitialConfig;
use crate::game::math::{FixedNum, FixedVec2};
use crate::game::navigation::NavigationAgent;
use crate::game::simulation::{SimPosition, SimPositionPrev, SimVelocity};

/// A character that walks its navigation path toward the last clicked point.
#[derive(Component, Debug, Clone, Copy)]
pub struct Patron {
    /// World units per second.
    pub movement_speed: FixedNum,
}

/// Where a patron is in its path-following lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    /// No target has ever been set.
    #[default]
    Idle,
    /// Steering toward the next waypoint.
    Following,
    /// Stopped mid-path; steering toward the waypoint after the current one,
    /// or standing still when there is none.
    StalledRecovery,
    /// The agent reports navigation finished.
    Arrived,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Motion {
    pub phase: MotionPhase,
    /// Set the first time the patron steers; never cleared.
    pub started: bool,
}

/// Everything needed to instantiate a patron.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatronTemplate {
    pub movement_speed: f32,
    pub path_desired_distance: f32,
    pub target_desired_distance: f32,
}

impl PatronTemplate {
    pub fn from_config(config: &InitialConfig) -> Self {
        Self {
            movement_speed: config.movement_speed,
            path_desired_distance: config.path_desired_distance,
            target_desired_distance: config.target_desired_distance,
        }
    }

    /// A fresh navigation agent with this template's arrival distances.
    pub fn agent(&self) -> NavigationAgent {
        NavigationAgent::new(
            FixedNum::from_num(self.path_desired_distance),
            FixedNum::from_num(self.target_desired_distance),
        )
    }

    /// The component bundle of a patron standing still at `position`.
    pub fn instantiate(&self, position: FixedVec2, agent: NavigationAgent) -> impl Bundle {
        (
            Name::new("Patron"),
            Patron { movement_speed: FixedNum::from_num(self.movement_speed) },
            agent,
            Motion::default(),
            SimPosition(position),
            SimPositionPrev(position),
            SimVelocity::default(),
            Transform::from_translation(position.to_vec2().extend(1.0)),
            Visibility::default(),
        )
    }
}
