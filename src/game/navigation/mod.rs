//! Path-planning service.
//!
//! The [`NavigationServer`] resource owns the active [`PathPlanner`]; each
//! character carries a [`NavigationAgent`] that asks it for paths and tracks
//! progress along them. `update_navigation` refreshes every agent once per
//! tick, before anything steers.

use bevy::prelude::*;
use patron_macros::profile;
use crate::game::simulation::{SimPosition, SimSet, SimTick};

mod agent;
mod planner;

pub use agent::NavigationAgent;
pub use planner::{DirectPlanner, NavPath, PathPlanner};

#[derive(Resource)]
pub struct NavigationServer {
    planner: Box<dyn PathPlanner>,
}

impl NavigationServer {
    pub fn new(planner: impl PathPlanner) -> Self {
        Self { planner: Box::new(planner) }
    }

    pub fn planner(&self) -> &dyn PathPlanner {
        self.planner.as_ref()
    }
}

impl Default for NavigationServer {
    fn default() -> Self {
        Self::new(DirectPlanner)
    }
}

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationServer>()
           .add_systems(FixedUpdate, update_navigation.in_set(SimSet::Steering));
    }
}

/// Re-plan dirty agents and advance every agent along its path.
#[profile]
pub fn update_navigation(
    mut query: Query<(&SimPosition, &mut NavigationAgent)>,
    server: Res<NavigationServer>,
    #[allow(unused_variables)] tick: Res<SimTick>,
) {
    let planner = server.planner();
    for (pos, mut agent) in query.iter_mut() {
        agent.update(pos.0, planner);
    }
}
