mod components;
mod steering;
mod visuals;

use bevy::prelude::*;
use crate::game::navigation::update_navigation;
use crate::game::simulation::SimSet;

pub use components::{Motion, MotionPhase, Patron, PatronTemplate};
pub use steering::{follow_path, steer};
pub use visuals::PatronVisualsPlugin;

/// Plugin that steers patrons along their navigation paths
pub struct PatronPlugin;

impl Plugin for PatronPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate,
            follow_path
                .in_set(SimSet::Steering)
                .after(update_navigation));
    }
}
