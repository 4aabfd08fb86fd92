use bevy::prelude::*;
use crate::game::GameState;

mod pointer;
mod commands;

pub use pointer::{track_pointer, PointerWorldPosition};
pub use commands::{handle_input, toggle_debug_paths, toggle_pause, TargetPoint};

/// Player input: click-to-target plus the pause and debug toggles.
pub struct ControlPlugin;

impl Plugin for ControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerWorldPosition>()
           .init_resource::<TargetPoint>()
           .add_systems(Update, (track_pointer, handle_input).chain().run_if(in_state(GameState::InGame)))
           .add_systems(Update, (toggle_pause, toggle_debug_paths));
    }
}
