use bevy::prelude::*;
use crate::game::config::{current_game_config, GameConfig, GameConfigHandle};
use crate::game::math::FixedVec2;
use crate::game::simulation::{DebugConfig, SetTargetCommand};
use crate::game::GameState;
use super::pointer::PointerWorldPosition;

/// The last point the player clicked, in world coordinates.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct TargetPoint(pub Option<Vec2>);

/// On the primary action, record the pointer position as the new target
/// and forward it to the simulation.
pub fn handle_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerWorldPosition>,
    mut target_point: ResMut<TargetPoint>,
    mut target_events: MessageWriter<SetTargetCommand>,
    config_handle: Option<Res<GameConfigHandle>>,
    game_configs: Option<Res<Assets<GameConfig>>>,
) {
    let config = current_game_config(config_handle.as_deref(), game_configs.as_deref());
    if !mouse_button.just_pressed(config.primary_action) {
        return;
    }
    let Some(point) = pointer.0 else { return };

    target_point.0 = Some(point);
    target_events.write(SetTargetCommand { target: FixedVec2::from_vec2(point) });
    info!("Target set to {:?}", point);
}

pub fn toggle_pause(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    config_handle: Option<Res<GameConfigHandle>>,
    game_configs: Option<Res<Assets<GameConfig>>>,
) {
    let config = current_game_config(config_handle.as_deref(), game_configs.as_deref());
    if !keys.just_pressed(config.key_pause) {
        return;
    }

    let next = match state.get() {
        GameState::InGame => GameState::Paused,
        GameState::Paused => GameState::InGame,
    };
    info!("{:?} -> {:?}", state.get(), next);
    next_state.set(next);
}

pub fn toggle_debug_paths(
    keys: Res<ButtonInput<KeyCode>>,
    mut debug_config: ResMut<DebugConfig>,
    config_handle: Option<Res<GameConfigHandle>>,
    game_configs: Option<Res<Assets<GameConfig>>>,
) {
    let config = current_game_config(config_handle.as_deref(), game_configs.as_deref());
    if keys.just_pressed(config.key_debug_path) {
        debug_config.show_paths = !debug_config.show_paths;
        info!("Path debug: {}", if debug_config.show_paths { "ON" } else { "OFF" });
    }
}
