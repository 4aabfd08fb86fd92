use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use crate::game::camera::MainCamera;

/// Where the mouse pointer is in world coordinates, `None` while it is
/// outside the window.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerWorldPosition(pub Option<Vec2>);

/// Project the cursor through the main camera once per frame.
///
/// Leaves the resource untouched when there is no window or camera, so
/// headless apps can drive it directly.
pub fn track_pointer(
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut pointer: ResMut<PointerWorldPosition>,
) {
    let Ok(window) = q_window.single() else { return };
    let Ok((camera, camera_transform)) = q_camera.single() else { return };

    let world = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());

    pointer.set_if_neq(PointerWorldPosition(world));
}
