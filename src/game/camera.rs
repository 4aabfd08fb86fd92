use bevy::prelude::*;

pub struct MainCameraPlugin;

impl Plugin for MainCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
    }
}

/// The camera pointer positions are projected through.
#[derive(Component)]
pub struct MainCamera;

fn spawn_camera(mut commands: Commands) {
    // Top-down, world origin at the center of the window
    commands.spawn((
        Camera2d,
        Transform::default(),
        MainCamera,
    ));
}
