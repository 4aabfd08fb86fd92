use bevy::prelude::*;

pub mod camera;
pub mod config;
pub mod control;
pub mod math;
pub mod navigation;
pub mod patron;
pub mod simulation;
pub mod spawner;

use camera::MainCameraPlugin;
use config::{GameConfigPlugin, InitialConfig};
use control::ControlPlugin;
use math::FixedVec2;
use navigation::NavigationPlugin;
use patron::{PatronPlugin, PatronTemplate, PatronVisualsPlugin};
use simulation::{SimPosition, SimulationPlugin};
use spawner::{Spawner, SpawnerPlugin};

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    InGame,
    Paused,
}

/// Root node of the level; spawned patrons live under it.
#[derive(Component)]
pub struct Level;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
           .add_plugins((
               GameConfigPlugin,
               MainCameraPlugin,
               SimulationPlugin,
               NavigationPlugin,
               PatronPlugin,
               PatronVisualsPlugin,
               SpawnerPlugin,
               ControlPlugin,
           ))
           .add_systems(Startup, setup_level.after(config::load_initial_config));
    }
}

fn setup_level(mut commands: Commands, config: Res<InitialConfig>) {
    info!("Level setup started");

    let level = commands.spawn((
        Name::new("Level"),
        Level,
        Transform::default(),
        Visibility::default(),
    )).id();

    let marker = config.spawn_marker();
    let template = PatronTemplate::from_config(&config);
    match Spawner::new(config.spawn_interval, Some(template)) {
        Ok(spawner) => {
            commands.spawn((
                Name::new("Spawner"),
                spawner,
                SimPosition(FixedVec2::from_vec2(marker)),
                Transform::from_translation(marker.extend(0.0)),
                Visibility::default(),
                ChildOf(level),
            ));
            info!("Spawner placed at {:?}, every {}s", marker, config.spawn_interval);
        }
        Err(e) => error!("Spawner not placed: {}", e),
    }
}
