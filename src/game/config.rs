use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use crate::game::math::FixedNum;

pub const INITIAL_CONFIG_PATH: &str = "assets/initial_config.ron";

/// Static configuration loaded once at startup. These values feed the
/// deterministic simulation and must not change while it runs.
#[derive(Resource, Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct InitialConfig {
    // Simulation
    pub tick_rate: f64,
    pub map_width: f32,
    pub map_height: f32,

    // Patron template
    pub movement_speed: f32,
    /// Distance at which a waypoint counts as passed.
    pub path_desired_distance: f32,
    /// Distance at which the final waypoint counts as reached. Keep this
    /// above half of `movement_speed / tick_rate` or patrons overshoot.
    pub target_desired_distance: f32,
    pub stall_recovery: bool,
    pub target_pointer_on_spawn: bool,

    // Spawner
    pub spawn_interval: f32,
    pub spawn_marker_x: f32,
    pub spawn_marker_y: f32,
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            map_width: 1280.0,
            map_height: 720.0,
            movement_speed: 100.0,
            path_desired_distance: 20.0,
            target_desired_distance: 10.0,
            stall_recovery: true,
            target_pointer_on_spawn: true,
            spawn_interval: 2.0,
            spawn_marker_x: -500.0,
            spawn_marker_y: 0.0,
        }
    }
}

/// A config value that parsed but cannot drive the simulation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} is not representable in the simulation, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl InitialConfig {
    pub fn spawn_marker(&self) -> Vec2 {
        Vec2::new(self.spawn_marker_x, self.spawn_marker_y)
    }

    /// Check every value that ends up in fixed-point or timer arithmetic.
    ///
    /// `spawn_interval` is left to `Spawner::new`, which rejects it on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tick_rate", self.tick_rate)?;
        let tick_fits = FixedNum::ONE.checked_div(FixedNum::from_num(self.tick_rate)).is_some()
            && Duration::try_from_secs_f64(1.0 / self.tick_rate).is_ok();
        if !tick_fits {
            return Err(ConfigError::OutOfRange { field: "tick_rate", value: self.tick_rate });
        }

        positive("map_width", self.map_width.into())?;
        positive("map_height", self.map_height.into())?;
        positive("movement_speed", self.movement_speed.into())?;
        positive("path_desired_distance", self.path_desired_distance.into())?;
        positive("target_desired_distance", self.target_desired_distance.into())?;

        representable("spawn_marker_x", self.spawn_marker_x.into())?;
        representable("spawn_marker_y", self.spawn_marker_y.into())?;
        Ok(())
    }
}

/// Largest magnitude accepted for lengths and coordinates; squared
/// distances across the map must still fit in a `FixedNum`.
const MAX_MAGNITUDE: f64 = 1.0e6;

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_nan() || value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    representable(field, value)
}

fn representable(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value.abs() <= MAX_MAGNITUDE {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Runtime configuration that can be hot-reloaded during gameplay.
/// Nothing in here affects the simulation result.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug)]
pub struct GameConfig {
    pub primary_action: MouseButton,
    pub key_pause: KeyCode,
    pub key_debug_path: KeyCode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            primary_action: MouseButton::Left,
            key_pause: KeyCode::KeyP,
            key_debug_path: KeyCode::F1,
        }
    }
}

#[derive(Resource)]
pub struct GameConfigHandle(pub Handle<GameConfig>);

pub struct GameConfigPlugin;

impl Plugin for GameConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameConfig>::new(&["game_config.ron"]))
           .add_systems(Startup, (load_initial_config, setup_runtime_config).chain());
    }
}

/// Read, parse and validate the static config, falling back to defaults on any error.
pub fn read_initial_config(path: &str) -> InitialConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<InitialConfig>(&contents) {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    info!("Loaded initial config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Invalid value in {}: {}", path, e);
                    error!("Using default InitialConfig");
                    InitialConfig::default()
                }
            },
            Err(e) => {
                error!("Failed to parse {}: {}", path, e);
                error!("Using default InitialConfig");
                InitialConfig::default()
            }
        },
        Err(e) => {
            error!("Failed to read {}: {}", path, e);
            error!("Using default InitialConfig");
            InitialConfig::default()
        }
    }
}

/// Load static initial configuration synchronously at startup.
/// Everything that builds simulation state runs after this.
pub fn load_initial_config(mut commands: Commands) {
    commands.insert_resource(read_initial_config(INITIAL_CONFIG_PATH));
}

/// Load runtime configuration asynchronously (can be hot-reloaded).
fn setup_runtime_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("game_config.ron");
    commands.insert_resource(GameConfigHandle(handle));
}

/// The loaded runtime config, or its defaults while the asset is in flight.
pub fn current_game_config(
    handle: Option<&GameConfigHandle>,
    configs: Option<&Assets<GameConfig>>,
) -> GameConfig {
    handle
        .zip(configs)
        .and_then(|(handle, configs)| configs.get(&handle.0))
        .cloned()
        .unwrap_or_default()
}
