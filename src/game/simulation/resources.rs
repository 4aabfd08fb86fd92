/// Resource definitions for the simulation.

use bevy::prelude::*;
use crate::game::config::InitialConfig;
use crate::game::math::{FixedNum, FixedVec2};
use std::time::{Duration, Instant};

// ============================================================================
// Tick Tracking
// ============================================================================

/// Number of simulation ticks run so far.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimTick(pub u64);

impl SimTick {
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Performance tracking for simulation ticks
#[derive(Resource)]
pub struct SimPerformance {
    pub start_time: Option<Instant>,
    pub last_duration: Duration,
}

impl Default for SimPerformance {
    fn default() -> Self {
        Self {
            start_time: None,
            last_duration: Duration::from_secs(0),
        }
    }
}

// ============================================================================
// Simulation Configuration
// ============================================================================

/// Simulation parameters in fixed point, converted once from [`InitialConfig`].
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    pub tick_rate: f64,
    pub map_width: FixedNum,
    pub map_height: FixedNum,
    /// Steer toward the waypoint after the current one when a moving patron stalls.
    pub stall_recovery: bool,
    /// Give freshly spawned patrons the pointer position as their first target.
    pub target_pointer_on_spawn: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_initial(&InitialConfig::default())
    }
}

impl SimConfig {
    pub fn from_initial(initial: &InitialConfig) -> Self {
        Self {
            tick_rate: initial.tick_rate,
            map_width: FixedNum::from_num(initial.map_width),
            map_height: FixedNum::from_num(initial.map_height),
            stall_recovery: initial.stall_recovery,
            target_pointer_on_spawn: initial.target_pointer_on_spawn,
        }
    }

    /// Length of one tick in seconds.
    pub fn tick_duration(&self) -> FixedNum {
        FixedNum::ONE / FixedNum::from_num(self.tick_rate)
    }

    /// Length of one tick as a `Duration`, for ticking timers.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }

    /// Half of the map size; the map spans `[-half, half]` on both axes.
    pub fn half_extents(&self) -> FixedVec2 {
        let two = FixedNum::from_num(2);
        FixedVec2::new(self.map_width / two, self.map_height / two)
    }
}

// ============================================================================
// Debug Configuration
// ============================================================================

/// Debug visualization settings
#[derive(Resource, Default)]
pub struct DebugConfig {
    pub show_paths: bool,
}
