pub mod game;

// ============================================================================
// Profiling Macros
// ============================================================================

/// Log a message once every 100 simulation ticks when `perf_stats` is enabled.
///
/// Without the feature this expands to an empty block and the arguments are
/// never evaluated.
///
/// ```ignore
/// profile_log!(tick, "Patrons alive: {}", query.iter().len());
/// ```
#[macro_export]
#[cfg(feature = "perf_stats")]
macro_rules! profile_log {
    ($tick:expr, $($arg:tt)*) => {
        if $tick.0 % 100 == 0 {
            bevy::prelude::info!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "perf_stats"))]
macro_rules! profile_log {
    ($tick:expr, $($arg:tt)*) => {};
}
