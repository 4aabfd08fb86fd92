use bevy::prelude::*;

use bevy::log::LogPlugin;
use bevy::window::WindowResolution;

use patron::game::GamePlugin;

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_DIR: &str = "logs";
const LOGS_KEPT: usize = 25;

/// Log to stdout and to a fresh timestamped file under `logs/`.
/// Returns the log file path, or `None` if only stdout is available.
fn setup_logging() -> Option<PathBuf> {
    let log_dir = PathBuf::from(LOG_DIR);
    let file_ok = fs::create_dir_all(&log_dir).is_ok();
    if file_ok {
        cleanup_old_logs(&log_dir, LOGS_KEPT);
    }

    let log_filename = format!("patron_{}.log", chrono::Local::now().format("%Y%m%d_%H%M%S"));

    let file_layer = file_ok.then(|| {
        let file_appender = RollingFileAppender::new(Rotation::NEVER, &log_dir, &log_filename);
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            EnvFilter::new("wgpu=error,bevy_render=info,bevy_ecs=info,patron=info")
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    file_ok.then(|| log_dir.join(log_filename))
}

/// Delete the oldest `patron*.log` files so at most `keep_count` remain.
fn cleanup_old_logs(log_dir: &Path, keep_count: usize) {
    let Ok(entries) = fs::read_dir(log_dir) else { return };

    let mut log_files: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|s| s.starts_with("patron") && s.ends_with(".log"))
        })
        .collect();

    // Oldest first
    log_files.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

    if log_files.len() > keep_count {
        for file in log_files.iter().take(log_files.len() - keep_count) {
            let _ = fs::remove_file(file.path());
        }
    }
}

fn main() {
    match setup_logging() {
        Some(path) => info!("Logging to {}", path.display()),
        None => warn!("Could not create {}/, logging to stdout only", LOG_DIR),
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Patron".into(),
                resolution: WindowResolution::new(1280, 720),
                resizable: true,
                ..default()
            }),
            ..default()
        }).build().disable::<LogPlugin>()) // Our own subscriber is already installed
        .add_plugins(GamePlugin)
        .run();
}
