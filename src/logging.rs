// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use time::macros::format_description;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, EnvFilter, Layer, fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "scanwatch-rs", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Where `initialize_logging` writes: `<data dir>/scanwatch-rs.log`.
pub fn log_file_path() -> PathBuf {
    get_data_dir().join(LOG_FILE.as_str())
}

/// Filter directive: `RUST_LOG`, then `SCANWATCH_RS_LOGLEVEL`, then info for
/// this crate.
pub fn log_level() -> String {
    std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.clone()))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Initializes file-based logging using the tracing subscriber.
///
/// The terminal belongs to the UI, so every event goes to
/// `<data dir>/scanwatch-rs.log` instead.
pub fn initialize_logging() -> Result<()> {
    let log_path = log_file_path();
    if let Some(directory) = log_path.parent() {
        std::fs::create_dir_all(directory)?;
    }
    let log_file = std::fs::File::create(&log_path)?;
    let filter = log_level();

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(&filter));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    info!(path = %log_path.display(), filter = %filter, "Logging initialized.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_derive_from_the_crate() {
        assert_eq!(PROJECT_NAME.as_str(), "SCANWATCH_RS");
        assert_eq!(LOG_ENV.as_str(), "SCANWATCH_RS_LOGLEVEL");
        assert_eq!(LOG_FILE.as_str(), "scanwatch-rs.log");
    }

    #[test]
    fn log_file_lives_in_the_data_dir() {
        let path = log_file_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("scanwatch-rs.log"));
        assert_eq!(path.parent(), Some(get_data_dir().as_path()));
    }
}
