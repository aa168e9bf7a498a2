//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/so-watch/ on Linux)
//!
//! Nothing is logged to the terminal; it belongs to the session.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("debug-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        so_config::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

/// Level from `RUST_LOG`, debug when unset and info when unrecognized
fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value {
        None => LevelFilter::Debug,
        Some(value) => value.trim().parse().unwrap_or(LevelFilter::Info),
    }
}

/// Initialize file-based logging
///
/// Returns the path of the log file.
pub fn init() -> Result<PathBuf> {
    let log_file = log_file_path();
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env() {
        assert_eq!(level_from_env(None), LevelFilter::Debug);
        assert_eq!(level_from_env(Some("WARN")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("trace")), LevelFilter::Trace);
        assert_eq!(level_from_env(Some("off")), LevelFilter::Off);
        assert_eq!(level_from_env(Some("loud")), LevelFilter::Info);
    }

    #[test]
    fn test_log_file_name() {
        let name = log_file_path();
        let name = name.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("debug-"));
        assert!(name.ends_with(".log"));
    }
}
