//! Configuration, cache and pipe paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/so-watch/`, `~/.cache/so-watch/`
//! - macOS: `~/Library/Application Support/so-watch/`, `~/Library/Caches/so-watch/`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "so-watch";
const LOCAL_CONFIG_FILE: &str = ".so-watch.toml";
const GLOBAL_CONFIG_FILE: &str = "config.toml";
const CAPTURE_PIPE_FILE: &str = "capture.fifo";

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to the global config file (not created)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(GLOBAL_CONFIG_FILE))
}

/// Get path to the local config file (in CWD)
pub fn local_config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(LOCAL_CONFIG_FILE))
}

/// Get path to the fifo shared by `capture` and `display`
pub fn capture_pipe_path() -> PathBuf {
    std::env::temp_dir().join(APP_NAME).join(CAPTURE_PIPE_FILE)
}
