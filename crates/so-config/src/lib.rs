//! Configuration and file management for so-watch
//!
//! This crate provides:
//! - File path utilities for config, cache and the capture pipe
//! - Configuration file loading with local/global precedence (TOML)
//! - Application configuration (AppConfig) and command-line overrides
//! - Key-level editing of configuration files

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, ConfigOverrides, OrderBy};
pub use config_file::{load_config_file, parse_value, ConfigFile, ConfigScope};
pub use paths::{cache_dir, capture_pipe_path};

/// Default Q&A site queried for errors
pub const DEFAULT_BASE_URL: &str = "https://stackoverflow.com";
