//! Application configuration
//!
//! Configuration loaded from `.so-watch.toml` (local) and
//! `~/.config/so-watch/config.toml` (global), merged key by key.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config_file::{load_config_file, merge_tables};
use crate::paths;

/// Languages the error watcher can parse
pub const SUPPORTED_LANGUAGES: &[&str] = &["python"];

/// Sort order of search results, sent as the `tab` search parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBy {
    #[default]
    Relevance,
    Newest,
    Active,
    Votes,
}

impl OrderBy {
    pub const ALL: [OrderBy; 4] = [
        OrderBy::Relevance,
        OrderBy::Newest,
        OrderBy::Active,
        OrderBy::Votes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Relevance => "Relevance",
            OrderBy::Newest => "Newest",
            OrderBy::Active => "Active",
            OrderBy::Votes => "Votes",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderBy::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "{} is an invalid order-by filter. Use one of {:?}.",
                    s,
                    OrderBy::ALL.map(|o| o.as_str())
                )
            })
    }
}

/// Application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Language whose errors are watched, also the search tag
    #[serde(default = "default_language")]
    pub language: String,

    /// Sort order of search results
    #[serde(default)]
    pub order_by: OrderBy,

    /// Only show posts with an accepted answer
    #[serde(default = "default_verified_only")]
    pub verified_only: bool,

    /// Show comments under questions and answers
    #[serde(default)]
    pub display_comments: bool,

    /// Max comments shown per question or answer
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,

    /// Base URL of the Q&A site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single page fetch, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_language() -> String {
    "python".to_string()
}

fn default_verified_only() -> bool {
    true
}

fn default_max_comments() -> usize {
    3
}

fn default_base_url() -> String {
    crate::DEFAULT_BASE_URL.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            order_by: OrderBy::default(),
            verified_only: default_verified_only(),
            display_comments: false,
            max_comments: default_max_comments(),
            base_url: default_base_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Keys accepted in configuration files
    pub const KEYS: &'static [&'static str] = &[
        "language",
        "order_by",
        "verified_only",
        "display_comments",
        "max_comments",
        "base_url",
        "fetch_timeout_secs",
    ];

    /// Load config with precedence: local file > global file > defaults
    ///
    /// Files are merged key by key, so a local file may override a single
    /// value of the global one.
    pub fn load() -> Result<Self> {
        let global = paths::global_config_path();
        let local = paths::local_config_path().ok();
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load from explicit files; keys of `local` win over keys of `global`
    ///
    /// Missing files are skipped. A value that does not fit its key is an
    /// error naming the file and the key.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();
        for path in [global, local].into_iter().flatten() {
            let Some(table) = load_config_file(path)? else {
                continue;
            };
            for (key, value) in &table {
                check_value(key, value).with_context(|| {
                    format!("{} is an invalid value for {} in {}", value, key, path.display())
                })?;
            }
            merged = merge_tables(merged, table);
        }

        let config = toml::Value::Table(merged)
            .try_into::<AppConfig>()
            .context("Failed to read configuration")?;
        log::info!("Loaded app config");
        Ok(config)
    }

    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            bail!(
                "{} is an invalid language. Use one of {:?}.",
                self.language,
                SUPPORTED_LANGUAGES
            );
        }
        if self.max_comments < 1 {
            bail!(
                "{} is an invalid max_comments value. Enter a positive integer.",
                self.max_comments
            );
        }
        if self.fetch_timeout_secs < 1 {
            bail!("fetch_timeout_secs must be at least 1");
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            bail!("{} is not an http(s) URL", self.base_url);
        }
        Ok(())
    }

    /// Apply command-line overrides on top of this configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(order_by) = overrides.order_by {
            self.order_by = order_by;
        }
        if let Some(verified_only) = overrides.verified_only {
            self.verified_only = verified_only;
        }
        if let Some(max_comments) = overrides.max_comments {
            self.display_comments = true;
            self.max_comments = max_comments;
        }
        self
    }
}

/// Deserialize a single key against the defaults of all others
fn check_value(key: &str, value: &toml::Value) -> Result<()> {
    let mut table = toml::Table::new();
    table.insert(key.to_string(), value.clone());
    toml::Value::Table(table).try_into::<AppConfig>()?;
    Ok(())
}

/// Per-invocation overrides from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub language: Option<String>,
    pub order_by: Option<OrderBy>,
    pub verified_only: Option<bool>,
    /// Enables comments and caps them at this count
    pub max_comments: Option<usize>,
}
