//! Configuration file access
//!
//! Loads, merges and edits the TOML configuration files. The local file lives
//! in the working directory, the global one in the user config directory.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_config::AppConfig;
use crate::paths;

/// Which configuration file to operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `.so-watch.toml` in the current working directory
    Local,
    /// `config.toml` in the user config directory
    Global,
}

/// Load and parse a config file
///
/// Returns `Ok(None)` if the file doesn't exist. A file that exists but
/// is not valid TOML is an error naming the file.
pub fn load_config_file(path: &Path) -> Result<Option<toml::Table>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let table = toml::from_str::<toml::Table>(&content)
        .with_context(|| format!("Failed to load the configuration file {}.", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(Some(table))
}

/// Merge two tables; keys of `overlay` win
pub fn merge_tables(mut base: toml::Table, overlay: toml::Table) -> toml::Table {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Cast a command-line string into a TOML value
///
/// Booleans, integers and floats keep their type, anything else is stored
/// as a string.
pub fn parse_value(raw: &str) -> toml::Value {
    let trimmed = raw.trim();
    if let Ok(b) = trimmed.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(raw.to_string())
}

/// A single configuration file on disk
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Config file at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The local or global config file
    pub fn for_scope(scope: ConfigScope) -> Result<Self> {
        let path = match scope {
            ConfigScope::Local => paths::local_config_path()?,
            ConfigScope::Global => {
                paths::global_config_path().context("Could not determine config directory")?
            }
        };
        Ok(Self::at(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the default configuration, creating parent directories
    pub fn create_default(&self) -> Result<()> {
        self.create(&AppConfig::default())
    }

    /// Write `config` as the whole file, creating parent directories
    pub fn create(&self, config: &AppConfig) -> Result<()> {
        let content = toml::to_string(config).context("Failed to serialize config")?;
        let table: toml::Table = toml::from_str(&content)?;
        self.write_table(&table)
    }

    /// Reset an existing file to the default configuration
    pub fn reset(&self) -> Result<()> {
        self.ensure_exists()?;
        self.create_default()
    }

    /// Get the raw value of a key
    pub fn get(&self, key: &str) -> Result<toml::Value> {
        let table = self.read_table()?;
        match table.get(key) {
            Some(value) => Ok(value.clone()),
            None => bail!(
                "The key {} doesn't exist in the configuration file {}.",
                key,
                self.path.display()
            ),
        }
    }

    /// All key-value pairs, sorted by key
    pub fn list(&self) -> Result<Vec<(String, toml::Value)>> {
        Ok(self.read_table()?.into_iter().collect())
    }

    /// Set a key, rejecting unknown keys and invalid values
    pub fn set(&self, key: &str, raw_value: &str) -> Result<()> {
        if !AppConfig::KEYS.contains(&key) {
            bail!(
                "{} is not a configuration key. Use one of {:?}.",
                key,
                AppConfig::KEYS
            );
        }

        let mut table = self.read_table()?;
        table.insert(key.to_string(), parse_value(raw_value));

        let config: AppConfig = toml::Value::Table(table.clone())
            .try_into()
            .with_context(|| format!("{} is an invalid value for {}", raw_value, key))?;
        config
            .validate()
            .with_context(|| format!("{} is an invalid value for {}", raw_value, key))?;

        self.write_table(&table)
    }

    fn ensure_exists(&self) -> Result<()> {
        if !self.exists() {
            bail!(
                "No so-watch configuration file found in {}!",
                self.path.display()
            );
        }
        Ok(())
    }

    fn read_table(&self) -> Result<toml::Table> {
        self.ensure_exists()?;
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to load the configuration file {}.", self.path.display()))
    }

    fn write_table(&self, table: &toml::Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let content = toml::to_string_pretty(table).context("Failed to serialize config")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        log::info!("Wrote config file {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderBy;

    fn temp_config() -> (tempfile::TempDir, ConfigFile) {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::at(dir.path().join("nested").join("config.toml"));
        (dir, file)
    }

    #[test]
    fn test_create_default_round_trips() {
        let (_dir, file) = temp_config();
        file.create_default().unwrap();

        let table = load_config_file(file.path()).unwrap().unwrap();
        let config: AppConfig = toml::Value::Table(table).try_into().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let (_dir, file) = temp_config();
        let err = file.get("language").unwrap_err();
        assert!(err.to_string().contains("No so-watch configuration file found"));
        assert!(file.reset().is_err());
        assert!(load_config_file(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_get_and_set() {
        let (_dir, file) = temp_config();
        file.create_default().unwrap();

        file.set("order_by", "Newest").unwrap();
        file.set("verified_only", "false").unwrap();
        file.set("max_comments", "10").unwrap();

        assert_eq!(file.get("order_by").unwrap().as_str(), Some("Newest"));
        assert_eq!(file.get("verified_only").unwrap().as_bool(), Some(false));
        assert_eq!(file.get("max_comments").unwrap().as_integer(), Some(10));
    }

    #[test]
    fn test_set_rejects_invalid() {
        let (_dir, file) = temp_config();
        file.create_default().unwrap();

        assert!(file.set("colour", "red").is_err());
        assert!(file.set("language", "GoLang").is_err());
        assert!(file.set("order_by", "Oldest").is_err());
        assert!(file.set("verified_only", "maybe").is_err());
        assert!(file.set("max_comments", "0").is_err());

        // Nothing was written
        assert_eq!(file.get("language").unwrap().as_str(), Some("python"));
    }

    #[test]
    fn test_get_unknown_key() {
        let (_dir, file) = temp_config();
        file.create_default().unwrap();
        let err = file.get("colour").unwrap_err();
        assert!(err.to_string().contains("The key colour doesn't exist"));
    }

    #[test]
    fn test_reset() {
        let (_dir, file) = temp_config();
        file.create_default().unwrap();
        file.set("order_by", "Votes").unwrap();
        file.reset().unwrap();
        assert_eq!(file.get("order_by").unwrap().as_str(), Some(OrderBy::Relevance.as_str()));
    }

    #[test]
    fn test_list() {
        let (_dir, file) = temp_config();
        file.create_default().unwrap();
        let keys: Vec<String> = file.list().unwrap().into_iter().map(|(k, _)| k).collect();
        for key in AppConfig::KEYS {
            assert!(keys.iter().any(|k| k == key), "missing {}", key);
        }
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let (dir, _) = temp_config();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "language = [unclosed").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_create_with_values() {
        let (_dir, file) = temp_config();
        let config = AppConfig {
            order_by: OrderBy::Votes,
            display_comments: true,
            max_comments: 5,
            ..AppConfig::default()
        };
        file.create(&config).unwrap();

        assert_eq!(file.get("order_by").unwrap().as_str(), Some("Votes"));
        assert_eq!(file.get("display_comments").unwrap().as_bool(), Some(true));
        assert_eq!(file.get("max_comments").unwrap().as_integer(), Some(5));
    }

    #[test]
    fn test_merge_tables_local_wins() {
        let global: toml::Table = toml::from_str("order_by = \"Votes\"\nverified_only = false").unwrap();
        let local: toml::Table = toml::from_str("order_by = \"Newest\"").unwrap();
        let merged = merge_tables(global, local);
        assert_eq!(merged.get("order_by").and_then(|v| v.as_str()), Some("Newest"));
        assert_eq!(merged.get("verified_only").and_then(|v| v.as_bool()), Some(false));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("5"), toml::Value::Integer(5));
        assert_eq!(parse_value("1.5"), toml::Value::Float(1.5));
        assert_eq!(parse_value("Votes"), toml::Value::String("Votes".to_string()));
    }
}
