//! Configuration loader for dropsweep
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::{default_config, RunAction};
use crate::core::types::DeletionStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File the binary reads when no other path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_volume")]
    pub volume: VolumeConfig,

    #[serde(default = "default_deletion")]
    pub deletion: DeletionConfig,

    #[serde(default = "default_process")]
    pub process: ProcessConfig,

    #[serde(default = "default_run")]
    pub run: RunConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Volume the file IDs belong to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    #[serde(default = "default_drive_letter")]
    pub drive_letter: String,
}

/// How files are removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionConfig {
    #[serde(default = "default_strategy")]
    pub strategy: DeletionStrategy,
    #[serde(default = "default_spoil_suffix")]
    pub spoil_suffix: String,
}

/// Process-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    #[serde(default = "default_enable_debug_privilege")]
    pub enable_debug_privilege: bool,
}

/// Binary run mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_action")]
    pub action: RunAction,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults only when the file is missing
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Loads configuration from `config.toml` in the working directory
pub fn load_config() -> Result<Config, ConfigError> {
    ConfigLoader::new(DEFAULT_CONFIG_FILE).load_or_default()
}

fn default_volume() -> VolumeConfig {
    VolumeConfig {
        drive_letter: default_drive_letter(),
    }
}

fn default_deletion() -> DeletionConfig {
    let defaults = default_config().deletion;
    DeletionConfig {
        strategy: defaults.strategy,
        spoil_suffix: defaults.spoil_suffix,
    }
}

fn default_process() -> ProcessConfig {
    let defaults = default_config().process;
    ProcessConfig {
        enable_debug_privilege: defaults.enable_debug_privilege,
    }
}

fn default_run() -> RunConfig {
    RunConfig {
        action: default_action(),
    }
}

fn default_logging() -> LoggingConfig {
    let defaults = default_config().logging;
    LoggingConfig {
        level: defaults.level,
        file: defaults.file,
    }
}

fn default_drive_letter() -> String {
    default_config().volume.drive_letter
}

fn default_strategy() -> DeletionStrategy {
    default_config().deletion.strategy
}

fn default_spoil_suffix() -> String {
    default_config().deletion.spoil_suffix
}

fn default_enable_debug_privilege() -> bool {
    default_config().process.enable_debug_privilege
}

fn default_action() -> RunAction {
    default_config().run.action
}

fn default_log_level() -> String {
    default_config().logging.level
}

fn default_log_file() -> String {
    default_config().logging.file
}

impl Default for Config {
    fn default() -> Self {
        Config {
            volume: default_volume(),
            deletion: default_deletion(),
            process: default_process(),
            run: default_run(),
            logging: default_logging(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.volume.drive_letter, "C");
        assert_eq!(config.run.action, RunAction::List);
    }

    #[test]
    fn test_load_missing_file() {
        let loader = ConfigLoader::new("nonexistent-dropsweep.toml");
        let result = loader.load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let loader = ConfigLoader::new("nonexistent-dropsweep.toml");
        let config = loader.load_or_default().unwrap();
        assert_eq!(config.deletion.spoil_suffix, ".spoiled");
    }

    #[test]
    fn test_load_or_default_rejects_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[volume\ndrive_letter = ").unwrap();

        let result = ConfigLoader::new(&config_path).load_or_default();
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.volume.drive_letter = "D".to_string();
        config.deletion.strategy = DeletionStrategy::RenameThenDelete;
        let loader = ConfigLoader::new(&config_path);

        loader.save(&config).unwrap();
        assert!(config_path.exists());

        let loaded = loader.load().unwrap();
        assert_eq!(loaded.volume.drive_letter, "D");
        assert_eq!(loaded.deletion.strategy, DeletionStrategy::RenameThenDelete);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
            [deletion]
            strategy = "rename_then_delete"

            [run]
            action = "delete"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.deletion.strategy, DeletionStrategy::RenameThenDelete);
        assert_eq!(config.run.action, RunAction::Delete);
        // Check defaults are applied
        assert_eq!(config.deletion.spoil_suffix, ".spoiled");
        assert_eq!(config.volume.drive_letter, "C");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let toml_str = r#"
            [deletion]
            strategy = "shred"
        "#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }
}
