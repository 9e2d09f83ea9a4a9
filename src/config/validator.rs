//! Configuration validator for dropsweep

use super::loader::{Config, ConfigError, DeletionConfig, LoggingConfig, VolumeConfig};
use crate::files::naming::parse_drive_letter;

/// Levels accepted by the tracing `EnvFilter`
pub const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_volume(&config.volume)?;
        Self::validate_deletion(&config.deletion)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    fn validate_volume(volume: &VolumeConfig) -> Result<(), ConfigError> {
        parse_drive_letter(&volume.drive_letter)
            .map(|_| ())
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    fn validate_deletion(deletion: &DeletionConfig) -> Result<(), ConfigError> {
        let suffix = &deletion.spoil_suffix;
        if suffix.is_empty() {
            return Err(ConfigError::Invalid(
                "Spoil suffix cannot be empty".to_string(),
            ));
        }

        if suffix.contains(['\\', '/', ':']) {
            return Err(ConfigError::Invalid(format!(
                "Spoil suffix {:?} must not contain path separators",
                suffix
            )));
        }

        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, VALID_LOG_LEVELS
            )));
        }

        if logging.file.is_empty() {
            return Err(ConfigError::Invalid(
                "Log file path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
