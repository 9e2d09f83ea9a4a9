//! Default configuration values for dropsweep

use crate::core::types::DeletionStrategy;
use crate::files::naming::DEFAULT_SPOIL_SUFFIX;
use serde::{Deserialize, Serialize};

/// What the binary does with the file IDs it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAction {
    /// Resolve and report paths only
    #[default]
    List,
    /// Delete every resolvable file
    Delete,
}

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub volume: VolumeDefaults,
    pub deletion: DeletionDefaults,
    pub process: ProcessDefaults,
    pub run: RunDefaults,
    pub logging: LoggingDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDefaults {
    pub drive_letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionDefaults {
    pub strategy: DeletionStrategy,
    pub spoil_suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessDefaults {
    pub enable_debug_privilege: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDefaults {
    pub action: RunAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
    pub file: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        volume: VolumeDefaults {
            drive_letter: "C".to_string(),
        },
        deletion: DeletionDefaults {
            strategy: DeletionStrategy::Disposition,
            spoil_suffix: DEFAULT_SPOIL_SUFFIX.to_string(),
        },
        process: ProcessDefaults {
            enable_debug_privilege: true,
        },
        run: RunDefaults {
            action: RunAction::List,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
            file: "dropsweep.log".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.volume.drive_letter, "C");
        assert_eq!(config.deletion.strategy, DeletionStrategy::Disposition);
        assert_eq!(config.deletion.spoil_suffix, ".spoiled");
        assert!(config.process.enable_debug_privilege);
        assert_eq!(config.run.action, RunAction::List);
    }

    #[test]
    fn test_logging_defaults() {
        let config = default_config();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "dropsweep.log");
    }

    #[test]
    fn test_serialization() {
        let config = default_config();
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("drive_letter"));
        assert!(serialized.contains("strategy = \"disposition\""));
        assert!(serialized.contains("action = \"list\""));

        let deserialized: ConfigDefaults = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.volume.drive_letter, config.volume.drive_letter);
        assert_eq!(deserialized.run.action, config.run.action);
    }
}
