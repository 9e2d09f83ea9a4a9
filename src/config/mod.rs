//! Configuration for the dropsweep binary
//!
//! TOML loading, defaults and validation.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults, RunAction};
pub use loader::{
    load_config, Config, ConfigError, ConfigLoader, DeletionConfig, LoggingConfig,
    ProcessConfig, RunConfig, VolumeConfig, DEFAULT_CONFIG_FILE,
};
pub use validator::{validate_config, ConfigValidator, VALID_LOG_LEVELS};

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
