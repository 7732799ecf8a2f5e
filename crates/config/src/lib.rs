//! Configuration for the incident-intake engine
//!
//! All tables here are immutable after load: intent rules, slot schemas,
//! prompts, emergency keywords, and risk keyword sets. Built-in defaults
//! cover the full EHS domain; each table can also be loaded from a YAML
//! file to override the defaults.

pub mod emergency;
pub mod intents;
pub mod risk;
pub mod settings;
pub mod slots;

pub use emergency::EmergencyConfig;
pub use intents::{IntentPattern, IntentRule, IntentsConfig};
pub use risk::RiskConfig;
pub use settings::EngineSettings;
pub use slots::SlotSchemaConfig;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}: {source_message}")]
    FileNotFound {
        path: String,
        source_message: String,
    },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<ConfigError> for ehs_intake_core::Error {
    fn from(err: ConfigError) -> Self {
        ehs_intake_core::Error::Config(err.to_string())
    }
}

/// Read and deserialize a YAML config file
pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(
    path: impl AsRef<std::path::Path>,
) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileNotFound {
        path: path.display().to_string(),
        source_message: e.to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
}
