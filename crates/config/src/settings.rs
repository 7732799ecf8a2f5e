//! Engine settings

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Bounded-memory knobs for per-session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Maximum history entries retained per session (oldest evicted first)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Maximum chars stored per history text field. Bounded memory, not
    /// content-security truncation.
    #[serde(default = "default_history_text_limit")]
    pub history_text_limit: usize,
}

fn default_history_limit() -> usize {
    20
}

fn default_history_text_limit() -> usize {
    200
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            history_text_limit: default_history_text_limit(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history_limit".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
