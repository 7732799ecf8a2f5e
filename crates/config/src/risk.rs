//! Risk keyword sets for the local risk scorer

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Disjoint keyword sets scanned over collected intake text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Any hit forces `RiskLevel::High`
    #[serde(default = "builtin_high_keywords")]
    pub high_keywords: Vec<String>,
    /// Checked only when no high keyword hit; any hit yields `RiskLevel::Low`
    #[serde(default = "builtin_low_keywords")]
    pub low_keywords: Vec<String>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_keywords: builtin_high_keywords(),
            low_keywords: builtin_low_keywords(),
        }
    }
}

impl RiskConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        crate::load_yaml(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(overlap) = self
            .high_keywords
            .iter()
            .find(|k| self.low_keywords.contains(k))
        {
            return Err(ConfigError::InvalidValue {
                field: "risk keywords".into(),
                message: format!("'{}' appears in both high and low sets", overlap),
            });
        }
        Ok(())
    }
}

fn builtin_high_keywords() -> Vec<String> {
    [
        "severe",
        "hospital",
        "fatality",
        "fatal",
        "major",
        "amputation",
        "fracture",
        "unconscious",
        "surgery",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

fn builtin_low_keywords() -> Vec<String> {
    ["minor", "first aid", "superficial", "bruise", "scratch", "no injury"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sets_are_disjoint() {
        RiskConfig::default().validate().unwrap();
    }

    #[test]
    fn test_overlap_rejected() {
        let config = RiskConfig {
            high_keywords: vec!["severe".into()],
            low_keywords: vec!["severe".into()],
        };
        assert!(config.validate().is_err());
    }
}
