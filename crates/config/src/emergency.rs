//! Emergency keyword set and contacts response
//!
//! The emergency pre-filter is a recall-biased safety net, not a precision
//! classifier: any case-insensitive substring hit triggers the emergency
//! branch, false positives accepted.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyConfig {
    /// Keywords matched as lower-case substrings
    #[serde(default = "builtin_keywords")]
    pub keywords: Vec<String>,
    /// Fixed emergency-contacts response text
    #[serde(default = "builtin_contacts_message")]
    pub contacts_message: String,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            keywords: builtin_keywords(),
            contacts_message: builtin_contacts_message(),
        }
    }
}

impl EmergencyConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        crate::load_yaml(path)
    }
}

fn builtin_keywords() -> Vec<String> {
    [
        "911",
        "unconscious",
        "not breathing",
        "bleeding",
        "fire",
        "explosion",
        "heart attack",
        "seizure",
        "chemical exposure",
        "electrocut",
        "trapped",
        "ambulance",
        "life threatening",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

fn builtin_contacts_message() -> String {
    "\u{26a0} If this is a life-threatening emergency, call 911 immediately.\n\n\
     Emergency contacts:\n\
     - Emergency services: 911\n\
     - Site first aid: ext. 2222\n\
     - EHS on-call: ext. 3333\n\n\
     Once everyone is safe, I can help you file the incident report."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keywords_are_lowercase() {
        let config = EmergencyConfig::default();
        for keyword in &config.keywords {
            assert_eq!(keyword, &keyword.to_lowercase());
        }
    }

    #[test]
    fn test_contacts_message_mentions_911() {
        let config = EmergencyConfig::default();
        assert!(config.contacts_message.contains("911"));
    }
}
