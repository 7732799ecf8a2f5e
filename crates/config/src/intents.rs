//! Intent rule tables
//!
//! Weighted regular-expression rules for the pattern classifier. Rules are
//! loaded once at process start and never mutated at runtime. Declaration
//! order matters: it is the classifier's tie-break order.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// A single pattern with an optional weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPattern {
    /// Regular expression, matched anywhere in the lower-cased text
    pub pattern: String,
    /// Score contributed when this pattern hits; defaults to 0.7
    #[serde(default)]
    pub weight: Option<f32>,
}

impl IntentPattern {
    pub fn new(pattern: impl Into<String>, weight: f32) -> Self {
        Self {
            pattern: pattern.into(),
            weight: Some(weight),
        }
    }

    /// Effective weight, applying the 0.7 default
    pub fn effective_weight(&self) -> f32 {
        self.weight.unwrap_or(DEFAULT_PATTERN_WEIGHT)
    }
}

/// Default weight for patterns declared without one
pub const DEFAULT_PATTERN_WEIGHT: f32 = 0.7;

/// An intent with its ordered pattern list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRule {
    pub name: String,
    pub patterns: Vec<IntentPattern>,
}

/// Intent rules plus classifier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentsConfig {
    /// Rules in declaration order (tie-break order)
    #[serde(default)]
    pub intents: Vec<IntentRule>,
    /// Sentinel intent forced when no rule scores at or above the floor
    #[serde(default = "default_fallback_intent")]
    pub fallback_intent: String,
    /// Minimum confidence ever surfaced; scores below it are forced to the
    /// fallback intent at exactly this confidence
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f32,
    /// Confidence the dialogue manager requires before acting on a
    /// classification (mode-switch gate)
    #[serde(default = "default_switch_threshold")]
    pub switch_threshold: f32,
}

fn default_fallback_intent() -> String {
    "general_inquiry".to_string()
}

fn default_confidence_floor() -> f32 {
    0.3
}

fn default_switch_threshold() -> f32 {
    0.6
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self {
            intents: builtin_intents(),
            fallback_intent: default_fallback_intent(),
            confidence_floor: default_confidence_floor(),
            switch_threshold: default_switch_threshold(),
        }
    }
}

impl IntentsConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        crate::load_yaml(path)
    }

    /// Get a rule by intent name
    pub fn get_intent(&self, name: &str) -> Option<&IntentRule> {
        self.intents.iter().find(|i| i.name == name)
    }

    /// All intent names in declaration order
    pub fn intent_names(&self) -> Vec<&str> {
        self.intents.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ConfigError::InvalidValue {
                field: "confidence_floor".into(),
                message: format!("{} is outside [0, 1]", self.confidence_floor),
            });
        }
        if self.switch_threshold < self.confidence_floor {
            return Err(ConfigError::InvalidValue {
                field: "switch_threshold".into(),
                message: "switch threshold below confidence floor".into(),
            });
        }
        Ok(())
    }
}

/// Built-in EHS intent rules
fn builtin_intents() -> Vec<IntentRule> {
    vec![
        IntentRule {
            name: "incident_reporting".to_string(),
            patterns: vec![
                IntentPattern::new(r"\breport\b.*\b(incident|injur\w*|accident)\b", 0.9),
                IntentPattern::new(r"\bworkplace (injur\w*|accident|incident)\b", 0.9),
                IntentPattern::new(r"\b(there was|we had) an? (incident|accident)\b", 0.85),
                IntentPattern::new(r"\bsomeone (got|was|is) (hurt|injured)\b", 0.85),
                IntentPattern::new(r"\b(incident|accident)\b", 0.7),
                IntentPattern::new(r"\binjur(y|ies|ed)\b", 0.7),
            ],
        },
        IntentRule {
            name: "safety_concern".to_string(),
            patterns: vec![
                IntentPattern::new(r"\bsafety (concern|issue|problem|hazard)\b", 0.9),
                IntentPattern::new(r"\b(raise|flag|submit) a concern\b", 0.85),
                IntentPattern::new(r"\bunsafe\b", 0.8),
                IntentPattern::new(r"\bhazard(ous)?\b", 0.75),
                IntentPattern::new(r"\bconcern(ed)? about\b", 0.7),
            ],
        },
        IntentRule {
            name: "sds_lookup".to_string(),
            patterns: vec![
                IntentPattern::new(r"\bsafety data sheet\b", 0.9),
                IntentPattern::new(r"\b(sds|msds)\b", 0.9),
                IntentPattern::new(r"\bchemical (info|information|sheet|data)\b", 0.8),
                IntentPattern::new(r"\blook up .*\bchemical\b", 0.75),
            ],
        },
        IntentRule {
            name: "help".to_string(),
            patterns: vec![
                IntentPattern::new(r"^\s*help\s*$", 0.9),
                IntentPattern::new(r"\bwhat can you do\b", 0.85),
                IntentPattern::new(r"\bhow do(es)? this work\b", 0.8),
                IntentPattern::new(r"\bshow .*\bmenu\b", 0.7),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntentsConfig::default();
        assert_eq!(config.fallback_intent, "general_inquiry");
        assert!((config.confidence_floor - 0.3).abs() < f32::EPSILON);
        assert!((config.switch_threshold - 0.6).abs() < f32::EPSILON);
        assert_eq!(
            config.intent_names(),
            vec!["incident_reporting", "safety_concern", "sds_lookup", "help"]
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_pattern_weight_default() {
        let pattern = IntentPattern {
            pattern: r"\btest\b".into(),
            weight: None,
        };
        assert!((pattern.effective_weight() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_yaml_deserialization() {
        let yaml = r#"
intents:
  - name: incident_reporting
    patterns:
      - pattern: "\\breport\\b"
        weight: 0.9
      - pattern: "\\baccident\\b"
fallback_intent: general_inquiry
confidence_floor: 0.3
switch_threshold: 0.6
"#;
        let config: IntentsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.intents.len(), 1);
        let rule = config.get_intent("incident_reporting").unwrap();
        assert_eq!(rule.patterns.len(), 2);
        assert_eq!(rule.patterns[1].weight, None);
    }

    #[test]
    fn test_validation_rejects_bad_threshold() {
        let config = IntentsConfig {
            switch_threshold: 0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
