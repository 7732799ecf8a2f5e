//! Slot schema registry
//!
//! Static tables mapping incident types to their ordered required slots,
//! slot names to prompt text, and incident types to type-selection keywords
//! and default risk levels. Slot order is declaration order, which is the
//! order questions are asked in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use ehs_intake_core::RiskLevel;

use crate::ConfigError;

/// Slot names used by the generic fallback schema
const GENERIC_SLOTS: [&str; 2] = ["description", "location"];

/// Slot schemas, prompts, type keywords, and risk defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSchemaConfig {
    /// Incident type -> ordered slot names. A `Vec` of pairs rather than a
    /// map so declaration order survives deserialization.
    #[serde(default)]
    pub schemas: Vec<(String, Vec<String>)>,
    /// Slot name -> prompt text, shared across incident types
    #[serde(default)]
    pub prompts: HashMap<String, String>,
    /// Incident type -> keywords recognized during type selection,
    /// checked in declaration order
    #[serde(default)]
    pub type_keywords: Vec<(String, Vec<String>)>,
    /// Incident type -> risk level used when no risk keyword matches
    #[serde(default)]
    pub risk_defaults: HashMap<String, RiskLevel>,
}

impl Default for SlotSchemaConfig {
    fn default() -> Self {
        Self {
            schemas: builtin_schemas(),
            prompts: builtin_prompts(),
            type_keywords: builtin_type_keywords(),
            risk_defaults: builtin_risk_defaults(),
        }
    }
}

impl SlotSchemaConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        crate::load_yaml(path)
    }

    /// Every declared schema must have at least one slot; the dialogue
    /// manager always asks the first question of a started intake.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, slots) in &self.schemas {
            if slots.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("schemas.{name}"),
                    message: "schema declares no slots".into(),
                });
            }
        }
        Ok(())
    }

    /// Ordered slot names for an incident type.
    ///
    /// Unknown types fall back to the generic two-slot schema rather than
    /// failing; schema drift is not an error.
    pub fn slots_for(&self, incident_type: &str) -> Vec<String> {
        self.schemas
            .iter()
            .find(|(name, _)| name == incident_type)
            .map(|(_, slots)| slots.clone())
            .unwrap_or_else(|| {
                tracing::debug!(incident_type, "unknown incident type, using generic schema");
                GENERIC_SLOTS.iter().map(|s| s.to_string()).collect()
            })
    }

    /// Prompt text for a slot. Unknown slots get a generated prompt
    /// interpolating the humanized slot name.
    pub fn prompt_for(&self, slot: &str) -> String {
        self.prompts.get(slot).cloned().unwrap_or_else(|| {
            format!("Please provide the {}.", slot.replace('_', " "))
        })
    }

    /// Match free text against the type-selection keyword sets, in
    /// declaration order. Returns the first incident type with a hit.
    pub fn match_incident_type(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.type_keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|(name, _)| name.as_str())
    }

    /// All incident types that have a declared schema
    pub fn incident_types(&self) -> Vec<&str> {
        self.schemas.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Default risk level for an incident type; unknown types are `Medium`
    pub fn default_risk(&self, incident_type: &str) -> RiskLevel {
        self.risk_defaults
            .get(incident_type)
            .copied()
            .unwrap_or(RiskLevel::Medium)
    }

    /// Menu text listing the selectable incident types
    pub fn type_selection_menu(&self) -> String {
        let mut lines = vec![
            "What type of incident would you like to report?".to_string(),
        ];
        for (name, _) in &self.type_keywords {
            lines.push(format!("- {}", name.replace('_', " ")));
        }
        lines.join("\n")
    }
}

fn builtin_schemas() -> Vec<(String, Vec<String>)> {
    fn schema(name: &str, slots: &[&str]) -> (String, Vec<String>) {
        (
            name.to_string(),
            slots.iter().map(|s| s.to_string()).collect(),
        )
    }

    vec![
        schema(
            "injury",
            &[
                "description",
                "location",
                "injured_person",
                "injury_nature",
                "body_part",
                "severity",
            ],
        ),
        schema(
            "environmental",
            &["description", "location", "material", "quantity", "containment"],
        ),
        schema(
            "vehicle",
            &["description", "location", "vehicles_involved", "injuries", "damage"],
        ),
        schema("near_miss", &["description", "location", "potential_outcome"]),
        schema(
            "property",
            &["description", "location", "damage_description", "estimated_cost"],
        ),
        schema("safety_concern", &["description", "location", "suggestion"]),
    ]
}

fn builtin_prompts() -> HashMap<String, String> {
    [
        ("description", "Please describe what happened."),
        ("location", "Where did this occur?"),
        ("injured_person", "Who was injured? Please provide their name."),
        ("injury_nature", "What is the nature of the injury?"),
        ("body_part", "Which body part was affected?"),
        (
            "severity",
            "How severe is the injury, and what treatment was required?",
        ),
        ("material", "What material or substance was involved?"),
        ("quantity", "Roughly how much was released or spilled?"),
        ("containment", "Has the release been contained? What was done?"),
        ("vehicles_involved", "Which vehicles were involved?"),
        ("injuries", "Was anyone injured? If so, describe the injuries."),
        ("damage", "Describe the damage to the vehicles or surroundings."),
        (
            "potential_outcome",
            "What could have happened if conditions were slightly different?",
        ),
        ("damage_description", "Describe the property damage."),
        ("estimated_cost", "What is the estimated cost of the damage?"),
        (
            "suggestion",
            "Do you have a suggestion for addressing this concern?",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn builtin_type_keywords() -> Vec<(String, Vec<String>)> {
    fn keywords(name: &str, words: &[&str]) -> (String, Vec<String>) {
        (
            name.to_string(),
            words.iter().map(|w| w.to_string()).collect(),
        )
    }

    vec![
        keywords("injury", &["injury", "injured", "hurt", "medical"]),
        keywords(
            "environmental",
            &["environment", "spill", "release", "leak", "contamination"],
        ),
        keywords("vehicle", &["vehicle", "car", "truck", "forklift", "collision"]),
        keywords("near_miss", &["near miss", "near-miss", "close call", "almost"]),
        keywords("property", &["property", "equipment", "damage", "broken"]),
    ]
}

fn builtin_risk_defaults() -> HashMap<String, RiskLevel> {
    [
        ("injury", RiskLevel::Medium),
        ("environmental", RiskLevel::Medium),
        ("vehicle", RiskLevel::Medium),
        ("near_miss", RiskLevel::Low),
        ("property", RiskLevel::Low),
        ("safety_concern", RiskLevel::Low),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
