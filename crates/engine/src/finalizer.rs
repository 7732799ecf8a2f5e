//! Record finalization and local risk scoring
//!
//! Once all slots are filled, the finalizer derives a coarse risk label from
//! the collected text and emits the finished record. Deterministic and
//! rule-based; no learning. Each invocation produces a record with a fresh
//! id and timestamp, so it must not be called twice for one logical intake.

use std::collections::HashMap;

use ehs_intake_config::{RiskConfig, SlotSchemaConfig};
use ehs_intake_core::{IncidentRecord, RiskLevel};

/// Builds finished records from collected slot values
pub struct RecordFinalizer {
    risk: RiskConfig,
}

impl RecordFinalizer {
    pub fn new(risk: RiskConfig) -> Self {
        Self { risk }
    }

    /// Assemble a record with a generated id, current timestamp, and a
    /// scored risk level.
    pub fn finalize(
        &self,
        incident_type: &str,
        collected_slots: HashMap<String, String>,
        registry: &SlotSchemaConfig,
    ) -> IncidentRecord {
        let risk_level = self.score_risk(incident_type, &collected_slots, registry);
        let record = IncidentRecord::new(incident_type, collected_slots, risk_level);

        tracing::info!(
            record_id = %record.id,
            incident_type,
            risk = %record.risk_level,
            "finalized incident record"
        );

        record
    }

    /// Scan the description and severity slots for risk keywords.
    /// High keywords short-circuit; otherwise low keywords; otherwise the
    /// per-type default from the registry.
    fn score_risk(
        &self,
        incident_type: &str,
        slots: &HashMap<String, String>,
        registry: &SlotSchemaConfig,
    ) -> RiskLevel {
        let text = format!(
            "{} {}",
            slots.get("description").map(String::as_str).unwrap_or(""),
            slots.get("severity").map(String::as_str).unwrap_or(""),
        )
        .to_lowercase();

        if self.risk.high_keywords.iter().any(|k| text.contains(k.as_str())) {
            return RiskLevel::High;
        }
        if self.risk.low_keywords.iter().any(|k| text.contains(k.as_str())) {
            return RiskLevel::Low;
        }
        registry.default_risk(incident_type)
    }
}

impl Default for RecordFinalizer {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_high_keyword_short_circuits() {
        let finalizer = RecordFinalizer::default();
        let registry = SlotSchemaConfig::default();
        // "minor" also present, but high wins
        let record = finalizer.finalize(
            "injury",
            slots(&[
                ("description", "severe cut, taken to hospital"),
                ("severity", "minor at first glance"),
            ]),
            &registry,
        );
        assert_eq!(record.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_low_keywords() {
        let finalizer = RecordFinalizer::default();
        let registry = SlotSchemaConfig::default();
        let record = finalizer.finalize(
            "injury",
            slots(&[("description", "small scrape"), ("severity", "first aid only")]),
            &registry,
        );
        assert_eq!(record.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_type_default_when_no_keywords() {
        let finalizer = RecordFinalizer::default();
        let registry = SlotSchemaConfig::default();

        let injury = finalizer.finalize(
            "injury",
            slots(&[("description", "fell off ladder"), ("severity", "required ER visit")]),
            &registry,
        );
        assert_eq!(injury.risk_level, RiskLevel::Medium);

        let near_miss = finalizer.finalize(
            "near_miss",
            slots(&[("description", "pallet nearly tipped")]),
            &registry,
        );
        assert_eq!(near_miss.risk_level, RiskLevel::Low);

        let unknown = finalizer.finalize("mystery", slots(&[]), &registry);
        assert_eq!(unknown.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_missing_slots_treated_as_empty() {
        let finalizer = RecordFinalizer::default();
        let registry = SlotSchemaConfig::default();
        let record = finalizer.finalize("property", slots(&[]), &registry);
        assert_eq!(record.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_refinalize_gets_new_identity() {
        let finalizer = RecordFinalizer::default();
        let registry = SlotSchemaConfig::default();
        let answers = slots(&[("description", "spill near dock")]);
        let a = finalizer.finalize("environmental", answers.clone(), &registry);
        let b = finalizer.finalize("environmental", answers, &registry);
        assert_ne!(a.id, b.id);
    }
}
