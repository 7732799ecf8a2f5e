//! Finished incident records

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse risk label derived from collected text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A validated, structured incident record
///
/// Immutable once emitted; ownership passes to the persistence sink.
/// Each finalization produces a fresh id and timestamp, so re-finalizing the
/// same answers yields a distinct record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Generated identifier (uuid v4)
    pub id: String,
    /// Incident type the intake was run for
    pub incident_type: String,
    /// Slot name -> raw answer text, exactly as the user provided it
    pub collected_slots: HashMap<String, String>,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}

impl IncidentRecord {
    pub fn new(
        incident_type: impl Into<String>,
        collected_slots: HashMap<String, String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            incident_type: incident_type.into(),
            collected_slots,
            risk_level,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_get_distinct_ids() {
        let a = IncidentRecord::new("injury", HashMap::new(), RiskLevel::Medium);
        let b = IncidentRecord::new("injury", HashMap::new(), RiskLevel::Medium);
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_risk_level_serde() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
