//! Emergency pre-filter
//!
//! Runs before everything else on every inbound message. Any hit, however
//! weak, triggers the emergency branch; no false-negative tolerance is
//! attempted. Session mode and slot progress are left untouched so a later
//! message resumes the interrupted flow.

use ehs_intake_config::EmergencyConfig;

/// Case-insensitive keyword pre-filter
pub struct EmergencyDetector {
    keywords: Vec<String>,
    contacts_message: String,
}

impl EmergencyDetector {
    pub fn new(config: &EmergencyConfig) -> Self {
        Self {
            keywords: config
                .keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            contacts_message: config.contacts_message.clone(),
        }
    }

    /// Pure substring check against the configured keyword set
    pub fn is_emergency(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// Fixed emergency-contacts response text
    pub fn contacts_message(&self) -> &str {
        &self.contacts_message
    }
}

impl Default for EmergencyDetector {
    fn default() -> Self {
        Self::new(&EmergencyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_hit() {
        let detector = EmergencyDetector::default();
        assert!(detector.is_emergency("someone is unconscious in the warehouse"));
        assert!(detector.is_emergency("call 911"));
        assert!(detector.is_emergency("there's a FIRE in the lab"));
    }

    #[test]
    fn test_case_insensitive() {
        let detector = EmergencyDetector::default();
        assert!(detector.is_emergency("HE IS BLEEDING BADLY"));
        assert!(detector.is_emergency("Not Breathing"));
    }

    #[test]
    fn test_non_emergency_text() {
        let detector = EmergencyDetector::default();
        assert!(!detector.is_emergency("I need to report a workplace injury"));
        assert!(!detector.is_emergency("fell off ladder"));
        assert!(!detector.is_emergency(""));
    }
}
