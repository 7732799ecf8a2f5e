//! Pattern-based intent classification
//!
//! Maps an utterance to (intent, confidence) using weighted regular
//! expressions compiled once at engine construction. Pure function of the
//! input text: identical input always yields identical output.

use regex::Regex;
use serde::{Deserialize, Serialize};

use ehs_intake_config::IntentsConfig;

use crate::EngineError;

/// Boost added per hitting pattern beyond the first
const HIT_BOOST: f32 = 0.1;
/// Ceiling on any intent score
const SCORE_CAP: f32 = 0.95;

/// Classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: String,
    /// Always >= the configured floor
    pub confidence: f32,
}

struct CompiledRule {
    name: String,
    patterns: Vec<(Regex, f32)>,
}

/// Intent classifier over compiled weighted patterns
pub struct PatternClassifier {
    rules: Vec<CompiledRule>,
    fallback_intent: String,
    confidence_floor: f32,
    switch_threshold: f32,
}

impl PatternClassifier {
    /// Compile the configured rules. Invalid regexes are rejected here so
    /// classification itself can never fail.
    pub fn new(config: &IntentsConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut rules = Vec::with_capacity(config.intents.len());
        for rule in &config.intents {
            let mut patterns = Vec::with_capacity(rule.patterns.len());
            for pattern in &rule.patterns {
                let regex = Regex::new(&pattern.pattern).map_err(|e| {
                    EngineError::Config(format!(
                        "invalid pattern for intent '{}': {}",
                        rule.name, e
                    ))
                })?;
                patterns.push((regex, pattern.effective_weight()));
            }
            rules.push(CompiledRule {
                name: rule.name.clone(),
                patterns,
            });
        }

        tracing::debug!(intents = rules.len(), "compiled intent rules");

        Ok(Self {
            rules,
            fallback_intent: config.fallback_intent.clone(),
            confidence_floor: config.confidence_floor,
            switch_threshold: config.switch_threshold,
        })
    }

    /// Classify an utterance.
    ///
    /// Each intent scores the maximum weight among its hitting patterns,
    /// boosted by 0.1 per additional hit, capped at 0.95. The highest score
    /// wins; ties go to the first-declared intent. Scores below the floor
    /// collapse to the fallback intent at exactly the floor, so empty or
    /// unmatched input still yields a defined, non-zero confidence.
    pub fn classify(&self, text: &str) -> Classification {
        let text = text.trim().to_lowercase();

        let mut best: Option<(&str, f32)> = None;
        for rule in &self.rules {
            let score = Self::score_rule(rule, &text);
            // Strict comparison keeps the first-declared intent on ties
            if score > best.map(|(_, s)| s).unwrap_or(0.0) {
                best = Some((rule.name.as_str(), score));
            }
        }

        match best {
            Some((intent, score)) if score >= self.confidence_floor => Classification {
                intent: intent.to_string(),
                confidence: score,
            },
            _ => Classification {
                intent: self.fallback_intent.clone(),
                confidence: self.confidence_floor,
            },
        }
    }

    fn score_rule(rule: &CompiledRule, text: &str) -> f32 {
        let mut max_weight: f32 = 0.0;
        let mut hits = 0u32;

        for (regex, weight) in &rule.patterns {
            if regex.is_match(text) {
                hits += 1;
                max_weight = max_weight.max(*weight);
            }
        }

        if hits == 0 {
            return 0.0;
        }

        let boosted = max_weight + HIT_BOOST * (hits - 1) as f32;
        boosted.min(SCORE_CAP)
    }

    /// Confidence the dialogue manager requires before acting on a
    /// classification
    pub fn switch_threshold(&self) -> f32 {
        self.switch_threshold
    }

    /// Sentinel intent returned when nothing matches
    pub fn fallback_intent(&self) -> &str {
        &self.fallback_intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ehs_intake_config::{IntentPattern, IntentRule};

    fn classifier() -> PatternClassifier {
        PatternClassifier::new(&IntentsConfig::default()).unwrap()
    }

    #[test]
    fn test_incident_reporting_detected() {
        let result = classifier().classify("I need to report a workplace injury");
        assert_eq!(result.intent, "incident_reporting");
        assert!(result.confidence > 0.6);
    }

    #[test]
    fn test_no_match_falls_back_to_floor() {
        let result = classifier().classify("fell off ladder");
        assert_eq!(result.intent, "general_inquiry");
        assert!((result.confidence - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_text_is_general_inquiry() {
        let result = classifier().classify("   ");
        assert_eq!(result.intent, "general_inquiry");
        assert!((result.confidence - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_confidence_never_below_floor() {
        let c = classifier();
        for text in ["", "xyzzy", "warehouse B", "Jane Doe", "left wrist"] {
            assert!(c.classify(text).confidence >= 0.3, "floor violated for {text:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        let c = classifier();
        let a = c.classify("there is a safety hazard near the dock");
        let b = c.classify("there is a safety hazard near the dock");
        assert_eq!(a, b);
    }

    #[test]
    fn test_multi_hit_boost_capped() {
        // Several incident_reporting patterns hit: max 0.9 plus boosts, capped
        let result = classifier().classify("I want to report a workplace injury accident");
        assert_eq!(result.intent, "incident_reporting");
        assert!((result.confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_tie_broken_by_declaration_order() {
        let config = IntentsConfig {
            intents: vec![
                IntentRule {
                    name: "first".into(),
                    patterns: vec![IntentPattern::new(r"\bword\b", 0.8)],
                },
                IntentRule {
                    name: "second".into(),
                    patterns: vec![IntentPattern::new(r"\bword\b", 0.8)],
                },
            ],
            ..Default::default()
        };
        let c = PatternClassifier::new(&config).unwrap();
        let result = c.classify("a word");
        assert_eq!(result.intent, "first");
    }

    #[test]
    fn test_default_weight_applied() {
        let config = IntentsConfig {
            intents: vec![IntentRule {
                name: "unweighted".into(),
                patterns: vec![IntentPattern {
                    pattern: r"\bthing\b".into(),
                    weight: None,
                }],
            }],
            ..Default::default()
        };
        let c = PatternClassifier::new(&config).unwrap();
        let result = c.classify("the thing");
        assert_eq!(result.intent, "unweighted");
        assert!((result.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_regex_rejected_at_construction() {
        let config = IntentsConfig {
            intents: vec![IntentRule {
                name: "broken".into(),
                patterns: vec![IntentPattern::new(r"(unclosed", 0.8)],
            }],
            ..Default::default()
        };
        assert!(PatternClassifier::new(&config).is_err());
    }
}
