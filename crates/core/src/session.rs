//! Conversation session state
//!
//! One `ConversationSession` exists per user/session id. Each inbound message
//! in the surrounding application is a stateless call, so the session carries
//! everything the dialogue manager needs between turns: the coarse mode, the
//! dialogue state machine variant, collected slot values, and a bounded
//! history of recent exchanges.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse conversation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Open-ended conversation, no intake in progress
    #[default]
    General,
    /// Incident intake (type selection or slot filling)
    IncidentIntake,
    /// Safety-concern intake (slot filling, fixed schema)
    SafetyConcernIntake,
    /// SDS library lookup
    SdsLookup,
}

impl SessionMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionMode::General => "General",
            SessionMode::IncidentIntake => "Incident Intake",
            SessionMode::SafetyConcernIntake => "Safety Concern Intake",
            SessionMode::SdsLookup => "SDS Lookup",
        }
    }
}

/// Dialogue state machine variant
///
/// `SlotFilling` carries the seeded slot list so the pending index is always
/// interpreted against the schema that was active when the intake started,
/// even if the registry is reconfigured between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    General,
    IncidentTypeSelection,
    SlotFilling {
        incident_type: String,
        slots: Vec<String>,
        pending_index: usize,
    },
    Terminal {
        record_id: String,
    },
}

impl DialogueState {
    /// True while an intake is collecting answers
    pub fn is_slot_filling(&self) -> bool {
        matches!(self, DialogueState::SlotFilling { .. })
    }
}

/// One user/bot exchange retained in session history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user_text: String,
    pub bot_text: String,
    /// Intent classified for this turn, if classification ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
        intent: Option<String>,
    ) -> Self {
        Self {
            user_text: user_text.into(),
            bot_text: bot_text.into(),
            intent,
            timestamp: Utc::now(),
        }
    }
}

/// Per-conversation state, keyed by an opaque session id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Opaque session identifier supplied by the caller
    pub id: String,
    /// Current coarse mode
    pub mode: SessionMode,
    /// Dialogue state machine variant
    pub state: DialogueState,
    /// Slot name -> collected value; only populated during an intake.
    /// Keys are always a subset of the slots declared for the active
    /// incident type.
    pub active_context: HashMap<String, String>,
    /// Bounded ring buffer of recent exchanges, oldest evicted first
    pub history: VecDeque<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ConversationSession {
    /// Create a fresh session in `General` mode
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            mode: SessionMode::General,
            state: DialogueState::General,
            active_context: HashMap::new(),
            history: VecDeque::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Append one exchange, truncating texts to `text_limit` chars and
    /// evicting the oldest entries beyond `limit`.
    pub fn push_history(&mut self, mut entry: HistoryEntry, limit: usize, text_limit: usize) {
        entry.user_text = truncate_chars(&entry.user_text, text_limit);
        entry.bot_text = truncate_chars(&entry.bot_text, text_limit);

        self.history.push_back(entry);
        while self.history.len() > limit {
            self.history.pop_front();
        }
        self.last_activity = Utc::now();
    }

    /// Discard any in-progress intake. Mode switches are destructive by
    /// design: partially collected slot values are not recoverable.
    pub fn reset_intake(&mut self) {
        self.active_context.clear();
        self.state = DialogueState::General;
    }

    /// Store a slot answer collected during slot filling
    pub fn record_slot(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        self.active_context.insert(slot.into(), value.into());
    }
}

/// Truncate to at most `limit` chars on a char boundary
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = ConversationSession::new("s1");
        assert_eq!(session.mode, SessionMode::General);
        assert_eq!(session.state, DialogueState::General);
        assert!(session.active_context.is_empty());
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_history_eviction() {
        let mut session = ConversationSession::new("s1");
        for i in 0..25 {
            session.push_history(
                HistoryEntry::new(format!("msg {i}"), "ok", None),
                20,
                200,
            );
        }
        assert_eq!(session.history.len(), 20);
        // Oldest five evicted, most recent retained in order
        assert_eq!(session.history.front().unwrap().user_text, "msg 5");
        assert_eq!(session.history.back().unwrap().user_text, "msg 24");
    }

    #[test]
    fn test_history_truncation() {
        let mut session = ConversationSession::new("s1");
        let long = "x".repeat(500);
        session.push_history(HistoryEntry::new(long.clone(), long, None), 20, 200);
        let entry = session.history.front().unwrap();
        assert_eq!(entry.user_text.chars().count(), 200);
        assert_eq!(entry.bot_text.chars().count(), 200);
    }

    #[test]
    fn test_reset_intake_clears_context() {
        let mut session = ConversationSession::new("s1");
        session.state = DialogueState::SlotFilling {
            incident_type: "injury".into(),
            slots: vec!["description".into()],
            pending_index: 1,
        };
        session.record_slot("description", "fell off ladder");

        session.reset_intake();

        assert_eq!(session.state, DialogueState::General);
        assert!(session.active_context.is_empty());
    }

    #[test]
    fn test_dialogue_state_serde_roundtrip() {
        let state = DialogueState::SlotFilling {
            incident_type: "injury".into(),
            slots: vec!["description".into(), "location".into()],
            pending_index: 1,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("slot_filling"));
        let back: DialogueState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
