//! Core types for the incident-intake engine
//!
//! This crate provides the foundational types shared across the workspace:
//! - Conversation session state and dialogue state machine variants
//! - Finished incident records and risk levels
//! - Response payloads returned to the surrounding application
//! - Collaborator traits (session store, persistence sink)
//! - Error types

pub mod error;
pub mod record;
pub mod response;
pub mod session;
pub mod traits;

pub use error::{Error, Result};
pub use record::{IncidentRecord, RiskLevel};
pub use response::{
    ActionTarget, AttachedFile, FileKind, ResponseAction, ResponseKind, ResponsePayload,
};
pub use session::{ConversationSession, DialogueState, HistoryEntry, SessionMode};
pub use traits::{PersistenceSink, SessionStore};
