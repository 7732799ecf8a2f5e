//! Collaborator traits
//!
//! The engine talks to the surrounding application through two narrow seams:
//! a session store holding per-conversation state between stateless calls,
//! and a persistence sink that accepts finished records.
//!
//! Both traits are synchronous: message processing runs to completion on the
//! calling thread and never suspends mid-turn. Callers are responsible for
//! serializing concurrent messages for the same session id.

use crate::error::Result;
use crate::record::IncidentRecord;
use crate::session::ConversationSession;

/// Holds per-conversation state between turns
pub trait SessionStore: Send + Sync {
    /// Fetch a session by id, if one exists
    fn get(&self, session_id: &str) -> Result<Option<ConversationSession>>;

    /// Store (create or replace) a session keyed by its id
    fn put(&self, session: ConversationSession) -> Result<()>;
}

/// Accepts finished incident records
pub trait PersistenceSink: Send + Sync {
    /// Store a record and return its identifier.
    ///
    /// Called exactly once per finalization attempt. A failure leaves the
    /// session in slot filling so the intake can be retried; it never
    /// terminates the conversation.
    fn store(&self, record: &IncidentRecord) -> Result<String>;
}
