//! In-memory session store and record sink

use dashmap::DashMap;
use parking_lot::RwLock;

use ehs_intake_core::{
    ConversationSession, IncidentRecord, PersistenceSink, Result, SessionStore,
};

/// Session store backed by a concurrent map
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, ConversationSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop a session (external expiry policy hook)
    pub fn remove(&self, session_id: &str) -> Option<ConversationSession> {
        self.sessions.remove(session_id).map(|(_, session)| session)
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Result<Option<ConversationSession>> {
        Ok(self.sessions.get(session_id).map(|entry| entry.value().clone()))
    }

    fn put(&self, session: ConversationSession) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }
}

/// Record sink that appends to an in-memory list
#[derive(Default)]
pub struct InMemoryRecordSink {
    records: RwLock<Vec<IncidentRecord>>,
}

impl InMemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far
    pub fn records(&self) -> Vec<IncidentRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl PersistenceSink for InMemoryRecordSink {
    fn store(&self, record: &IncidentRecord) -> Result<String> {
        tracing::debug!(record_id = %record.id, incident_type = %record.incident_type, "storing record");
        self.records.write().push(record.clone());
        Ok(record.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use ehs_intake_core::RiskLevel;

    #[test]
    fn test_session_roundtrip() {
        let store = InMemorySessionStore::new();
        assert!(store.get("s1").unwrap().is_none());

        store.put(ConversationSession::new("s1")).unwrap();
        let session = store.get("s1").unwrap().unwrap();
        assert_eq!(session.id, "s1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_replaces_existing() {
        let store = InMemorySessionStore::new();
        let mut session = ConversationSession::new("s1");
        store.put(session.clone()).unwrap();

        session.record_slot("description", "spill");
        store.put(session).unwrap();

        let loaded = store.get("s1").unwrap().unwrap();
        assert_eq!(loaded.active_context.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sink_returns_record_id() {
        let sink = InMemoryRecordSink::new();
        let record = IncidentRecord::new("injury", HashMap::new(), RiskLevel::Medium);
        let id = sink.store(&record).unwrap();
        assert_eq!(id, record.id);
        assert_eq!(sink.len(), 1);
    }
}
