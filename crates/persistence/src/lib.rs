//! In-memory persistence for the intake engine
//!
//! Reference implementations of the `SessionStore` and `PersistenceSink`
//! seams. Sessions live in a concurrent map with no persistence across
//! restarts; eviction/expiry policy belongs to the surrounding system.

pub mod memory;

pub use memory::{InMemoryRecordSink, InMemorySessionStore};
