//! Conversational intake engine
//!
//! Features:
//! - Emergency pre-filter (recall-biased keyword match)
//! - Weighted regular-expression intent classification
//! - Slot-filling dialogue state machine over per-session state
//! - Record finalization with a rule-based local risk scorer
//!
//! The engine is a library-level component: it owns no wire protocol and is
//! invoked synchronously by the surrounding application, one message at a
//! time per session.

pub mod classifier;
pub mod dialogue;
pub mod emergency;
pub mod engine;
pub mod finalizer;

pub use classifier::{Classification, PatternClassifier};
pub use dialogue::intent_target_mode;
pub use emergency::EmergencyDetector;
pub use engine::{EngineConfig, IntakeEngine};
pub use finalizer::RecordFinalizer;

use thiserror::Error;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    Session(String),
}

impl From<ehs_intake_config::ConfigError> for EngineError {
    fn from(err: ehs_intake_config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

impl From<ehs_intake_core::Error> for EngineError {
    fn from(err: ehs_intake_core::Error) -> Self {
        match err {
            ehs_intake_core::Error::Config(msg) => EngineError::Config(msg),
            ehs_intake_core::Error::Session(msg) => EngineError::Session(msg),
            // Sink failures are handled in-band as degraded responses; one
            // reaching here means a store implementation misused the error.
            ehs_intake_core::Error::Persistence(msg) => EngineError::Session(msg),
        }
    }
}
