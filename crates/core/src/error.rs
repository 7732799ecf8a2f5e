//! Error types shared across the intake engine

use thiserror::Error;

/// Errors surfaced by the intake core and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    #[error("Session store error: {0}")]
    Session(String),

    #[error("Persistence sink error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
