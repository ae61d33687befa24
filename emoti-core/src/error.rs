//! Error types for the EMOTI core library.

use thiserror::Error;

/// Top-level error type for all EMOTI operations.
#[derive(Error, Debug)]
pub enum PetError {
    /// Pet name failed validation at creation time.
    #[error("Invalid pet name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name (trimmed).
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A care-action label outside the `feed|clean|play|rest` vocabulary.
    #[error("Unknown care action: {0:?}")]
    UnknownAction(String),

    /// No pet exists for the session's user yet.
    #[error("No pet found for user: {0}")]
    PetNotFound(crate::UserId),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PetError>;
