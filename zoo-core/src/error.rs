//! Error types for the zoo core library.

use thiserror::Error;

use crate::types::AnimalId;

/// Top-level error type for all zoo engine operations.
#[derive(Error, Debug)]
pub enum ZooError {
    /// No animal with the given ID exists in the registry.
    #[error("Animal not found: {0}")]
    AnimalNotFound(AnimalId),

    /// Unlock purchase attempted without enough stars.
    #[error("Insufficient stars: cost {cost}, balance {balance}")]
    InsufficientFunds {
        /// Price of the unlock.
        cost: u32,
        /// Balance at the time of the attempt.
        balance: u32,
    },

    /// The animal is already unlocked.
    #[error("Animal already unlocked: {0}")]
    AlreadyUnlocked(AnimalId),

    /// Content catalogue was malformed.
    #[error("Content error: {0}")]
    Content(String),

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

impl ZooError {
    /// Whether this is an expected gameplay outcome rather than a fault.
    ///
    /// Hosts render these as disabled or no-op actions instead of errors.
    #[must_use]
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. } | Self::AlreadyUnlocked(_)
        )
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, ZooError>;
