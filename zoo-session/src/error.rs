//! Error types for the session layer.

use thiserror::Error;
use zoo_core::error::ZooError;
use zoo_core::types::AnimalId;

/// Errors raised while running a play session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// An engine operation failed.
    #[error(transparent)]
    Core(#[from] ZooError),

    /// The animal exists but has not been unlocked yet.
    #[error("Animal is locked: {0}")]
    Locked(AnimalId),

    /// The animal's game tag is not in the catalogue.
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    /// The session was opened by a different zoo.
    #[error("Session {0} belongs to another zoo")]
    ForeignSession(u64),
}

impl SessionError {
    /// Whether this is an expected gameplay outcome rather than a fault.
    #[must_use]
    pub fn is_routine(&self) -> bool {
        match self {
            Self::Core(e) => e.is_routine(),
            Self::Locked(_) => true,
            Self::UnknownGame(_) | Self::ForeignSession(_) => false,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SessionError>;
