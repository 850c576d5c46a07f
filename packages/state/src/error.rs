//! Error types for the state layer.
//!
//! Errors at this level describe a failed store call. Whether a key is
//! present or not is never an error here - that is answered by the bytes
//! returned from a successful read.

use thiserror::Error;

/// Failure of a call against the state store.
#[derive(Debug, Error)]
pub enum StateError {
    /// The store could not service the call (transport, peer, or disk).
    #[error("state store unavailable: {message}")]
    Unavailable { message: String },

    /// A key was rejected by the store before any work was done.
    #[error("invalid key {key:?}: {message}")]
    InvalidKey { key: String, message: String },

    /// The cursor was already released.
    #[error("iterator already closed")]
    Closed,

    /// Snapshot file could not be read or written.
    #[error("snapshot io error: {0}")]
    Snapshot(#[from] std::io::Error),

    /// Snapshot contents could not be (de)serialized.
    #[error("snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StateError {
    /// Shorthand for [`StateError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        StateError::Unavailable {
            message: message.into(),
        }
    }
}
