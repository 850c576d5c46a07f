//! Error types for the record layer.

use donation_ledger_state::StateError;
use thiserror::Error;

/// Classification of an [`Error`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count or length.
    Arity,
    /// Wrong argument shape.
    Type,
    /// The store read call itself failed.
    Retrieval,
    /// The key is not present in the store.
    NotFound,
    /// Stored or response bytes could not be (de)serialized.
    Codec,
    /// A store write or delete call failed.
    Store,
}

/// The store interaction a wrapped failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for StoreAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreAction::Create => write!(f, "create"),
            StoreAction::Update => write!(f, "update"),
            StoreAction::Delete => write!(f, "delete"),
        }
    }
}

/// Errors raised while validating, decoding, or storing records.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid number of arguments. Expected {expected}, got {actual} in args: {values}.")]
    Arity {
        expected: usize,
        actual: usize,
        values: String,
    },

    #[error(
        "Invalid number of arguments. Expected length between {lower}-{upper}, got {actual} in args: {values}."
    )]
    ArityRange {
        lower: usize,
        upper: usize,
        actual: usize,
        values: String,
    },

    #[error("Number of elements in update request should be even, got {count}.")]
    UnevenPairs { count: usize },

    #[error("Invalid argument type. Expected {expected}, got {found}.")]
    Type { expected: &'static str, found: String },

    #[error("Failed to get state: {0}")]
    Retrieval(#[source] StateError),

    #[error("Donation data is absent OR no state registered.")]
    NotFound,

    #[error("Error parsing value to JSON: {text}. {message}")]
    Decode { text: String, message: String },

    #[error("Error serializing value to JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{0}")]
    State(#[from] StateError),

    /// A failure during a store interaction, naming the key involved.
    #[error("Failed to {action} state for Donation ID: {key}. Received {source}")]
    Store {
        action: StoreAction,
        key: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap `self` as a failure of `action` on `key`.
    pub fn in_store(self, action: StoreAction, key: impl Into<String>) -> Self {
        Error::Store {
            action,
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Kind of the original cause; wrappers are looked through.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Arity { .. } | Error::ArityRange { .. } | Error::UnevenPairs { .. } => {
                ErrorKind::Arity
            }
            Error::Type { .. } => ErrorKind::Type,
            Error::Retrieval(_) => ErrorKind::Retrieval,
            Error::NotFound => ErrorKind::NotFound,
            Error::Decode { .. } | Error::Encode(_) => ErrorKind::Codec,
            Error::State(_) => ErrorKind::Store,
            Error::Store { source, .. } => source.kind(),
        }
    }

    /// The innermost error, with every store wrapper removed.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Store { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error names the key it happened on.
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Error::Store { .. })
    }
}
