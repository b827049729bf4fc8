//! Store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while reading or writing the store.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreErrorKind {
    /// A caller-supplied argument was rejected (e.g. an unusable storage key).
    #[display("Invalid argument: {_0}")]
    InvalidArgument(String),
    /// Stored text did not parse as a valid game document.
    #[display("Malformed stored document: {_0}")]
    MalformedDocument(String),
    /// A document could not be serialized.
    #[display("Serialization failed: {_0}")]
    Serialization(String),
    /// The backing medium failed.
    #[display("I/O error: {_0}")]
    Io(String),
    /// A shared lock was poisoned by a panicking writer.
    #[display("Store lock poisoned during {_0}")]
    LockPoisoned(&'static str),
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", kind, file, line)]
pub struct StoreError {
    /// Error kind.
    pub kind: StoreErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: StoreErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an [`StoreErrorKind::InvalidArgument`] error.
    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::InvalidArgument(message.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &StoreErrorKind {
        &self.kind
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(StoreErrorKind::Io(err.to_string()))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(StoreErrorKind::Serialization(err.to_string()))
    }
}
