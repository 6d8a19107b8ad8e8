//! Error types for envelope handling.

use herald_id::IdError;
use thiserror::Error;

/// Errors that can occur when handling envelopes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// No handler and no default were registered for the event's tag.
    #[error("unhandled domain event tag: {0}")]
    UnhandledTag(String),

    /// A record carried an id that does not parse.
    #[error("invalid id: {0}")]
    InvalidId(#[from] IdError),

    /// A record carried a `createdAt` that is not an RFC 3339 timestamp.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl EnvelopeError {
    /// Returns the tag if this is an unhandled-tag error.
    pub fn unhandled_tag(&self) -> Option<&str> {
        match self {
            EnvelopeError::UnhandledTag(tag) => Some(tag),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        EnvelopeError::Serialization(err.to_string())
    }
}
