//! Identifier definitions for envelopes.

use std::borrow::Cow;

use crate::define_id;

// =============================================================================
// Generated IDs
// =============================================================================

define_id!(
    /// Identity of a command, minted when the command is constructed.
    CommandId,
    "cmd"
);

define_id!(
    /// Identity of a domain event, minted when the event is constructed.
    EventId,
    "evt"
);

// =============================================================================
// Aggregate IDs
// =============================================================================

/// Reserved aggregate id for an event that creates a new aggregate.
pub const INIT_AGGREGATE_ID: &str = "INIT_AGGREGATE_ID";

/// Identity of the aggregate (entity stream) an event belongs to.
///
/// Aggregate ids are supplied by the caller and are not parsed. The only
/// distinguished value is [`AggregateId::INIT`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateId(Cow<'static, str>);

impl AggregateId {
    /// The sentinel used before an aggregate has an id of its own.
    pub const INIT: Self = Self(Cow::Borrowed(INIT_AGGREGATE_ID));

    /// Wraps a caller-chosen aggregate id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the [`INIT_AGGREGATE_ID`] sentinel.
    #[must_use]
    pub fn is_init(&self) -> bool {
        self.0 == INIT_AGGREGATE_ID
    }
}

impl std::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AggregateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AggregateId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for AggregateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for AggregateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AggregateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl serde::Serialize for AggregateId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for AggregateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s))
    }
}

// =============================================================================
// Tests
// =============================================================================
