//! DomainError envelope - a tagged failure.
//!
//! [`to_domain_error`] is the boundary for turning whatever a call site
//! caught into a `DomainError`:
//!
//! ```
//! use herald_domain::{to_domain_error, DomainError};
//!
//! fn load(path: &str) -> Result<String, DomainError> {
//!     std::fs::read_to_string(path).map_err(to_domain_error("LoadFailed"))
//! }
//!
//! let err = load("/definitely/not/here").unwrap_err();
//! assert!(err.is("LoadFailed"));
//! ```

use std::any::Any;
use std::borrow::Cow;

use chrono::{DateTime, Utc};
use herald_id::IdError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::render::{self, RenderOptions};
use crate::{EnvelopeError, Tagged};

/// A tagged, human-readable failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    tag: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl DomainError {
    /// Creates a domain error stamped with the current time.
    #[must_use]
    pub fn new(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
            created_at: render::now(),
        }
    }

    /// Normalizes a caught value into a domain error tagged `tag`.
    ///
    /// Never fails. See [`IntoDomainMessage`] for how each shape becomes a
    /// message; an existing `DomainError` keeps its message and takes the
    /// new tag.
    #[must_use]
    pub fn from_caught(tag: impl Into<String>, caught: impl IntoDomainMessage) -> Self {
        Self::new(tag, caught.into_domain_message())
    }

    /// A new error with the same message under a different tag.
    #[must_use]
    pub fn retag(&self, tag: impl Into<String>) -> Self {
        Self::new(tag, self.message.clone())
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Exact, case-sensitive tag comparison.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Renders `<timestamp> :: <tag> :: <message>`.
    ///
    /// `Display` prints only the message; use this for the log line.
    pub fn render(&self, opts: &RenderOptions) -> String {
        format!(
            "{} :: {} :: {}",
            render::format_timestamp(&self.created_at),
            opts.pad_tag(&self.tag),
            self.message,
        )
    }

    /// Projects the error onto its wire record.
    pub fn to_record(&self) -> DomainErrorRecord {
        DomainErrorRecord {
            tag: self.tag.clone(),
            message: self.message.clone(),
            created_at: render::format_timestamp(&self.created_at),
        }
    }
}

impl Tagged for DomainError {
    fn tag(&self) -> &str {
        &self.tag
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DomainError {}

/// Returns an adapter that normalizes any caught value into a
/// [`DomainError`] tagged `tag`. Intended for `Result::map_err`.
pub fn to_domain_error<E>(tag: impl Into<String>) -> impl Fn(E) -> DomainError
where
    E: IntoDomainMessage,
{
    let tag = tag.into();
    move |caught| DomainError::from_caught(tag.clone(), caught)
}

/// Plain serializable form of a [`DomainError`].
///
/// JSON shape: `{"tag", "message", "createdAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainErrorRecord {
    pub tag: String,
    pub message: String,
    pub created_at: String,
}

impl TryFrom<DomainErrorRecord> for DomainError {
    type Error = EnvelopeError;

    fn try_from(record: DomainErrorRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: render::parse_timestamp(&record.created_at)?,
            tag: record.tag,
            message: record.message,
        })
    }
}

impl Serialize for DomainError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DomainError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = DomainErrorRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Caught-value normalization
// =============================================================================

/// Best available message for a caught value.
///
/// - strings are used verbatim
/// - a `DomainError` contributes its message (also when wrapped in
///   `anyhow::Error`, a boxed error or another error's `Display`)
/// - error types contribute their `Display` text; any error type not listed
///   here goes through `&(dyn Error + 'static)`
/// - JSON values of unknown shape use a string value verbatim, then an
///   object's string `message` field, then the JSON text
/// - panic payloads use the panic message when it is a string
pub trait IntoDomainMessage {
    fn into_domain_message(self) -> String;
}

/// Message used for a panic payload that is not a string.
const OPAQUE_PANIC_MESSAGE: &str = "Box<dyn Any>";

impl IntoDomainMessage for String {
    fn into_domain_message(self) -> String {
        self
    }
}

impl IntoDomainMessage for &str {
    fn into_domain_message(self) -> String {
        self.to_string()
    }
}

impl IntoDomainMessage for Cow<'_, str> {
    fn into_domain_message(self) -> String {
        self.into_owned()
    }
}

impl IntoDomainMessage for DomainError {
    fn into_domain_message(self) -> String {
        self.message
    }
}

impl IntoDomainMessage for &DomainError {
    fn into_domain_message(self) -> String {
        self.message.clone()
    }
}

impl IntoDomainMessage for anyhow::Error {
    fn into_domain_message(self) -> String {
        match self.downcast::<DomainError>() {
            Ok(domain) => domain.message,
            Err(other) => other.to_string(),
        }
    }
}

impl IntoDomainMessage for &(dyn std::error::Error + 'static) {
    fn into_domain_message(self) -> String {
        match self.downcast_ref::<DomainError>() {
            Some(domain) => domain.message.clone(),
            None => self.to_string(),
        }
    }
}

macro_rules! boxed_error_message {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoDomainMessage for $ty {
                fn into_domain_message(self) -> String {
                    match self.downcast::<DomainError>() {
                        Ok(domain) => domain.message,
                        Err(other) => other.to_string(),
                    }
                }
            }
        )*
    };
}

boxed_error_message!(
    Box<dyn std::error::Error>,
    Box<dyn std::error::Error + Send>,
    Box<dyn std::error::Error + Send + Sync>,
);

impl IntoDomainMessage for serde_json::Value {
    fn into_domain_message(self) -> String {
        use serde_json::Value;

        match self {
            Value::String(s) => s,
            Value::Object(ref map) => match map.get("message") {
                Some(Value::String(message)) => message.clone(),
                _ => self.to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl IntoDomainMessage for Box<dyn Any + Send> {
    fn into_domain_message(self) -> String {
        match self.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => message.to_string(),
                Err(_) => OPAQUE_PANIC_MESSAGE.to_string(),
            },
        }
    }
}

macro_rules! display_message {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoDomainMessage for $ty {
                fn into_domain_message(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_message!(
    EnvelopeError,
    IdError,
    std::io::Error,
    serde_json::Error,
    chrono::ParseError,
    std::num::ParseIntError,
    std::fmt::Error,
);
