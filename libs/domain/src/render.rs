//! Human-readable rendering and timestamp formatting shared by all envelopes.
//!
//! Rendered lines are columnar, `::`-separated, and meant for logs:
//!
//! ```text
//! 2024-05-01T12:00:00.123Z :: PlaceOrder   :: cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D => {"sku":"A-1"}
//! ```
//!
//! Rendering never fails. A payload that cannot be serialized is replaced by
//! [`UNSERIALIZABLE_PLACEHOLDER`] (or the configured placeholder).

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serialize;

use crate::EnvelopeError;

/// Default column width the tag is padded to.
pub const DEFAULT_TAG_WIDTH: usize = 12;

/// Text rendered in place of a payload that cannot be serialized.
pub const UNSERIALIZABLE_PLACEHOLDER: &str = "[unserializable]";

/// Options controlling the rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Minimum width of the tag column. Longer tags are not truncated.
    pub tag_width: usize,

    /// Substituted for payloads that fail to serialize.
    pub placeholder: Cow<'static, str>,
}

impl RenderOptions {
    /// The options used by the `Display` impls.
    pub const DEFAULT: Self = Self {
        tag_width: DEFAULT_TAG_WIDTH,
        placeholder: Cow::Borrowed(UNSERIALIZABLE_PLACEHOLDER),
    };

    pub fn with_tag_width(mut self, tag_width: usize) -> Self {
        self.tag_width = tag_width;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<Cow<'static, str>>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Left-justifies `tag` to the configured width.
    ///
    /// Width is counted in `char`s. A tag with characters outside the Basic
    /// Multilingual Plane (most emoji) gets one more space per such character
    /// than a UTF-16 based `padEnd` would give it.
    pub(crate) fn pad_tag(&self, tag: &str) -> String {
        format!("{:<width$}", tag, width = self.tag_width)
    }

    /// Compact JSON for `payload`, or the placeholder if it does not serialize.
    pub(crate) fn payload_json<P: Serialize + ?Sized>(&self, payload: &P) -> String {
        match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(err) => {
                tracing::debug!(error = %err, "payload not serializable, rendering placeholder");
                self.placeholder.to_string()
            }
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Current wall-clock time at the precision carried on the wire.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Formats a timestamp as ISO-8601 UTC with millisecond precision,
/// e.g. `2024-05-01T12:00:00.123Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 timestamp (any offset) into UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, EnvelopeError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| EnvelopeError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
