//! Command envelope - an intent to change state.

use chrono::{DateTime, Utc};
use herald_id::CommandId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::render::{self, RenderOptions};
use crate::{EnvelopeError, Tagged};

/// An intent to change state, created by a sender before the change runs.
///
/// Every field is fixed at construction. The payload is opaque to the
/// envelope; rendering and serialization require `P: Serialize`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command<P> {
    tag: String,
    id: CommandId,
    created_at: DateTime<Utc>,
    payload: P,
}

impl<P> Command<P> {
    /// Creates a command with a fresh id and the current time.
    #[must_use]
    pub fn new(tag: impl Into<String>, payload: P) -> Self {
        Self {
            tag: tag.into(),
            id: CommandId::new(),
            created_at: render::now(),
            payload,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the command, handing its payload to the caller.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Exact, case-sensitive tag comparison.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Projects the command onto its wire record, borrowing the payload.
    pub fn to_record(&self) -> CommandRecord<&P> {
        CommandRecord {
            tag: self.tag.clone(),
            id: self.id.to_string(),
            created_at: render::format_timestamp(&self.created_at),
            payload: &self.payload,
        }
    }

    /// Projects the command onto its wire record, moving the payload.
    pub fn into_record(self) -> CommandRecord<P> {
        CommandRecord {
            id: self.id.to_string(),
            created_at: render::format_timestamp(&self.created_at),
            tag: self.tag,
            payload: self.payload,
        }
    }
}

impl<P: Serialize> Command<P> {
    /// Renders `<timestamp> :: <tag> :: <id> => <payload>`.
    pub fn render(&self, opts: &RenderOptions) -> String {
        format!(
            "{} :: {} :: {} => {}",
            render::format_timestamp(&self.created_at),
            opts.pad_tag(&self.tag),
            self.id,
            opts.payload_json(&self.payload),
        )
    }
}

impl<P> Tagged for Command<P> {
    fn tag(&self) -> &str {
        &self.tag
    }
}

impl<P: Serialize> std::fmt::Display for Command<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&RenderOptions::DEFAULT))
    }
}

/// Plain serializable form of a [`Command`].
///
/// JSON shape: `{"tag", "id", "createdAt", "payload"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord<P> {
    pub tag: String,
    pub id: String,
    pub created_at: String,
    pub payload: P,
}

impl<P> TryFrom<CommandRecord<P>> for Command<P> {
    type Error = EnvelopeError;

    fn try_from(record: CommandRecord<P>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommandId::parse(&record.id)?,
            created_at: render::parse_timestamp(&record.created_at)?,
            tag: record.tag,
            payload: record.payload,
        })
    }
}

impl<P: Serialize> Serialize for Command<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_record().serialize(serializer)
    }
}

impl<'de, P: Deserialize<'de>> Deserialize<'de> for Command<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = CommandRecord::<P>::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}
