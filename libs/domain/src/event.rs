//! DomainEvent envelope - a fact that state changed.

use chrono::{DateTime, Utc};
use herald_id::{AggregateId, CommandId, EventId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::render::{self, RenderOptions};
use crate::{Command, EnvelopeError, Tagged};

/// A fact produced by domain logic after a [`Command`] was processed.
///
/// Carries the id of the command that caused it and the id of the aggregate
/// it belongs to. An event that creates a new aggregate uses
/// [`AggregateId::INIT`].
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent<P> {
    tag: String,
    id: EventId,
    command_id: CommandId,
    aggregate_id: AggregateId,
    created_at: DateTime<Utc>,
    payload: P,
}

impl<P> DomainEvent<P> {
    /// Creates an event for an existing aggregate.
    #[must_use]
    pub fn new(
        tag: impl Into<String>,
        command_id: CommandId,
        aggregate_id: impl Into<AggregateId>,
        payload: P,
    ) -> Self {
        Self {
            tag: tag.into(),
            id: EventId::new(),
            command_id,
            aggregate_id: aggregate_id.into(),
            created_at: render::now(),
            payload,
        }
    }

    /// Creates the event that initializes a new aggregate.
    #[must_use]
    pub fn init(tag: impl Into<String>, command_id: CommandId, payload: P) -> Self {
        Self::new(tag, command_id, AggregateId::INIT, payload)
    }

    /// Creates an event correlated to `command`.
    #[must_use]
    pub fn caused_by<C>(
        command: &Command<C>,
        tag: impl Into<String>,
        aggregate_id: impl Into<AggregateId>,
        payload: P,
    ) -> Self {
        Self::new(tag, command.id(), aggregate_id, payload)
    }

    /// Creates an aggregate-initializing event correlated to `command`.
    #[must_use]
    pub fn init_caused_by<C>(command: &Command<C>, tag: impl Into<String>, payload: P) -> Self {
        Self::init(tag, command.id(), payload)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn command_id(&self) -> CommandId {
        self.command_id
    }

    pub fn aggregate_id(&self) -> &AggregateId {
        &self.aggregate_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the event, handing its payload to the caller.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Exact, case-sensitive tag comparison.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Returns true if this event initializes a new aggregate.
    pub fn is_init(&self) -> bool {
        self.aggregate_id.is_init()
    }

    /// Transforms the payload, keeping every envelope field.
    pub fn try_map_payload<T, E>(
        self,
        f: impl FnOnce(P) -> Result<T, E>,
    ) -> Result<DomainEvent<T>, E> {
        Ok(DomainEvent {
            payload: f(self.payload)?,
            tag: self.tag,
            id: self.id,
            command_id: self.command_id,
            aggregate_id: self.aggregate_id,
            created_at: self.created_at,
        })
    }

    /// Projects the event onto its wire record, borrowing the payload.
    pub fn to_record(&self) -> DomainEventRecord<&P> {
        DomainEventRecord {
            tag: self.tag.clone(),
            id: self.id.to_string(),
            command_id: self.command_id.to_string(),
            aggregate_id: self.aggregate_id.to_string(),
            created_at: render::format_timestamp(&self.created_at),
            payload: &self.payload,
        }
    }

    /// Projects the event onto its wire record, moving the payload.
    pub fn into_record(self) -> DomainEventRecord<P> {
        DomainEventRecord {
            id: self.id.to_string(),
            command_id: self.command_id.to_string(),
            aggregate_id: self.aggregate_id.to_string(),
            created_at: render::format_timestamp(&self.created_at),
            tag: self.tag,
            payload: self.payload,
        }
    }
}

impl DomainEvent<serde_json::Value> {
    /// Decodes a JSON payload into `T`.
    pub fn decode_payload<T: DeserializeOwned>(self) -> Result<DomainEvent<T>, EnvelopeError> {
        self.try_map_payload(|value| serde_json::from_value(value).map_err(EnvelopeError::from))
    }
}

impl<P: Serialize> DomainEvent<P> {
    /// Renders
    /// `<timestamp> :: <command id> :: <aggregate id> :: <tag> :: <id> => <payload>`.
    pub fn render(&self, opts: &RenderOptions) -> String {
        format!(
            "{} :: {} :: {} :: {} :: {} => {}",
            render::format_timestamp(&self.created_at),
            self.command_id,
            self.aggregate_id,
            opts.pad_tag(&self.tag),
            self.id,
            opts.payload_json(&self.payload),
        )
    }
}

impl<P> Tagged for DomainEvent<P> {
    fn tag(&self) -> &str {
        &self.tag
    }
}

impl<P: Serialize> std::fmt::Display for DomainEvent<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&RenderOptions::DEFAULT))
    }
}

/// Plain serializable form of a [`DomainEvent`].
///
/// JSON shape: `{"tag", "id", "commandId", "aggregateId", "createdAt", "payload"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEventRecord<P> {
    pub tag: String,
    pub id: String,
    pub command_id: String,
    pub aggregate_id: String,
    pub created_at: String,
    pub payload: P,
}

impl<P> TryFrom<DomainEventRecord<P>> for DomainEvent<P> {
    type Error = EnvelopeError;

    fn try_from(record: DomainEventRecord<P>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::parse(&record.id)?,
            command_id: CommandId::parse(&record.command_id)?,
            created_at: render::parse_timestamp(&record.created_at)?,
            aggregate_id: AggregateId::new(record.aggregate_id),
            tag: record.tag,
            payload: record.payload,
        })
    }
}

impl<P: Serialize> Serialize for DomainEvent<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_record().serialize(serializer)
    }
}

impl<'de, P: Deserialize<'de>> Deserialize<'de> for DomainEvent<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = DomainEventRecord::<P>::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}
