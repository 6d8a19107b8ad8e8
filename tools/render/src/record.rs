//! Parsing a single JSON record into its envelope and rendering it.

use herald_domain::{
    Command, CommandRecord, DomainError, DomainErrorRecord, DomainEvent, DomainEventRecord,
    EnvelopeError, RenderOptions,
};
use serde_json::Value;

use crate::config::RecordKind;

/// Guesses the envelope kind from the record's fields.
///
/// `commandId` marks an event, `message` without `id` marks an error, and
/// anything else is treated as a command.
pub fn detect_kind(value: &Value) -> RecordKind {
    let has = |field: &str| value.get(field).is_some();

    if has("commandId") {
        RecordKind::Event
    } else if has("message") && !has("id") {
        RecordKind::Error
    } else {
        RecordKind::Command
    }
}

/// Parses one JSON line and renders it.
pub fn render_line(
    line: &str,
    kind: RecordKind,
    opts: &RenderOptions,
) -> Result<String, EnvelopeError> {
    let value: Value = serde_json::from_str(line)?;

    let kind = match kind {
        RecordKind::Auto => detect_kind(&value),
        explicit => explicit,
    };

    let rendered = match kind {
        RecordKind::Event => {
            let record: DomainEventRecord<Value> = serde_json::from_value(value)?;
            DomainEvent::try_from(record)?.render(opts)
        }
        RecordKind::Error => {
            let record: DomainErrorRecord = serde_json::from_value(value)?;
            DomainError::try_from(record)?.render(opts)
        }
        RecordKind::Command | RecordKind::Auto => {
            let record: CommandRecord<Value> = serde_json::from_value(value)?;
            Command::try_from(record)?.render(opts)
        }
    };

    Ok(rendered)
}
