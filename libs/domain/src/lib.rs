//! # herald-domain
//!
//! Envelopes for an event-sourced domain model.
//!
//! ## Design Principles
//!
//! - Envelopes are immutable once constructed
//! - Tags are caller-chosen strings; there is no closed set of kinds
//! - Payloads are opaque; the envelope never inspects or validates them
//! - Rendering for humans never fails
//!
//! ## Envelopes
//!
//! - [`Command`]: an intent to change state (`tag`, `id`, `createdAt`, `payload`)
//! - [`DomainEvent`]: a fact that state changed, correlated to the causing
//!   command and to an aggregate (`tag`, `id`, `commandId`, `aggregateId`,
//!   `createdAt`, `payload`)
//! - [`DomainError`]: a tagged failure (`tag`, `message`, `createdAt`)
//!
//! Each envelope projects onto a plain record (`to_record`) whose JSON field
//! names are the ones listed above, and serializes through that record.
//!
//! ## Dispatch
//!
//! [`EventMatcher`] routes a [`DomainEvent`] to a handler by tag, with an
//! optional default. An event with no handler and no default is an error.

mod command;
mod domain_error;
mod error;
mod event;
mod matcher;
pub mod render;
mod tagged;

pub use command::{Command, CommandRecord};
pub use domain_error::{to_domain_error, DomainError, DomainErrorRecord, IntoDomainMessage};
pub use error::EnvelopeError;
pub use event::{DomainEvent, DomainEventRecord};
pub use matcher::{match_domain_event, EventMatcher};
pub use render::RenderOptions;
pub use tagged::Tagged;

/// Re-export of the identifier types used by the envelopes.
pub use herald_id::{AggregateId, CommandId, EventId, INIT_AGGREGATE_ID};
