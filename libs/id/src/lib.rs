//! # herald-id
//!
//! Identifier types for herald envelopes.
//!
//! ## Design Principles
//!
//! - Command and event ids are system-generated at construction time
//! - Aggregate ids are chosen by the caller and treated as opaque strings
//! - Generated ids have a canonical string form with strict parsing
//! - Ids are typed so a command id cannot be passed where an event id is expected
//!
//! ## ID Format
//!
//! Generated ids use a prefixed format: `{prefix}_{ulid}`
//!
//! Examples:
//! - `cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D`
//! - `evt_01HV4Z3MXNKPQR9HSTZ7WCMD4E`
//!
//! Aggregate ids carry no format. The reserved [`INIT_AGGREGATE_ID`] marks an
//! event that creates a new aggregate.

mod error;
mod macros;
mod parse;
mod types;

pub use error::IdError;
pub use parse::parse_prefixed;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
