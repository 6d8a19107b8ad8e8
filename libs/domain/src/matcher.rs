//! Tag-based dispatch over domain events.
//!
//! Tags form an open set, so a matcher cannot be checked for exhaustiveness
//! at compile time. Instead, dispatching an event whose tag has no handler
//! and no default is an error ([`EnvelopeError::UnhandledTag`]) rather than
//! a silent no-op.
//!
//! ```
//! use herald_domain::{DomainEvent, EventMatcher};
//! use herald_id::CommandId;
//!
//! let event = DomainEvent::init("AccountOpened", CommandId::new(), 100_i64);
//!
//! let matcher = EventMatcher::new()
//!     .on("AccountOpened", |e: &DomainEvent<i64>| *e.payload())
//!     .on("Deposited", |e: &DomainEvent<i64>| -*e.payload());
//!
//! assert_eq!(matcher.dispatch(&event).unwrap(), 100);
//! ```

use std::collections::HashMap;

use crate::{DomainEvent, EnvelopeError};

type Handler<'a, P, R> = Box<dyn Fn(&DomainEvent<P>) -> R + 'a>;

/// A mapping from event tags to handlers, with an optional default.
pub struct EventMatcher<'a, P, R> {
    cases: HashMap<String, Handler<'a, P, R>>,
    fallback: Option<Handler<'a, P, R>>,
}

impl<'a, P, R> EventMatcher<'a, P, R> {
    pub fn new() -> Self {
        Self {
            cases: HashMap::new(),
            fallback: None,
        }
    }

    /// Registers `handler` for `tag`. A later registration for the same tag
    /// replaces the earlier one.
    pub fn on(
        mut self,
        tag: impl Into<String>,
        handler: impl Fn(&DomainEvent<P>) -> R + 'a,
    ) -> Self {
        self.cases.insert(tag.into(), Box::new(handler));
        self
    }

    /// Registers the handler used when no tag matches.
    pub fn otherwise(mut self, handler: impl Fn(&DomainEvent<P>) -> R + 'a) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Returns true if a handler is registered for exactly this tag.
    pub fn handles(&self, tag: &str) -> bool {
        self.cases.contains_key(tag)
    }

    pub fn has_default(&self) -> bool {
        self.fallback.is_some()
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.cases.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Runs the handler for the event's tag, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::UnhandledTag`] if there is neither a handler
    /// for the tag nor a default.
    pub fn dispatch(&self, event: &DomainEvent<P>) -> Result<R, EnvelopeError> {
        if let Some(handler) = self.cases.get(event.tag()) {
            return Ok(handler(event));
        }

        if let Some(fallback) = &self.fallback {
            tracing::debug!(
                tag = event.tag(),
                event_id = %event.id(),
                "no handler for tag, using default"
            );
            return Ok(fallback(event));
        }

        tracing::warn!(
            tag = event.tag(),
            event_id = %event.id(),
            aggregate_id = %event.aggregate_id(),
            "unhandled domain event tag"
        );
        Err(EnvelopeError::UnhandledTag(event.tag().to_string()))
    }
}

impl<P, R> Default for EventMatcher<'_, P, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> std::fmt::Debug for EventMatcher<'_, P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventMatcher")
            .field("tags", &self.tags())
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Dispatches `event` through `matcher`. See [`EventMatcher::dispatch`].
pub fn match_domain_event<P, R>(
    event: &DomainEvent<P>,
    matcher: &EventMatcher<'_, P, R>,
) -> Result<R, EnvelopeError> {
    matcher.dispatch(event)
}
