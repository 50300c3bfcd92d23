// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch engines for the two event-value capabilities
//!
//! [`EventDispatcher`] walks mutable event objects through their listeners
//! in place; [`TriggerDispatcher`] folds an immutable payload through the
//! handlers bound to a name. Both run synchronously on the caller's thread
//! and never catch a listener failure.

use crate::error::EventError;
use crate::event::Dispatchable;
use crate::registry::{NameRegistry, TypedRegistry};
use tracing::trace;

/// Synchronous dispatcher for mutable event objects.
///
/// Resolves listeners from its provider once per dispatch and invokes them
/// in registration order; the event's propagation flag is checked before
/// every invocation.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    provider: TypedRegistry,
}

impl EventDispatcher {
    pub fn new(provider: TypedRegistry) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &TypedRegistry {
        &self.provider
    }

    /// A dispatcher over `provider`, sharing the current one when the given
    /// provider is the version already held.
    pub fn with_provider(&self, provider: TypedRegistry) -> Self {
        if self.provider.ptr_eq(&provider) {
            self.clone()
        } else {
            Self { provider }
        }
    }

    /// Invoke every matching listener with the event, in registration
    /// order, and return the event.
    ///
    /// Iteration halts the moment the event reports propagation stopped;
    /// an event already stopped on entry runs zero listeners. A panicking
    /// listener propagates to the caller and later listeners do not run.
    pub fn dispatch<E: Dispatchable>(&self, mut event: E) -> E {
        let listeners = self.provider.resolve(&event);

        for (index, listener) in listeners.into_iter().enumerate() {
            if event.is_propagation_stopped() {
                trace!(index, "propagation stopped");
                return event;
            }
            trace!(index, "invoking listener");
            (listener)(&mut event);
        }

        event
    }
}

/// Fold dispatcher for immutable payloads.
///
/// Handlers receive `(subject, payload)` and return the payload handed to
/// the next handler; the caller gets the final payload back. Fold payloads
/// carry no propagation flag, so the full resolved sequence always runs.
pub struct TriggerDispatcher<S, P> {
    registry: NameRegistry<S, P>,
}

impl<S, P> TriggerDispatcher<S, P> {
    pub fn new(registry: NameRegistry<S, P>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &NameRegistry<S, P> {
        &self.registry
    }

    /// A dispatcher over `registry`, sharing the current one when the given
    /// registry is the version already held.
    pub fn with_registry(&self, registry: NameRegistry<S, P>) -> Self {
        if self.registry.ptr_eq(&registry) {
            self.clone()
        } else {
            Self { registry }
        }
    }

    /// Fold `payload` through every handler bound to `event`, in
    /// registration order.
    ///
    /// The event name is a literal: triggering a name containing `*` fails
    /// with `EventError::InvalidName`, the same rule event construction
    /// applies.
    pub fn trigger(&self, event: &str, subject: &S, payload: P) -> Result<P, EventError> {
        if event.contains('*') {
            return Err(EventError::InvalidName {
                name: event.to_string(),
            });
        }

        let handlers = self.registry.resolve(event);
        trace!(event, handlers = handlers.len(), "triggering");

        Ok(handlers
            .into_iter()
            .fold(payload, |payload, handler| handler.handle(subject, payload)))
    }
}

impl<S, P> Clone for TriggerDispatcher<S, P> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<S, P> Default for TriggerDispatcher<S, P> {
    fn default() -> Self {
        Self::new(NameRegistry::new())
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
