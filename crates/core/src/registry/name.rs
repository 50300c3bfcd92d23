// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registry keyed by dotted event names

use super::seq::Seq;
use crate::error::EventError;
use crate::pattern::NamePattern;
use std::sync::Arc;
use tracing::debug;

/// A fold-style event handler: receives the subject and the running
/// payload, returns the payload handed to the next handler.
///
/// Implemented for any matching closure; handler objects shared across
/// registries go through [`NameRegistry::add_shared`].
pub trait Handler<S, P>: Send + Sync {
    fn handle(&self, subject: &S, payload: P) -> P;
}

impl<S, P, F> Handler<S, P> for F
where
    F: Fn(&S, P) -> P + Send + Sync,
{
    fn handle(&self, subject: &S, payload: P) -> P {
        self(subject, payload)
    }
}

struct NameEntry<S, P> {
    name: Arc<str>,
    handler: Arc<dyn Handler<S, P>>,
}

impl<S, P> Clone for NameEntry<S, P> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Immutable registry binding fold-style handlers to literal event names.
///
/// Every mutating operation returns a new registry; the receiver is never
/// altered, so a registry can be shared freely while derived versions are
/// built from it. Insertion order is dispatch order. `S` is the subject
/// type handlers receive, `P` the payload they fold.
pub struct NameRegistry<S, P> {
    entries: Seq<NameEntry<S, P>>,
}

impl<S, P> std::fmt::Debug for NameRegistry<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl<S, P> NameRegistry<S, P> {
    pub fn new() -> Self {
        Self { entries: Seq::new() }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `other` holds this registry's entry sequence, i.e. was
    /// derived from it without change.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.entries.ptr_eq(&other.entries)
    }

    /// Bind a handler for an event name.
    ///
    /// The name is a literal: it must not contain `*`. The handler is
    /// appended after all existing entries, so same-named handlers run in
    /// registration order.
    pub fn add(
        &self,
        name: &str,
        handler: impl Handler<S, P> + 'static,
    ) -> Result<Self, EventError> {
        self.add_shared(name, Arc::new(handler))
    }

    /// Bind an already shared handler, e.g. one also held by another
    /// registry or a handler set.
    pub fn add_shared(
        &self,
        name: &str,
        handler: Arc<dyn Handler<S, P>>,
    ) -> Result<Self, EventError> {
        if name.contains('*') {
            return Err(EventError::InvalidName {
                name: name.to_string(),
            });
        }

        debug!(name, total = self.len() + 1, "registering handler");

        Ok(Self {
            entries: self.entries.push(NameEntry {
                name: Arc::from(name),
                handler,
            }),
        })
    }

    /// Remove every handler whose name matches `pattern` or one of its
    /// dotted children; `pattern` may contain `*`.
    ///
    /// When nothing matches, the returned registry shares this one's
    /// entries, observable through [`ptr_eq`](NameRegistry::ptr_eq).
    pub fn remove(&self, pattern: &str) -> Self {
        let pattern = NamePattern::new(pattern);
        let next = Self {
            entries: self.entries.remove_where(|entry| pattern.covers(&entry.name)),
        };

        if !next.ptr_eq(self) {
            debug!(
                pattern = pattern.as_str(),
                remaining = next.len(),
                "removed handlers"
            );
        }

        next
    }

    /// Handlers bound to `event_name`, in registration order: every entry
    /// whose name is `event_name` itself or one of its dotted children.
    ///
    /// Publishing a parent name reaches all of its dotted sub-events;
    /// publishing a sub-event never reaches the bare parent.
    pub fn resolve(&self, event_name: &str) -> Vec<Arc<dyn Handler<S, P>>> {
        let parent = NamePattern::new(event_name);
        self.entries
            .iter()
            .filter(|entry| parent.covers(&entry.name))
            .map(|entry| Arc::clone(&entry.handler))
            .collect()
    }
}

impl<S, P> Clone for NameRegistry<S, P> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<S, P> Default for NameRegistry<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
