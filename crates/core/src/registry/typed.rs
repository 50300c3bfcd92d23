// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registry keyed by accepted event type and namespace

use super::seq::Seq;
use crate::error::EventError;
use crate::event::Dispatchable;
use crate::pattern::NamePattern;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::debug;

/// Identifies the event type a listener accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name for diagnostics; not part of matching.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A registered listener, erased over its accepted event type.
pub type BoxedListener = Arc<dyn Fn(&mut dyn Dispatchable) + Send + Sync>;

#[derive(Clone)]
struct TypedEntry {
    ns: Arc<str>,
    accepts: TypeTag,
    listener: BoxedListener,
}

/// Immutable registry binding listeners to the event type they accept,
/// each entry tagged with an administrative dot-segmented namespace.
///
/// The namespace never filters type-based resolution: it scopes removal,
/// and doubles as a name pattern for events that carry a name. Like
/// [`NameRegistry`](crate::registry::NameRegistry), every mutating
/// operation returns a new registry and insertion order is dispatch order.
pub struct TypedRegistry {
    entries: Seq<TypedEntry>,
}

impl std::fmt::Debug for TypedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl TypedRegistry {
    pub fn new() -> Self {
        Self { entries: Seq::new() }
    }

    /// Number of registered listeners.
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

    /// Bind a listener in the root namespace.
    ///
    /// The accepted event type is fixed by the listener's parameter type
    /// `E` at registration.
    pub fn add<E, F>(&self, listener: F) -> Result<Self, EventError>
    where
        E: Dispatchable,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        self.add_in_ns("", listener)
    }

    /// Bind a listener under a namespace.
    ///
    /// The namespace is a literal dotted string: it must not contain `*`.
    pub fn add_in_ns<E, F>(&self, ns: &str, listener: F) -> Result<Self, EventError>
    where
        E: Dispatchable,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let erased: BoxedListener = Arc::new(move |event: &mut dyn Dispatchable| {
            let event: &mut dyn Any = event;
            if let Some(event) = event.downcast_mut::<E>() {
                listener(event);
            }
        });

        self.insert(ns, TypeTag::of::<E>(), erased)
    }

    /// Bind a listener for every event answering for `tag`.
    ///
    /// The listener receives the event undowncast; use this for marker
    /// kinds that several event types answer for through
    /// [`Dispatchable::satisfies`].
    pub fn add_for<F>(&self, ns: &str, tag: TypeTag, listener: F) -> Result<Self, EventError>
    where
        F: Fn(&mut dyn Dispatchable) + Send + Sync + 'static,
    {
        self.insert(ns, tag, Arc::new(listener))
    }

    fn insert(&self, ns: &str, accepts: TypeTag, listener: BoxedListener) -> Result<Self, EventError> {
        if ns.contains('*') {
            return Err(EventError::InvalidNamespace { ns: ns.to_string() });
        }

        debug!(ns, accepts = accepts.name(), total = self.len() + 1, "registering listener");

        Ok(Self {
            entries: self.entries.push(TypedEntry {
                ns: Arc::from(ns),
                accepts,
                listener,
            }),
        })
    }

    /// Remove every listener whose namespace matches `pattern` or one of
    /// its dotted children; `pattern` may contain `*`.
    ///
    /// When nothing matches, the returned registry shares this one's
    /// entries, observable through [`ptr_eq`](TypedRegistry::ptr_eq).
    pub fn remove(&self, pattern: &str) -> Self {
        let pattern = NamePattern::new(pattern);
        let next = Self {
            entries: self.entries.remove_where(|entry| pattern.covers(&entry.ns)),
        };

        if !next.ptr_eq(self) {
            debug!(
                pattern = pattern.as_str(),
                remaining = next.len(),
                "removed listeners"
            );
        }

        next
    }

    /// Listeners for `event`, in registration order.
    ///
    /// An entry matches when the event answers for its accepted type,
    /// whatever its namespace. For named events, an entry also matches when
    /// the event name covers its namespace the way it covers a registered
    /// name.
    pub fn resolve(&self, event: &dyn Dispatchable) -> Vec<BoxedListener> {
        let by_name = event.name().map(NamePattern::new);

        self.entries
            .iter()
            .filter(|entry| {
                event.satisfies(entry.accepts.id())
                    || by_name.as_ref().is_some_and(|name| name.covers(&entry.ns))
            })
            .map(|entry| Arc::clone(&entry.listener))
            .collect()
    }
}

impl Clone for TypedRegistry {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl Default for TypedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "typed_tests.rs"]
mod tests;
