// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named handler sets over the fold dispatcher

use crate::dispatch::TriggerDispatcher;
use crate::error::EventError;
use crate::registry::{Handler, NameRegistry};
use std::sync::Arc;

type HandlerSet<S, P> = (String, Vec<Arc<dyn Handler<S, P>>>);

/// Service managing named sets of handlers and the dispatcher built from
/// them.
///
/// Like the registries, a manager is an immutable value: `with` and
/// `without` return a new manager whose dispatcher is re-derived from the
/// remaining sets. Sets keep their insertion position, so replacing one
/// does not reorder the others.
pub struct EventManager<S, P> {
    sets: Vec<HandlerSet<S, P>>,
    dispatcher: TriggerDispatcher<S, P>,
}

impl<S, P> std::fmt::Debug for EventManager<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("sets", &self.sets.len())
            .finish()
    }
}

impl<S: 'static, P: 'static> EventManager<S, P> {
    pub fn new(dispatcher: TriggerDispatcher<S, P>) -> Self {
        Self {
            sets: Vec::new(),
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &TriggerDispatcher<S, P> {
        &self.dispatcher
    }

    /// Whether a set is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.sets.iter().any(|(set, _)| set == name)
    }

    /// Handlers registered under `name`, in registration order.
    pub fn get(&self, name: &str) -> &[Arc<dyn Handler<S, P>>] {
        self.sets
            .iter()
            .find(|(set, _)| set == name)
            .map(|(_, handlers)| handlers.as_slice())
            .unwrap_or_default()
    }

    /// A manager with `handlers` bound to the event `name`, replacing any
    /// set previously held under that name.
    pub fn with(
        &self,
        name: &str,
        handlers: Vec<Arc<dyn Handler<S, P>>>,
    ) -> Result<Self, EventError> {
        let mut sets = self.sets.clone();
        match sets.iter_mut().find(|(set, _)| set == name) {
            Some((_, existing)) => *existing = handlers,
            None => sets.push((name.to_string(), handlers)),
        }

        let dispatcher = Self::derive(&self.dispatcher, &sets)?;
        Ok(Self { sets, dispatcher })
    }

    /// A manager without the set registered under `name`; an identity
    /// no-op when the set is absent.
    pub fn without(&self, name: &str) -> Self {
        if !self.has(name) {
            return self.clone();
        }

        let sets: Vec<_> = self
            .sets
            .iter()
            .filter(|(set, _)| set != name)
            .cloned()
            .collect();

        // Set names were validated when first registered.
        let dispatcher =
            Self::derive(&self.dispatcher, &sets).unwrap_or_else(|_| self.dispatcher.clone());
        Self { sets, dispatcher }
    }

    fn derive(
        base: &TriggerDispatcher<S, P>,
        sets: &[HandlerSet<S, P>],
    ) -> Result<TriggerDispatcher<S, P>, EventError> {
        let mut registry = NameRegistry::new();
        for (name, handlers) in sets {
            for handler in handlers {
                registry = registry.add_shared(name, Arc::clone(handler))?;
            }
        }

        Ok(base.with_registry(registry))
    }
}

impl<S, P> Clone for EventManager<S, P> {
    fn clone(&self) -> Self {
        Self {
            sets: self.sets.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<S: 'static, P: 'static> Default for EventManager<S, P> {
    fn default() -> Self {
        Self::new(TriggerDispatcher::default())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
