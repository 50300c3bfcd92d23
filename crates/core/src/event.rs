// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event values and the contract they expose to the dispatch engine

use crate::error::EventError;
use serde::Serialize;
use serde_json::Value;
use std::any::{Any, TypeId};

/// Contract between event values and the dispatch engine.
///
/// Implementors are plain data carriers; the engine only asks for an
/// optional name, the propagation flag, and which accepted-type tags the
/// event answers for.
pub trait Dispatchable: Any {
    /// Name used for name-based listener matching, if the event has one.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Whether a listener has halted further propagation.
    fn is_propagation_stopped(&self) -> bool {
        false
    }

    /// Whether this event answers for the given accepted-type tag.
    ///
    /// Defaults to an exact runtime type match. Override to let an event
    /// answer for additional kinds, registered through
    /// [`TypedRegistry::add_for`](crate::registry::TypedRegistry::add_for).
    fn satisfies(&self, tag: TypeId) -> bool {
        self.type_id() == tag
    }
}

/// A named event carrying a subject and a mutable payload.
///
/// The subject is fixed at construction. Listeners communicate by mutating
/// the payload in place, and may halt the remaining listeners with
/// [`stop_propagation`](Event::stop_propagation).
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    name: String,
    subject: Option<Value>,
    payload: Value,
    #[serde(skip)]
    propagation_stopped: bool,
}

impl Event {
    /// Create a named event with no subject and a null payload.
    ///
    /// The name is a literal: it must not contain `*`.
    pub fn new(name: impl Into<String>) -> Result<Self, EventError> {
        let name = name.into();
        if name.contains('*') {
            return Err(EventError::InvalidName { name });
        }

        Ok(Self {
            name,
            subject: None,
            payload: Value::Null,
            propagation_stopped: false,
        })
    }

    /// Attach the subject this event is emitted for.
    pub fn with_subject(mut self, subject: Value) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Replace the initial payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> Option<&Value> {
        self.subject.as_ref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Value {
        &mut self.payload
    }

    pub fn set_payload(&mut self, payload: Value) {
        self.payload = payload;
    }

    /// Skip all subsequent listeners in the current dispatch.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl Dispatchable for Event {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
