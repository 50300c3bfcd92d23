// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for event construction and listener registration

use thiserror::Error;

/// Errors raised while constructing events or building registries.
///
/// Validation is eager: every variant is raised at the call that introduced
/// the offending string, never at resolution or dispatch time. A registry
/// that was successfully built contains only well-named entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("invalid event name '{name}': illegal character '*'")]
    InvalidName { name: String },
    #[error("invalid listener namespace '{ns}': illegal character '*'")]
    InvalidNamespace { ns: String },
}
