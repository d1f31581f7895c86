// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Most mutations use Diesel DSL and are backend-agnostic, with minimal use of
//! backend-specific helpers (e.g., `last_insert_rowid()` for `SQLite`).
//!
//! ## Module Organization
//!
//! - `identity` — Users, employee profiles, and sessions
//! - `notifications` — Direct inbox appends and read receipts
//! - `transitions` — Applying workflow transitions as one atomic unit

pub mod identity;
pub mod notifications;
pub mod transitions;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::PersistenceError;

pub use transitions::{PersistTransitionResult, PersistedChange};

/// Formats the current UTC time the way every `created_at` column stores it.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub(crate) fn current_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}
