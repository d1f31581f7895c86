// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! This module contains all read-only operations for the persistence layer.
//! All queries use Diesel DSL and work across all supported database backends.
//!
//! ## Module Organization
//!
//! - `identity` — Users, sessions, and the employee directory
//! - `ledger` — Shifts, schedule rows, and upcoming schedules
//! - `trades` — Shift trade requests
//! - `notifications` — Notification inboxes
//! - `availability` — The availability register

pub mod availability;
pub mod identity;
pub mod ledger;
pub mod notifications;
pub mod trades;
