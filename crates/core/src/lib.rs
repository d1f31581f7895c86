// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift-assignment and trade-arbitration workflow engine.
//!
//! Every workflow step is expressed as a [`Command`] applied to a loaded
//! [`State`]. The result is a [`Transition`] pairing the storage change with
//! the notifications it must produce, so the two can never be persisted
//! separately.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod policy;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{CALL_OFF_MESSAGE, TRADE_APPROVED_MESSAGE, TRADE_REJECTED_MESSAGE, apply};
pub use command::Command;
pub use error::CoreError;
pub use policy::StrictnessPolicy;
pub use state::{NotificationDraft, RequestView, ScheduleView, State, StateChange, Transition};
