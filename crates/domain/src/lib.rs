// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and validation rules for shift scheduling.
//!
//! This crate has no I/O. It defines the entities that the workflow engine
//! reasons about and the field-level rules every write must satisfy.

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

mod calendar;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{DayOfWeek, UPCOMING_WINDOW_DAYS, upcoming_window};
pub use error::DomainError;
pub use types::{
    Availability, AvailabilityEntry, Employee, EmployeeSummary, Notification,
    PendingShiftRequest, RequestStatus, Role, Schedule, ScheduleStatus, Shift, ShiftListing,
    ShiftRequest, UpcomingShift, User,
};
pub use validation::{
    ShiftWindow, format_date, format_time, parse_date, parse_time, validate_email,
    validate_notification_message, validate_period, validate_position, validate_shift_window,
};
