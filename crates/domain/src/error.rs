// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A shift date could not be parsed.
    InvalidDate {
        /// The rejected input.
        value: String,
        /// The parser's explanation.
        error: String,
    },
    /// A time of day could not be parsed.
    InvalidTime {
        /// The rejected input.
        value: String,
        /// The parser's explanation.
        error: String,
    },
    /// A shift ends at or before it starts.
    InvalidTimeRange {
        /// The normalized start time.
        start: String,
        /// The normalized end time.
        end: String,
    },
    /// Position label is empty or invalid.
    InvalidPosition(String),
    /// Availability period label is empty or invalid.
    InvalidPeriod(String),
    /// Day of week is not one of Sunday through Saturday.
    InvalidDayOfWeek(String),
    /// Role is not `manager` or `employee`.
    InvalidRole(String),
    /// Schedule status string is not recognized.
    InvalidScheduleStatus(String),
    /// Shift request status string is not recognized.
    InvalidRequestStatus(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Notification message is empty.
    EmptyNotificationMessage,
    /// The requester does not currently hold the schedule slot being traded.
    RequesterDoesNotHoldSlot {
        /// The schedule being traded.
        schedule_id: i64,
        /// The employee proposing the trade.
        requester_id: i64,
    },
    /// The shift already has an active assignment.
    ShiftAlreadyAssigned {
        /// The shift being assigned.
        shift_id: i64,
        /// The existing active schedule row.
        schedule_id: i64,
    },
    /// The schedule row has no employee to act upon.
    ScheduleUnassigned(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { value, error } => {
                write!(f, "Invalid date '{value}': {error}")
            }
            Self::InvalidTime { value, error } => {
                write!(f, "Invalid time '{value}': {error}")
            }
            Self::InvalidTimeRange { start, end } => {
                write!(f, "Shift end time {end} must be after start time {start}")
            }
            Self::InvalidPosition(msg) => write!(f, "Invalid position: {msg}"),
            Self::InvalidPeriod(msg) => write!(f, "Invalid period: {msg}"),
            Self::InvalidDayOfWeek(value) => write!(
                f,
                "Invalid day of week '{value}'. Must be Sunday through Saturday"
            ),
            Self::InvalidRole(value) => {
                write!(f, "Invalid role '{value}'. Must be 'manager' or 'employee'")
            }
            Self::InvalidScheduleStatus(value) => {
                write!(f, "Invalid schedule status: {value}")
            }
            Self::InvalidRequestStatus(value) => {
                write!(f, "Invalid shift request status: {value}")
            }
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::EmptyNotificationMessage => {
                write!(f, "Notification message cannot be empty")
            }
            Self::RequesterDoesNotHoldSlot {
                schedule_id,
                requester_id,
            } => write!(
                f,
                "Employee {requester_id} is not assigned to schedule {schedule_id}"
            ),
            Self::ShiftAlreadyAssigned {
                shift_id,
                schedule_id,
            } => write!(
                f,
                "Shift {shift_id} is already assigned (schedule {schedule_id})"
            ),
            Self::ScheduleUnassigned(schedule_id) => {
                write!(f, "Schedule {schedule_id} has no assigned employee")
            }
        }
    }
}

impl std::error::Error for DomainError {}
