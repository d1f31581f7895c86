// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::DayOfWeek;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The role attached to a verified identity.
///
/// Role is authoritative for every permission check in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates shifts, assigns and calls off employees, arbitrates trades.
    Manager,
    /// Works shifts, proposes trades, records availability.
    Employee,
}

impl Role {
    /// Converts this role to its storage and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// The employee is expected to work the shift.
    #[default]
    Scheduled,
    /// A manager removed the employee from the shift.
    CalledOff,
}

impl ScheduleStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::CalledOff => "called_off",
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "called_off" => Ok(Self::CalledOff),
            _ => Err(DomainError::InvalidScheduleStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a shift trade request.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a manager decision.
    #[default]
    Pending,
    /// The trade was applied to the schedule.
    Approved,
    /// The trade was declined.
    Rejected,
}

impl RequestStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `Pending` → `Approved`
    /// - `Pending` → `Rejected`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidRequestStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account.
///
/// The password credential never leaves the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database identifier.
    pub id: i64,
    /// Login email, normalized to lowercase.
    pub email: String,
    /// Authorization role.
    pub role: Role,
    /// Creation timestamp as stored.
    pub created_at: String,
}

/// An employee profile, one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Database identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// Contact phone number.
    pub phone: String,
    /// Job position (e.g. "Server").
    pub position: String,
}

impl Employee {
    /// Phone number given to profiles created at registration.
    pub const DEFAULT_PHONE: &'static str = "";
    /// Position given to profiles created at registration.
    pub const DEFAULT_POSITION: &'static str = "Unassigned";
}

/// Directory listing entry: an employee and the display name of their user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Employee identifier.
    pub id: i64,
    /// Display name (the user's email).
    pub name: String,
}

/// A schedulable time slot.
///
/// Shifts are immutable once created. Dates are `YYYY-MM-DD` and times
/// are `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Database identifier.
    pub id: i64,
    /// Calendar date of the shift.
    pub shift_date: String,
    /// Start time of day.
    pub start_time: String,
    /// End time of day.
    pub end_time: String,
    /// Position this shift is staffed for.
    pub position: String,
}

/// A shift together with the employee currently scheduled on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftListing {
    /// The shift.
    #[serde(flatten)]
    pub shift: Shift,
    /// Employee on the most recent active assignment, if any.
    pub assigned_employee_id: Option<i64>,
}

/// The binding of an employee to a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Database identifier.
    pub id: i64,
    /// Assigned employee.
    pub employee_id: Option<i64>,
    /// The shift being worked.
    pub shift_id: i64,
    /// Assignment status.
    pub status: ScheduleStatus,
    /// Free-text manager notes.
    pub notes: Option<String>,
}

/// An upcoming shift on an employee's personal schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingShift {
    /// The schedule row.
    pub schedule_id: i64,
    /// Calendar date.
    pub shift_date: String,
    /// Start time.
    pub start_time: String,
    /// End time.
    pub end_time: String,
    /// Assignment status.
    pub status: ScheduleStatus,
}

/// A proposed transfer of a schedule row from one employee to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Database identifier.
    pub id: i64,
    /// Employee giving the shift away.
    pub requester_id: i64,
    /// Employee taking the shift.
    pub target_employee_id: i64,
    /// Schedule row being traded.
    pub schedule_id: i64,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Creation timestamp as stored.
    pub created_at: String,
}

/// A pending request enriched for manager review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingShiftRequest {
    /// The request.
    #[serde(flatten)]
    pub request: ShiftRequest,
    /// The shift behind the traded schedule row.
    pub shift_id: i64,
    /// Requester's position.
    pub requester_position: String,
    /// Target employee's position.
    pub target_position: String,
}

/// An inbox message for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Database identifier.
    pub id: i64,
    /// Recipient.
    pub user_id: i64,
    /// Message text.
    pub message: String,
    /// Whether the recipient has marked it read.
    pub read: bool,
    /// Creation timestamp as stored.
    pub created_at: String,
}

/// An employee's willingness to work a given day and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Database identifier.
    pub id: i64,
    /// The employee.
    pub employee_id: i64,
    /// Day of week.
    pub day_of_week: DayOfWeek,
    /// Period label (e.g. "AM").
    pub period: String,
    /// Whether the employee is available.
    pub available: bool,
}

/// Availability row enriched with the employee's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    /// The employee.
    pub employee_id: i64,
    /// Display name (the user's email).
    pub employee_name: String,
    /// Day of week.
    pub day_of_week: DayOfWeek,
    /// Period label.
    pub period: String,
    /// Whether the employee is available.
    pub available: bool,
}
