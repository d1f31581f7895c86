// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests are plain structs filled in by the transport layer. Every
//! response carries a human-readable `message` next to its payload.

use rota_domain::{
    Availability, AvailabilityEntry, Employee, EmployeeSummary, Notification,
    PendingShiftRequest, Role, Schedule, Shift, ShiftListing, ShiftRequest, UpcomingShift, User,
};

// ========================================================================
// Identity
// ========================================================================

/// API request to register a new employee account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
    /// A success message.
    pub message: String,
    /// The created account.
    pub user: User,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// A success message.
    pub message: String,
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user_id: i64,
    /// The user's email.
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// Session expiry (ISO 8601).
    pub expires_at: String,
}

/// API response describing the current caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The caller's user ID.
    pub user_id: i64,
    /// The caller's email.
    pub email: String,
    /// The caller's role.
    pub role: Role,
    /// The caller's employee profile, if one exists.
    pub employee_id: Option<i64>,
}

/// API response carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    /// A success message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a response with the given message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

// ========================================================================
// Employee Directory
// ========================================================================

/// API request to create an employee profile for an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEmployeeRequest {
    /// The owning user.
    pub user_id: i64,
    /// Contact phone.
    pub phone: String,
    /// Job position.
    pub position: String,
}

/// API response carrying one employee profile.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeResponse {
    /// A success message.
    pub message: String,
    /// The profile.
    pub employee: Employee,
}

/// API response listing the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListEmployeesResponse {
    /// A success message.
    pub message: String,
    /// Every employee with their display name.
    pub employees: Vec<EmployeeSummary>,
}

// ========================================================================
// Shift Catalog and Schedule Ledger
// ========================================================================

/// API request to create a shift, optionally assigning it at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShiftRequest {
    /// `YYYY-MM-DD`.
    pub shift_date: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub end_time: String,
    /// Position label.
    pub position: String,
    /// Employee for an initial schedule row.
    pub employee_id: Option<i64>,
}

/// API response for a created shift.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateShiftResponse {
    /// A success message.
    pub message: String,
    /// The new shift.
    pub shift: Shift,
    /// The paired schedule row, when an employee was given.
    pub schedule: Option<Schedule>,
}

/// API response listing every shift.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListShiftsResponse {
    /// A success message.
    pub message: String,
    /// Shifts with their assigned employee.
    pub shifts: Vec<ShiftListing>,
}

/// API request to assign an employee to a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRequest {
    /// The employee.
    pub employee_id: i64,
    /// The shift.
    pub shift_id: i64,
}

/// API request to overwrite schedule notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetNotesRequest {
    /// New notes.
    pub notes: String,
}

/// API response carrying one schedule row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleResponse {
    /// A success message.
    pub message: String,
    /// The schedule row.
    pub schedule: Schedule,
}

/// API response for an employee's upcoming schedule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MyScheduleResponse {
    /// A success message.
    pub message: String,
    /// Upcoming shifts in date order.
    pub schedule: Vec<UpcomingShift>,
}

// ========================================================================
// Trade Workflow
// ========================================================================

/// API request to propose a shift trade.
///
/// The requester is always the calling employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposeTradeRequest {
    /// Employee taking the shift.
    pub target_employee_id: i64,
    /// Schedule row being traded.
    pub schedule_id: i64,
}

/// API response for a submitted trade request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShiftRequestResponse {
    /// A success message.
    pub message: String,
    /// The request as stored after the operation.
    pub request: ShiftRequest,
}

/// API response listing pending trade requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListPendingResponse {
    /// A success message.
    pub message: String,
    /// Pending requests, newest first.
    pub requests: Vec<PendingShiftRequest>,
}

// ========================================================================
// Notifications
// ========================================================================

/// API response listing the caller's notifications.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListNotificationsResponse {
    /// A success message.
    pub message: String,
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
}

/// API response carrying one notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationResponse {
    /// A success message.
    pub message: String,
    /// The notification.
    pub notification: Notification,
}

// ========================================================================
// Availability
// ========================================================================

/// API request for an employee to record their own availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAvailabilityRequest {
    /// Day name, `Sunday` through `Saturday`.
    pub day_of_week: String,
    /// Period label.
    pub period: String,
    /// Whether the employee is available.
    pub available: bool,
}

/// API request for a manager to override an employee's availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideAvailabilityRequest {
    /// The employee.
    pub employee_id: i64,
    /// Day name, `Sunday` through `Saturday`.
    pub day_of_week: String,
    /// Period label.
    pub period: String,
    /// Whether the employee is available.
    pub available: bool,
}

/// API response carrying one availability entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvailabilityResponse {
    /// A success message.
    pub message: String,
    /// The stored entry.
    pub availability: Availability,
}

/// API response listing every availability entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListAvailabilityResponse {
    /// A success message.
    pub message: String,
    /// Entries ordered by employee, day, then period.
    pub availability: Vec<AvailabilityEntry>,
}
