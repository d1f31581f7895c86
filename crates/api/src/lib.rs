// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Rota shift scheduling system.
//!
//! Handlers take an explicit [`Identity`] for the caller, enforce the
//! role gate for their operation, and translate every lower-layer error
//! into [`ApiError`]. Transport concerns live in the server crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService, Identity};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    add_employee, approve_trade, assign, call_off, create_manager, create_shift,
    list_all_availability, list_employees, list_notifications, list_pending_requests,
    list_shifts, login, logout, mark_notification_read, my_schedule, override_availability,
    propose_trade, register, reject_trade, resolve_employee, set_availability, set_notes, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AddEmployeeRequest, AssignRequest, AvailabilityResponse, CreateShiftRequest,
    CreateShiftResponse, EmployeeResponse, ListAvailabilityResponse, ListEmployeesResponse,
    ListNotificationsResponse, ListPendingResponse, ListShiftsResponse, LoginRequest,
    LoginResponse, MessageResponse, MyScheduleResponse, NotificationResponse,
    OverrideAvailabilityRequest, ProposeTradeRequest, RegisterRequest, RegisterResponse,
    ScheduleResponse, SetAvailabilityRequest, SetNotesRequest, ShiftRequestResponse,
    WhoAmIResponse,
};
