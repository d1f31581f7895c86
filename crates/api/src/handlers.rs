// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every protected handler follows the same sequence: authorize the
//! caller, load the state the command touches, apply the command through
//! the core, then persist the resulting transition as one atomic unit.

use rota::{Command, State, StrictnessPolicy, Transition, apply};
use rota_domain::{
    Availability, DayOfWeek, Employee, Role, ShiftRequest, User, format_date, upcoming_window, validate_email,
    validate_position,
};
use rota_persistence::{PersistTransitionResult, PersistedChange, Persistence, SessionData};
use time::{Date, Duration};
use tracing::{error, info};

use crate::auth::{AuthenticationService, AuthorizationService, Identity};
use crate::error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AddEmployeeRequest, AssignRequest, AvailabilityResponse, CreateShiftRequest,
    CreateShiftResponse, EmployeeResponse, ListAvailabilityResponse, ListEmployeesResponse,
    ListNotificationsResponse, ListPendingResponse, ListShiftsResponse, LoginRequest,
    LoginResponse, MessageResponse, MyScheduleResponse, NotificationResponse,
    OverrideAvailabilityRequest, ProposeTradeRequest, RegisterRequest, RegisterResponse,
    ScheduleResponse, SetAvailabilityRequest, SetNotesRequest, ShiftRequestResponse,
    WhoAmIResponse,
};

/// Applies a command and persists the resulting transition.
fn apply_and_persist(
    persistence: &mut Persistence,
    state: &State,
    command: Command,
    policy: StrictnessPolicy,
) -> Result<PersistedChange, ApiError> {
    let transition: Transition = apply(state, command, policy).map_err(translate_core_error)?;
    let result: PersistTransitionResult = persistence
        .persist_transition(&transition)
        .map_err(translate_persistence_error)?;
    Ok(result.change)
}

/// Reads back a trade request after it reached a terminal status.
fn resolved_request(
    persistence: &mut Persistence,
    request_id: i64,
    change: &PersistedChange,
) -> Result<ShiftRequest, ApiError> {
    if !matches!(change, PersistedChange::TradeResolved { .. }) {
        return Err(unexpected_change("resolve_trade", change));
    }
    persistence
        .get_shift_request(request_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Shift request", "Shift request not found"))
}

/// Reports a persisted change that does not match the command that produced it.
fn unexpected_change(operation: &str, change: &PersistedChange) -> ApiError {
    error!(operation, ?change, "Persisted change does not match command");
    ApiError::Internal {
        message: String::from("An unexpected error occurred"),
    }
}

fn not_found(resource_type: &str, message: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: message.to_string(),
    }
}

/// Resolves a user to their employee profile.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the user has no profile.
pub fn resolve_employee(persistence: &mut Persistence, user_id: i64) -> Result<Employee, ApiError> {
    persistence
        .get_employee_by_user(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Employee", "Employee profile not found"))
}

fn require_employee(persistence: &mut Persistence, employee_id: i64) -> Result<Employee, ApiError> {
    persistence
        .get_employee(employee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Employee", "Employee not found"))
}

fn load_schedule_state(persistence: &mut Persistence, schedule_id: i64) -> Result<State, ApiError> {
    let state: State = match persistence
        .get_schedule_with_user(schedule_id)
        .map_err(translate_persistence_error)?
    {
        Some((schedule, employee_user_id)) => State::new().with_schedule(schedule, employee_user_id),
        None => State::new(),
    };
    Ok(state)
}

// ========================================================================
// Identity
// ========================================================================

fn create_account(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
    role: Role,
) -> Result<User, ApiError> {
    let email: String = validate_email(email).map_err(translate_domain_error)?;
    PasswordPolicy::default().validate(password, &email)?;

    let (user, _employee): (User, Option<Employee>) = persistence
        .create_user(&email, password, role)
        .map_err(translate_persistence_error)?;

    Ok(user)
}

/// Registers a new account with the employee role.
///
/// The paired employee profile is created in the same atomic unit with
/// the default phone and position.
///
/// # Errors
///
/// Returns an error if:
/// - The email is malformed
/// - The password violates the password policy
/// - The email is already registered
pub fn register(
    persistence: &mut Persistence,
    request: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    let user: User = create_account(persistence, &request.email, &request.password, Role::Employee)?;
    info!(user_id = user.id, "Registered employee account");

    Ok(RegisterResponse {
        message: String::from("User registered successfully"),
        user,
    })
}

/// Creates a manager account.
///
/// Registration only ever mints employees, so this is the one way to
/// create a manager. The server calls it once at startup.
///
/// # Errors
///
/// Returns the same errors as [`register`].
pub fn create_manager(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let user: User = create_account(persistence, email, password, Role::Manager)?;
    info!(user_id = user.id, "Created manager account");
    Ok(user)
}

/// Authenticates a user and creates a session.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for an unknown email or a wrong password.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    session_ttl: Duration,
) -> Result<LoginResponse, ApiError> {
    let (token, identity, user): (String, Identity, User) =
        AuthenticationService::login(persistence, &request.email, &request.password, session_ttl)?;

    let session: SessionData = persistence
        .get_session_by_token(&token)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?;

    Ok(LoginResponse {
        message: String::from("Login successful"),
        token,
        user_id: identity.user_id,
        email: user.email,
        role: identity.role,
        expires_at: session.expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn logout(
    persistence: &mut Persistence,
    session_token: &str,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(MessageResponse::new("Logged out"))
}

/// Describes the current caller.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the user no longer exists.
pub fn whoami(persistence: &mut Persistence, identity: &Identity) -> Result<WhoAmIResponse, ApiError> {
    let user: User = persistence
        .get_user_by_id(identity.user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            ApiError::from(AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })
        })?
        .into_user();

    let employee: Option<Employee> = persistence
        .get_employee_by_user(identity.user_id)
        .map_err(translate_persistence_error)?;

    Ok(WhoAmIResponse {
        user_id: user.id,
        email: user.email,
        role: user.role,
        employee_id: employee.map(|e| e.id),
    })
}

// ========================================================================
// Employee Directory
// ========================================================================

/// Lists every employee with the email of their user as display name.
///
/// Any authenticated caller may list employees.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees(persistence: &mut Persistence) -> Result<ListEmployeesResponse, ApiError> {
    let employees = persistence
        .list_employees()
        .map_err(translate_persistence_error)?;

    Ok(ListEmployeesResponse {
        message: String::from("Employees retrieved successfully"),
        employees,
    })
}

/// Creates an employee profile for an existing user.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The position is empty or too long
/// - The user does not exist
/// - The user already has a profile
pub fn add_employee(
    persistence: &mut Persistence,
    identity: &Identity,
    request: &AddEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    AuthorizationService::authorize_add_employee(identity)?;

    let position: String = validate_position(&request.position).map_err(translate_domain_error)?;

    if persistence
        .get_user_by_id(request.user_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(not_found("User", "User not found"));
    }

    if persistence
        .get_employee_by_user(request.user_id)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("one_profile_per_user"),
            message: String::from("User already has an employee profile"),
        });
    }

    let employee: Employee = persistence
        .create_employee(request.user_id, request.phone.trim(), &position)
        .map_err(translate_persistence_error)?;

    Ok(EmployeeResponse {
        message: String::from("Employee added successfully"),
        employee,
    })
}

// ========================================================================
// Shift Catalog
// ========================================================================

/// Lists every shift with the employee currently scheduled on it.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_shifts(persistence: &mut Persistence) -> Result<ListShiftsResponse, ApiError> {
    let shifts = persistence.list_shifts().map_err(translate_persistence_error)?;

    Ok(ListShiftsResponse {
        message: String::from("Shifts retrieved successfully"),
        shifts,
    })
}

/// Creates a shift and, when `employee_id` is given, its first schedule row.
///
/// Both rows are written together or not at all.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The date, times, or position are invalid
/// - The end time is not after the start time
/// - The given employee does not exist
pub fn create_shift(
    persistence: &mut Persistence,
    identity: &Identity,
    request: &CreateShiftRequest,
    policy: StrictnessPolicy,
) -> Result<CreateShiftResponse, ApiError> {
    AuthorizationService::authorize_create_shift(identity)?;

    if let Some(employee_id) = request.employee_id {
        require_employee(persistence, employee_id)?;
    }

    let command: Command = Command::CreateShift {
        shift_date: request.shift_date.clone(),
        start_time: request.start_time.clone(),
        end_time: request.end_time.clone(),
        position: request.position.clone(),
        employee_id: request.employee_id,
    };

    match apply_and_persist(persistence, &State::new(), command, policy)? {
        PersistedChange::Shift { shift, schedule } => Ok(CreateShiftResponse {
            message: String::from("Shift created"),
            shift,
            schedule,
        }),
        other => Err(unexpected_change("create_shift", &other)),
    }
}

// ========================================================================
// Schedule Ledger
// ========================================================================

/// Assigns an employee to a shift.
///
/// Unless the policy rejects double booking, a shift may gain several
/// `scheduled` rows.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The shift or employee does not exist
/// - Double booking is rejected and the shift is already assigned
pub fn assign(
    persistence: &mut Persistence,
    identity: &Identity,
    request: &AssignRequest,
    policy: StrictnessPolicy,
) -> Result<ScheduleResponse, ApiError> {
    AuthorizationService::authorize_assign(identity)?;

    if persistence
        .get_shift(request.shift_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(not_found("Shift", "Shift not found"));
    }
    require_employee(persistence, request.employee_id)?;

    let state: State = State::new().with_active_assignment(
        persistence
            .get_active_assignment(request.shift_id)
            .map_err(translate_persistence_error)?,
    );

    let command: Command = Command::Assign {
        employee_id: request.employee_id,
        shift_id: request.shift_id,
    };

    match apply_and_persist(persistence, &state, command, policy)? {
        PersistedChange::Schedule(schedule) => Ok(ScheduleResponse {
            message: String::from("Employee assigned to shift"),
            schedule,
        }),
        other => Err(unexpected_change("assign", &other)),
    }
}

/// Lists the calling employee's shifts in the upcoming window starting `today`.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an employee
/// - The caller has no employee profile
pub fn my_schedule(
    persistence: &mut Persistence,
    identity: &Identity,
    today: Date,
) -> Result<MyScheduleResponse, ApiError> {
    AuthorizationService::authorize_view_own_schedule(identity)?;

    let employee: Employee = resolve_employee(persistence, identity.user_id)?;
    let (from, until): (Date, Date) = upcoming_window(today).map_err(translate_domain_error)?;

    let schedule = persistence
        .list_upcoming_for_employee(employee.id, &format_date(from), &format_date(until))
        .map_err(translate_persistence_error)?;

    Ok(MyScheduleResponse {
        message: String::from("Schedule retrieved successfully"),
        schedule,
    })
}

/// Calls off the employee on a schedule row and notifies them.
///
/// Every call writes a new notification, even if the row was already
/// called off.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The schedule row does not exist
/// - The schedule row has no employee
pub fn call_off(
    persistence: &mut Persistence,
    identity: &Identity,
    schedule_id: i64,
    policy: StrictnessPolicy,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_call_off(identity)?;

    let state: State = load_schedule_state(persistence, schedule_id)?;
    apply_and_persist(persistence, &state, Command::CallOff { schedule_id }, policy)?;

    info!(schedule_id, "Employee called off");
    Ok(MessageResponse::new("Employee called off and notified"))
}

/// Overwrites the notes on a schedule row.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The schedule row does not exist
pub fn set_notes(
    persistence: &mut Persistence,
    identity: &Identity,
    schedule_id: i64,
    request: &SetNotesRequest,
    policy: StrictnessPolicy,
) -> Result<ScheduleResponse, ApiError> {
    AuthorizationService::authorize_set_notes(identity)?;

    let state: State = load_schedule_state(persistence, schedule_id)?;
    let command: Command = Command::SetNotes {
        schedule_id,
        notes: request.notes.clone(),
    };

    match apply_and_persist(persistence, &state, command, policy)? {
        PersistedChange::Schedule(schedule) => Ok(ScheduleResponse {
            message: String::from("Shift note updated successfully"),
            schedule,
        }),
        other => Err(unexpected_change("set_notes", &other)),
    }
}

// ========================================================================
// Trade Workflow
// ========================================================================

/// Opens a trade request from the calling employee.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an employee
/// - The caller has no employee profile
/// - The target employee or schedule row does not exist
/// - The policy requires the requester to hold the slot and they do not
pub fn propose_trade(
    persistence: &mut Persistence,
    identity: &Identity,
    request: &ProposeTradeRequest,
    policy: StrictnessPolicy,
) -> Result<ShiftRequestResponse, ApiError> {
    AuthorizationService::authorize_propose_trade(identity)?;

    let requester: Employee = resolve_employee(persistence, identity.user_id)?;
    if persistence
        .get_employee(request.target_employee_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(not_found("Employee", "Target employee not found"));
    }

    let state: State = load_schedule_state(persistence, request.schedule_id)?;
    let command: Command = Command::ProposeTrade {
        requester_id: requester.id,
        target_employee_id: request.target_employee_id,
        schedule_id: request.schedule_id,
    };

    match apply_and_persist(persistence, &state, command, policy)? {
        PersistedChange::ShiftRequest(shift_request) => {
            info!(
                request_id = shift_request.id,
                schedule_id = shift_request.schedule_id,
                "Trade proposed"
            );
            Ok(ShiftRequestResponse {
                message: String::from("Shift trade request submitted"),
                request: shift_request,
            })
        }
        other => Err(unexpected_change("propose_trade", &other)),
    }
}

/// Lists pending trade requests, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn list_pending_requests(
    persistence: &mut Persistence,
    identity: &Identity,
) -> Result<ListPendingResponse, ApiError> {
    AuthorizationService::authorize_list_pending(identity)?;

    let requests = persistence
        .list_pending_requests()
        .map_err(translate_persistence_error)?;

    Ok(ListPendingResponse {
        message: String::from("Pending shift requests retrieved"),
        requests,
    })
}

fn load_request_state(persistence: &mut Persistence, request_id: i64) -> Result<State, ApiError> {
    let state: State = match persistence
        .get_pending_request_with_user(request_id)
        .map_err(translate_persistence_error)?
    {
        Some((request, requester_user_id)) => State::new().with_request(request, requester_user_id),
        None => State::new(),
    };
    Ok(state)
}

/// Approves a pending trade, reassigning the schedule row to the target.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - No pending request with this ID exists, including when a concurrent
///   decision won
pub fn approve_trade(
    persistence: &mut Persistence,
    identity: &Identity,
    request_id: i64,
    policy: StrictnessPolicy,
) -> Result<ShiftRequestResponse, ApiError> {
    AuthorizationService::authorize_approve_trade(identity)?;

    let state: State = load_request_state(persistence, request_id)?;
    let change: PersistedChange =
        apply_and_persist(persistence, &state, Command::ApproveTrade { request_id }, policy)?;
    let request: ShiftRequest = resolved_request(persistence, request_id, &change)?;

    info!(request_id, "Trade approved");
    Ok(ShiftRequestResponse {
        message: String::from("Shift trade approved and updated"),
        request,
    })
}

/// Rejects a pending trade.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - No pending request with this ID exists
pub fn reject_trade(
    persistence: &mut Persistence,
    identity: &Identity,
    request_id: i64,
    policy: StrictnessPolicy,
) -> Result<ShiftRequestResponse, ApiError> {
    AuthorizationService::authorize_reject_trade(identity)?;

    let state: State = load_request_state(persistence, request_id)?;
    let change: PersistedChange =
        apply_and_persist(persistence, &state, Command::RejectTrade { request_id }, policy)?;
    let request: ShiftRequest = resolved_request(persistence, request_id, &change)?;

    info!(request_id, "Trade rejected");
    Ok(ShiftRequestResponse {
        message: String::from("Shift trade request rejected"),
        request,
    })
}

// ========================================================================
// Notifications
// ========================================================================

/// Lists the caller's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_notifications(
    persistence: &mut Persistence,
    identity: &Identity,
) -> Result<ListNotificationsResponse, ApiError> {
    let notifications = persistence
        .list_notifications_for_user(identity.user_id)
        .map_err(translate_persistence_error)?;

    Ok(ListNotificationsResponse {
        message: String::from("Notifications retrieved successfully"),
        notifications,
    })
}

/// Marks one of the caller's notifications read.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the notification does not exist or
/// belongs to another user.
pub fn mark_notification_read(
    persistence: &mut Persistence,
    identity: &Identity,
    notification_id: i64,
) -> Result<NotificationResponse, ApiError> {
    let notification = persistence
        .mark_notification_read(notification_id, identity.user_id)
        .map_err(translate_persistence_error)?;

    Ok(NotificationResponse {
        message: String::from("Notification marked as read"),
        notification,
    })
}

// ========================================================================
// Availability Register
// ========================================================================

fn upsert_availability(
    persistence: &mut Persistence,
    employee_id: i64,
    day_of_week: &str,
    period: &str,
    available: bool,
    policy: StrictnessPolicy,
) -> Result<Availability, ApiError> {
    let day_of_week: DayOfWeek = day_of_week.parse().map_err(translate_domain_error)?;
    let command: Command = Command::SetAvailability {
        employee_id,
        day_of_week,
        period: period.to_string(),
        available,
    };

    match apply_and_persist(persistence, &State::new(), command, policy)? {
        PersistedChange::Availability(availability) => Ok(availability),
        other => Err(unexpected_change("set_availability", &other)),
    }
}

/// Records the calling employee's availability for a day and period.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an employee
/// - The caller has no employee profile
/// - The day or period is invalid
pub fn set_availability(
    persistence: &mut Persistence,
    identity: &Identity,
    request: &SetAvailabilityRequest,
    policy: StrictnessPolicy,
) -> Result<AvailabilityResponse, ApiError> {
    AuthorizationService::authorize_set_availability(identity)?;

    let employee: Employee = resolve_employee(persistence, identity.user_id)?;
    let availability: Availability = upsert_availability(
        persistence,
        employee.id,
        &request.day_of_week,
        &request.period,
        request.available,
        policy,
    )?;

    Ok(AvailabilityResponse {
        message: String::from("Availability set"),
        availability,
    })
}

/// Overwrites any employee's availability for a day and period.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The employee does not exist
/// - The day or period is invalid
pub fn override_availability(
    persistence: &mut Persistence,
    identity: &Identity,
    request: &OverrideAvailabilityRequest,
    policy: StrictnessPolicy,
) -> Result<AvailabilityResponse, ApiError> {
    AuthorizationService::authorize_override_availability(identity)?;

    require_employee(persistence, request.employee_id)?;
    let availability: Availability = upsert_availability(
        persistence,
        request.employee_id,
        &request.day_of_week,
        &request.period,
        request.available,
        policy,
    )?;

    info!(employee_id = request.employee_id, "Availability overridden");
    Ok(AvailabilityResponse {
        message: String::from("Availability override successful"),
        availability,
    })
}

/// Lists every availability entry with the employee's display name.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn list_all_availability(
    persistence: &mut Persistence,
    identity: &Identity,
) -> Result<ListAvailabilityResponse, ApiError> {
    AuthorizationService::authorize_list_all_availability(identity)?;

    let availability = persistence
        .list_all_availability()
        .map_err(translate_persistence_error)?;

    Ok(ListAvailabilityResponse {
        message: String::from("All employee availability retrieved"),
        availability,
    })
}
