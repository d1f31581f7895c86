// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use rota::StrictnessPolicy;
use rota_api::{
    AddEmployeeRequest, ApiError, AssignRequest, AvailabilityResponse, CreateShiftRequest,
    CreateShiftResponse, EmployeeResponse, ListAvailabilityResponse, ListEmployeesResponse,
    ListNotificationsResponse, ListPendingResponse, ListShiftsResponse, LoginRequest,
    LoginResponse, MessageResponse, MyScheduleResponse, NotificationResponse,
    OverrideAvailabilityRequest, ProposeTradeRequest, RegisterRequest, RegisterResponse,
    ScheduleResponse, SetAvailabilityRequest, SetNotesRequest, ShiftRequestResponse,
    WhoAmIResponse, add_employee, approve_trade, assign, call_off, create_manager, create_shift,
    list_all_availability, list_employees, list_notifications, list_pending_requests,
    list_shifts, login, logout, mark_notification_read, my_schedule, override_availability,
    propose_trade, register, reject_trade, set_availability, set_notes, whoami,
};
use rota_persistence::{DEFAULT_BUSY_TIMEOUT_MS, Persistence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::SessionIdentity;

/// Rota Server - HTTP server for shift scheduling and trade arbitration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "ROTA_DATABASE")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes the place of `SQLite` when given.
    #[arg(long, env = "ROTA_MYSQL_URL", conflicts_with = "database")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "ROTA_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "ROTA_PORT", default_value_t = 3000)]
    port: u16,

    /// How long a storage call may wait on a lock before failing
    #[arg(long, env = "ROTA_BUSY_TIMEOUT_MS", default_value_t = DEFAULT_BUSY_TIMEOUT_MS)]
    busy_timeout_ms: u32,

    /// Session lifetime in hours
    #[arg(long, env = "ROTA_SESSION_TTL_HOURS", default_value_t = 1)]
    session_ttl_hours: i64,

    /// Reject trade proposals from employees who do not hold the schedule row
    #[arg(long, env = "ROTA_REQUIRE_TRADE_HOLDER")]
    require_trade_holder: bool,

    /// Reject assignments to a shift that already has a scheduled employee
    #[arg(long, env = "ROTA_REJECT_DOUBLE_BOOKING")]
    reject_double_booking: bool,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, env = "ROTA_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Email of a manager account to create at startup if missing
    #[arg(long, env = "ROTA_BOOTSTRAP_MANAGER_EMAIL", requires = "bootstrap_manager_password")]
    bootstrap_manager_email: Option<String>,

    /// Password for the bootstrap manager account
    #[arg(long, env = "ROTA_BOOTSTRAP_MANAGER_PASSWORD", hide_env_values = true)]
    bootstrap_manager_password: Option<String>,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Optional workflow checks.
    policy: StrictnessPolicy,
    /// Lifetime of new sessions.
    session_ttl: Duration,
}

// ========================================================================
// Wire request bodies
// ========================================================================

/// Body for `POST /api/register` and `POST /api/login`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CredentialsApiRequest {
    email: String,
    password: String,
}

/// Body for `POST /api/employees`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddEmployeeApiRequest {
    user_id: i64,
    #[serde(default)]
    phone: String,
    position: String,
}

/// Body for `POST /api/shifts`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateShiftApiRequest {
    shift_date: String,
    start_time: String,
    end_time: String,
    position: String,
    #[serde(default)]
    employee_id: Option<i64>,
}

/// Body for `POST /api/schedules`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignApiRequest {
    employee_id: i64,
    shift_id: i64,
}

/// Body for `PATCH /api/schedules/{id}/notes`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetNotesApiRequest {
    notes: String,
}

/// Body for `POST /api/shift-requests`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ProposeTradeApiRequest {
    target_employee_id: i64,
    schedule_id: i64,
}

/// Body for `POST /api/availability`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetAvailabilityApiRequest {
    day_of_week: String,
    period: String,
    available: bool,
}

/// Body for `PATCH /api/availability/override`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OverrideAvailabilityApiRequest {
    employee_id: i64,
    day_of_week: String,
    period: String,
    available: bool,
}

// ========================================================================
// Errors
// ========================================================================

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidInput { .. }
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Transient { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ========================================================================
// Identity
// ========================================================================

/// Handler for GET `/`.
async fn handle_root() -> &'static str {
    "API is working!"
}

/// Handler for POST `/api/register`.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CredentialsApiRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), HttpError> {
    info!("Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = register(
        &mut persistence,
        &RegisterRequest {
            email: req.email,
            password: req.password,
        },
    )?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CredentialsApiRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(
        &mut persistence,
        &LoginRequest {
            email: req.email,
            password: req.password,
        },
        app_state.session_ttl,
    )?;

    Ok(Json(response))
}

/// Handler for POST `/api/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, token): SessionIdentity,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(user_id = identity.user_id, "Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(logout(&mut persistence, &token)?))
}

/// Handler for GET `/api/whoami`.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(whoami(&mut persistence, &identity)?))
}

// ========================================================================
// Employee Directory
// ========================================================================

/// Handler for GET `/api/employees`.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    info!(user_id = identity.user_id, "Handling list employees request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_employees(&mut persistence)?))
}

/// Handler for POST `/api/employees`.
async fn handle_add_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Json(req): Json<AddEmployeeApiRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), HttpError> {
    info!(user_id = identity.user_id, target_user_id = req.user_id, "Handling add employee request");

    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeResponse = add_employee(
        &mut persistence,
        &identity,
        &AddEmployeeRequest {
            user_id: req.user_id,
            phone: req.phone,
            position: req.position,
        },
    )?;

    Ok((StatusCode::CREATED, Json(response)))
}

// ========================================================================
// Shift Catalog and Schedule Ledger
// ========================================================================

/// Handler for GET `/api/shifts`.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
) -> Result<Json<ListShiftsResponse>, HttpError> {
    info!(user_id = identity.user_id, "Handling list shifts request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_shifts(&mut persistence)?))
}

/// Handler for POST `/api/shifts`.
async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Json(req): Json<CreateShiftApiRequest>,
) -> Result<(StatusCode, Json<CreateShiftResponse>), HttpError> {
    info!(
        user_id = identity.user_id,
        shift_date = %req.shift_date,
        "Handling create shift request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateShiftResponse = create_shift(
        &mut persistence,
        &identity,
        &CreateShiftRequest {
            shift_date: req.shift_date,
            start_time: req.start_time,
            end_time: req.end_time,
            position: req.position,
            employee_id: req.employee_id,
        },
        app_state.policy,
    )?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/schedules`.
async fn handle_assign(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Json(req): Json<AssignApiRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), HttpError> {
    info!(
        user_id = identity.user_id,
        employee_id = req.employee_id,
        shift_id = req.shift_id,
        "Handling assign request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleResponse = assign(
        &mut persistence,
        &identity,
        &AssignRequest {
            employee_id: req.employee_id,
            shift_id: req.shift_id,
        },
        app_state.policy,
    )?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/my-schedule`.
async fn handle_my_schedule(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
) -> Result<Json<MyScheduleResponse>, HttpError> {
    info!(user_id = identity.user_id, "Handling my schedule request");

    let today: time::Date = OffsetDateTime::now_utc().date();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(my_schedule(&mut persistence, &identity, today)?))
}

/// Handler for PATCH `/api/schedules/{id}/call-off`.
async fn handle_call_off(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Path(schedule_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(user_id = identity.user_id, schedule_id, "Handling call-off request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(call_off(
        &mut persistence,
        &identity,
        schedule_id,
        app_state.policy,
    )?))
}

/// Handler for PATCH `/api/schedules/{id}/notes`.
async fn handle_set_notes(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Path(schedule_id): Path<i64>,
    Json(req): Json<SetNotesApiRequest>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    info!(user_id = identity.user_id, schedule_id, "Handling set notes request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(set_notes(
        &mut persistence,
        &identity,
        schedule_id,
        &SetNotesRequest { notes: req.notes },
        app_state.policy,
    )?))
}

// ========================================================================
// Trade Workflow
// ========================================================================

/// Handler for POST `/api/shift-requests`.
async fn handle_propose_trade(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Json(req): Json<ProposeTradeApiRequest>,
) -> Result<(StatusCode, Json<ShiftRequestResponse>), HttpError> {
    info!(
        user_id = identity.user_id,
        schedule_id = req.schedule_id,
        "Handling trade proposal"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ShiftRequestResponse = propose_trade(
        &mut persistence,
        &identity,
        &ProposeTradeRequest {
            target_employee_id: req.target_employee_id,
            schedule_id: req.schedule_id,
        },
        app_state.policy,
    )?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/shift-requests/pending`.
async fn handle_list_pending(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
) -> Result<Json<ListPendingResponse>, HttpError> {
    info!(user_id = identity.user_id, "Handling list pending requests");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_pending_requests(&mut persistence, &identity)?))
}

/// Handler for PATCH `/api/shift-requests/{id}/approve`.
async fn handle_approve_trade(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Path(request_id): Path<i64>,
) -> Result<Json<ShiftRequestResponse>, HttpError> {
    info!(user_id = identity.user_id, request_id, "Handling trade approval");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(approve_trade(
        &mut persistence,
        &identity,
        request_id,
        app_state.policy,
    )?))
}

/// Handler for PATCH `/api/shift-requests/{id}/reject`.
async fn handle_reject_trade(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Path(request_id): Path<i64>,
) -> Result<Json<ShiftRequestResponse>, HttpError> {
    info!(user_id = identity.user_id, request_id, "Handling trade rejection");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reject_trade(
        &mut persistence,
        &identity,
        request_id,
        app_state.policy,
    )?))
}

// ========================================================================
// Notifications
// ========================================================================

/// Handler for GET `/api/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
) -> Result<Json<ListNotificationsResponse>, HttpError> {
    info!(user_id = identity.user_id, "Handling list notifications request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_notifications(&mut persistence, &identity)?))
}

/// Handler for PATCH `/api/notifications/{id}/read`.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Path(notification_id): Path<i64>,
) -> Result<Json<NotificationResponse>, HttpError> {
    info!(user_id = identity.user_id, notification_id, "Handling mark read request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(mark_notification_read(
        &mut persistence,
        &identity,
        notification_id,
    )?))
}

// ========================================================================
// Availability Register
// ========================================================================

/// Handler for POST `/api/availability`.
async fn handle_set_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Json(req): Json<SetAvailabilityApiRequest>,
) -> Result<(StatusCode, Json<AvailabilityResponse>), HttpError> {
    info!(user_id = identity.user_id, "Handling set availability request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AvailabilityResponse = set_availability(
        &mut persistence,
        &identity,
        &SetAvailabilityRequest {
            day_of_week: req.day_of_week,
            period: req.period,
            available: req.available,
        },
        app_state.policy,
    )?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PATCH `/api/availability/override`.
async fn handle_override_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
    Json(req): Json<OverrideAvailabilityApiRequest>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    info!(
        user_id = identity.user_id,
        employee_id = req.employee_id,
        "Handling availability override"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(override_availability(
        &mut persistence,
        &identity,
        &OverrideAvailabilityRequest {
            employee_id: req.employee_id,
            day_of_week: req.day_of_week,
            period: req.period,
            available: req.available,
        },
        app_state.policy,
    )?))
}

/// Handler for GET `/api/availability/all`.
async fn handle_list_all_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionIdentity(identity, _): SessionIdentity,
) -> Result<Json<ListAvailabilityResponse>, HttpError> {
    info!(user_id = identity.user_id, "Handling list availability request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_all_availability(&mut persistence, &identity)?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/api/register", post(handle_register))
        .route("/api/login", post(handle_login))
        .route("/api/logout", post(handle_logout))
        .route("/api/whoami", get(handle_whoami))
        .route(
            "/api/employees",
            get(handle_list_employees).post(handle_add_employee),
        )
        .route(
            "/api/shifts",
            get(handle_list_shifts).post(handle_create_shift),
        )
        .route("/api/schedules", post(handle_assign))
        .route("/api/my-schedule", get(handle_my_schedule))
        .route("/api/schedules/{id}/call-off", patch(handle_call_off))
        .route("/api/schedules/{id}/notes", patch(handle_set_notes))
        .route("/api/shift-requests", post(handle_propose_trade))
        .route("/api/shift-requests/pending", get(handle_list_pending))
        .route(
            "/api/shift-requests/{id}/approve",
            patch(handle_approve_trade),
        )
        .route("/api/shift-requests/{id}/reject", patch(handle_reject_trade))
        .route("/api/notifications", get(handle_list_notifications))
        .route(
            "/api/notifications/{id}/read",
            patch(handle_mark_notification_read),
        )
        .route("/api/availability", post(handle_set_availability))
        .route(
            "/api/availability/override",
            patch(handle_override_availability),
        )
        .route("/api/availability/all", get(handle_list_all_availability))
        .with_state(app_state)
}

/// Creates the configured manager account unless it already exists.
fn bootstrap_manager(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let normalized: String = email.trim().to_lowercase();
    let existing = persistence
        .get_user_by_email(&normalized)
        .map_err(rota_api::translate_persistence_error)?;

    if existing.is_some() {
        info!("Bootstrap manager already exists");
        return Ok(());
    }

    create_manager(persistence, email, password)?;
    info!("Bootstrap manager created");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing Rota Server");

    let mut persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url, args.busy_timeout_ms)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path, args.busy_timeout_ms)?
    } else {
        warn!("Using in-memory database; data is lost on exit");
        Persistence::new_in_memory()?
    };

    if let (Some(email), Some(password)) = (
        &args.bootstrap_manager_email,
        &args.bootstrap_manager_password,
    ) {
        bootstrap_manager(&mut persistence, email, password)?;
    }

    let policy: StrictnessPolicy = StrictnessPolicy {
        require_requester_holds_slot: args.require_trade_holder,
        reject_double_booking: args.reject_double_booking,
    };
    info!(
        require_trade_holder = policy.require_requester_holds_slot,
        reject_double_booking = policy.reject_double_booking,
        session_ttl_hours = args.session_ttl_hours,
        "Workflow policy"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        policy,
        session_ttl: Duration::hours(args.session_ttl_hours),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const PASSWORD: &str = "Password123";
    const MANAGER_EMAIL: &str = "boss@example.com";

    fn test_state() -> AppState {
        let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
        create_manager(&mut persistence, MANAGER_EMAIL, PASSWORD).unwrap();
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            policy: StrictnessPolicy::default(),
            session_ttl: Duration::hours(1),
        }
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request: Request<Body> = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status: StatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn login_as(app: &Router, email: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": email, "password": PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    /// Registers an employee and returns its token and employee id.
    async fn register_employee(app: &Router, email: &str) -> (String, i64) {
        let (status, _) = send(
            app,
            "POST",
            "/api/register",
            None,
            Some(json!({ "email": email, "password": PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let token: String = login_as(app, email).await;
        let (_, me) = send(app, "GET", "/api/whoami", Some(&token), None).await;
        let employee_id: i64 = me["employee_id"].as_i64().unwrap();
        (token, employee_id)
    }

    #[tokio::test]
    async fn test_root_reports_liveness() {
        let app: Router = build_router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"API is working!");
    }

    #[tokio::test]
    async fn test_register_login_whoami() {
        let app: Router = build_router(test_state());

        let (status, body) = send(
            &app,
            "POST",
            "/api/register",
            None,
            Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");

        let token: String = login_as(&app, "alice@example.com").await;
        let (status, me) = send(&app, "GET", "/api/whoami", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "alice@example.com");
        assert_eq!(me["role"], "employee");

        let (status, _) = send(&app, "POST", "/api/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", "/api/whoami", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let app: Router = build_router(test_state());

        let (status, body) = send(
            &app,
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": MANAGER_EMAIL, "password": "Wrong12345" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_missing_authorization_header_is_unauthorized() {
        let app: Router = build_router(test_state());

        let (status, body) = send(&app, "GET", "/api/shifts", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing Authorization header");
    }

    #[tokio::test]
    async fn test_employee_cannot_create_shift() {
        let app: Router = build_router(test_state());
        let (token, _) = register_employee(&app, "alice@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/shifts",
            Some(&token),
            Some(json!({
                "shift_date": "2024-06-01",
                "start_time": "09:00",
                "end_time": "17:00",
                "position": "Server"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Access denied. Only managers can create shifts.");
    }

    #[tokio::test]
    async fn test_inverted_shift_times_are_bad_request() {
        let app: Router = build_router(test_state());
        let boss: String = login_as(&app, MANAGER_EMAIL).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/shifts",
            Some(&boss),
            Some(json!({
                "shift_date": "2024-06-01",
                "start_time": "17:00",
                "end_time": "09:00",
                "position": "Server"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_trade_flow_over_http() {
        let app: Router = build_router(test_state());
        let boss: String = login_as(&app, MANAGER_EMAIL).await;
        let (alice, alice_id) = register_employee(&app, "alice@example.com").await;
        let (bob, bob_id) = register_employee(&app, "bob@example.com").await;

        let (status, created) = send(
            &app,
            "POST",
            "/api/shifts",
            Some(&boss),
            Some(json!({
                "shift_date": "2024-06-01",
                "start_time": "09:00",
                "end_time": "17:00",
                "position": "Server",
                "employee_id": alice_id
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let schedule_id: i64 = created["schedule"]["id"].as_i64().unwrap();

        let (status, proposed) = send(
            &app,
            "POST",
            "/api/shift-requests",
            Some(&alice),
            Some(json!({ "target_employee_id": bob_id, "schedule_id": schedule_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let request_id: i64 = proposed["request"]["id"].as_i64().unwrap();

        let (status, pending) =
            send(&app, "GET", "/api/shift-requests/pending", Some(&boss), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pending["requests"].as_array().unwrap().len(), 1);

        let approve_uri: String = format!("/api/shift-requests/{request_id}/approve");
        let (status, body) = send(&app, "PATCH", &approve_uri, Some(&boss), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Shift trade approved and updated");
        assert_eq!(body["request"]["id"], request_id);
        assert_eq!(body["request"]["status"], "approved");

        let (status, _) = send(&app, "PATCH", &approve_uri, Some(&boss), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, inbox) = send(&app, "GET", "/api/notifications", Some(&alice), None).await;
        let notifications: &Vec<Value> = inbox["notifications"].as_array().unwrap();
        assert_eq!(notifications.len(), 1);
        let notification_id: i64 = notifications[0]["id"].as_i64().unwrap();

        let read_uri: String = format!("/api/notifications/{notification_id}/read");
        let (status, _) = send(&app, "PATCH", &read_uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, read) = send(&app, "PATCH", &read_uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read["notification"]["read"], true);
    }

    #[tokio::test]
    async fn test_availability_override_and_listing() {
        let app: Router = build_router(test_state());
        let boss: String = login_as(&app, MANAGER_EMAIL).await;
        let (alice, alice_id) = register_employee(&app, "alice@example.com").await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/availability",
            Some(&alice),
            Some(json!({ "day_of_week": "Monday", "period": "morning", "available": true })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/availability/override",
            Some(&boss),
            Some(json!({
                "employee_id": alice_id,
                "day_of_week": "Monday",
                "period": "morning",
                "available": false
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Availability override successful");

        let (status, listing) =
            send(&app, "GET", "/api/availability/all", Some(&boss), None).await;
        assert_eq!(status, StatusCode::OK);
        let rows: &Vec<Value> = listing["availability"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["available"], false);

        let (status, _) = send(&app, "GET", "/api/availability/all", Some(&alice), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
