// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use rota::CoreError;
use rota_domain::DomainError;
use rota_persistence::PersistenceError;
use tracing::error;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted, phrased as "create shifts".
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Only {required_role}s can {action}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller's role lacks the required permission.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found or is not in the required state.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Storage was busy or unreachable; the caller may retry.
    Transient {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Access denied. Only {required_role}s can {action}.")
            }
            Self::DomainRuleViolation { message, .. } | Self::ResourceNotFound { message, .. } => {
                write!(f, "{message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Transient { message } => {
                write!(f, "Service temporarily unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Forbidden {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let invalid = |field: &str| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    };

    match &err {
        DomainError::InvalidDate { .. } => invalid("shift_date"),
        DomainError::InvalidTime { .. } => invalid("time"),
        DomainError::InvalidTimeRange { .. } => invalid("end_time"),
        DomainError::InvalidPosition(_) => invalid("position"),
        DomainError::InvalidPeriod(_) => invalid("period"),
        DomainError::InvalidDayOfWeek(_) => invalid("day_of_week"),
        DomainError::InvalidRole(_) => invalid("role"),
        DomainError::InvalidEmail(_) => invalid("email"),
        DomainError::EmptyNotificationMessage => invalid("message"),
        DomainError::InvalidScheduleStatus(_) | DomainError::InvalidRequestStatus(_) => {
            ApiError::Internal { message }
        }
        DomainError::RequesterDoesNotHoldSlot { .. } => ApiError::DomainRuleViolation {
            rule: String::from("requester_holds_slot"),
            message,
        },
        DomainError::ShiftAlreadyAssigned { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_active_assignment"),
            message,
        },
        DomainError::ScheduleUnassigned(_) => ApiError::DomainRuleViolation {
            rule: String::from("call_off_requires_employee"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ScheduleNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: String::from("Schedule not found"),
        },
        CoreError::RequestNotPending(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift request"),
            message: String::from("Pending request not found"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage details are logged here and never returned to the caller.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::ForeignKeyViolation(detail) => {
            tracing::warn!(detail, "Write referenced a missing record");
            ApiError::InvalidInput {
                field: String::from("reference"),
                message: String::from("Referenced record does not exist"),
            }
        }
        PersistenceError::UniqueViolation(message) => ApiError::DomainRuleViolation {
            rule: String::from("unique"),
            message,
        },
        PersistenceError::Rejected(err) => translate_domain_error(err),
        PersistenceError::Transient(detail) => {
            tracing::warn!(detail, "Storage busy");
            ApiError::Transient {
                message: String::from("Storage is busy, please retry"),
            }
        }
        other => {
            error!(error = %other, "Storage failure");
            ApiError::Internal {
                message: String::from("An unexpected error occurred"),
            }
        }
    }
}
