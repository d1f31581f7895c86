// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use rota_domain::{Role, User};
use rota_persistence::{Persistence, SessionData, UserData};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError, translate_persistence_error};

/// A verified caller.
///
/// Every protected operation receives one of these explicitly. The core
/// trusts the pair completely and never re-verifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// The authenticated user.
    pub user_id: i64,
    /// The user's role.
    pub role: Role,
}

impl Identity {
    /// Creates a new identity.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Each operation is gated by comparing the caller's role tag; there is
/// no per-role type hierarchy.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a caller may create shifts.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_create_shift(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "create shifts")
    }

    /// Checks if a caller may assign employees to shifts.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_assign(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "assign employees")
    }

    /// Checks if a caller may call off an employee.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_call_off(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "call off employees")
    }

    /// Checks if a caller may edit schedule notes.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_set_notes(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "update shift notes")
    }

    /// Checks if a caller may propose a trade.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is an employee.
    pub fn authorize_propose_trade(identity: &Identity) -> Result<(), AuthError> {
        Self::employee_only(identity, "request trades")
    }

    /// Checks if a caller may review pending trades.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_list_pending(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "view pending requests")
    }

    /// Checks if a caller may approve a trade.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_approve_trade(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "approve trades")
    }

    /// Checks if a caller may reject a trade.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_reject_trade(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "reject trades")
    }

    /// Checks if a caller may record their own availability.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is an employee.
    pub fn authorize_set_availability(identity: &Identity) -> Result<(), AuthError> {
        Self::employee_only(identity, "set availability")
    }

    /// Checks if a caller may override another employee's availability.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_override_availability(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "override availability")
    }

    /// Checks if a caller may list every employee's availability.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_list_all_availability(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "view all availability")
    }

    /// Checks if a caller may add employee profiles.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is a manager.
    pub fn authorize_add_employee(identity: &Identity) -> Result<(), AuthError> {
        Self::manager_only(identity, "add employees")
    }

    /// Checks if a caller may view their own upcoming schedule.
    ///
    /// # Errors
    ///
    /// Returns an error unless the caller is an employee.
    pub fn authorize_view_own_schedule(identity: &Identity) -> Result<(), AuthError> {
        Self::employee_only(identity, "view their schedule")
    }

    fn manager_only(identity: &Identity, action: &str) -> Result<(), AuthError> {
        match identity.role {
            Role::Manager => Ok(()),
            Role::Employee => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("manager"),
            }),
        }
    }

    fn employee_only(identity: &Identity, action: &str) -> Result<(), AuthError> {
        match identity.role {
            Role::Employee => Ok(()),
            Role::Manager => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("employee"),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime.
    pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(1);

    /// Message returned for an unknown email and for a wrong password alike.
    const INVALID_CREDENTIALS: &'static str = "Invalid email or password";

    /// Authenticates a user and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The login email
    /// * `password` - The plain text password
    /// * `ttl` - How long the session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `identity`, `user`)
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for an unknown email or wrong password,
    /// and a translated storage error if the database fails.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        ttl: Duration,
    ) -> Result<(String, Identity, User), ApiError> {
        let normalized: String = email.trim().to_lowercase();

        let Some(user) = persistence
            .get_user_by_email(&normalized)
            .map_err(translate_persistence_error)?
        else {
            debug!("Login for unknown email");
            return Err(Self::invalid_credentials());
        };

        let verified: bool = Persistence::verify_password(password, &user.password_hash)
            .map_err(translate_persistence_error)?;
        if !verified {
            debug!(user_id = user.user_id, "Login with wrong password");
            return Err(Self::invalid_credentials());
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::format_expiry(OffsetDateTime::now_utc() + ttl)?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at)
            .map_err(translate_persistence_error)?;

        info!(user_id = user.user_id, "User logged in");

        let identity: Identity = Identity::new(user.user_id, user.role);
        Ok((session_token, identity, user.into_user()))
    }

    /// Validates a session token and returns the caller's identity.
    ///
    /// Expired sessions are deleted before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the token is unknown or expired or
    /// its user no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<Identity, ApiError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| {
                ApiError::from(AuthError::AuthenticationFailed {
                    reason: String::from("Invalid session token"),
                })
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| {
                warn!(session_id = session.session_id, error = %e, "Unparseable session expiry");
                ApiError::from(AuthError::AuthenticationFailed {
                    reason: String::from("Invalid session token"),
                })
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            persistence
                .delete_session(session_token)
                .map_err(translate_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            }
            .into());
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| {
                ApiError::from(AuthError::AuthenticationFailed {
                    reason: String::from("User not found"),
                })
            })?;

        Ok(Identity::new(user.user_id, user.role))
    }

    /// Logs out by deleting the session.
    ///
    /// Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
        persistence
            .delete_session(session_token)
            .map_err(translate_persistence_error)
    }

    /// Generates an opaque 256-bit session token as hex.
    fn generate_session_token() -> String {
        (0..4)
            .map(|_| format!("{:016x}", rand::random::<u64>()))
            .collect()
    }

    fn format_expiry(expires_at: OffsetDateTime) -> Result<String, ApiError> {
        expires_at.format(&Iso8601::DEFAULT).map_err(|e| ApiError::Internal {
            message: format!("Failed to format session expiry: {e}"),
        })
    }

    fn invalid_credentials() -> ApiError {
        AuthError::AuthenticationFailed {
            reason: String::from(Self::INVALID_CREDENTIALS),
        }
        .into()
    }
}
