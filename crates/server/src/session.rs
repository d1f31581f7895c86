// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides an Axum extractor that resolves a bearer token
//! to the caller's [`Identity`] at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use rota_api::{ApiError, AuthenticationService, Identity};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Extractor for authenticated callers.
///
/// Carries the verified identity and the bearer token it was resolved
/// from, so logout can delete the session.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionIdentity(identity, _token): SessionIdentity,
/// ) -> Result<Json<Response>, HttpError> {
///     // identity: Identity { user_id, role }
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Responds with HTTP 401 Unauthorized if:
/// - The Authorization header is missing or not `Bearer <token>`
/// - The token is unknown or expired
pub struct SessionIdentity(pub Identity, pub String);

impl FromRequestParts<AppState> for SessionIdentity {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!("Authorization header does not start with 'Bearer '");
                SessionError::InvalidAuthorizationHeader
            })?;

        let mut persistence = state.persistence.lock().await;
        let identity: Identity = AuthenticationService::validate_session(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::Rejected(e)
            })?;

        debug!(
            user_id = identity.user_id,
            role = %identity.role,
            "Session validated"
        );

        Ok(Self(identity, token.to_string()))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    Rejected(ApiError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: &str = match self {
            Self::MissingAuthorizationHeader => "Missing Authorization header",
            Self::InvalidAuthorizationHeader => {
                "Invalid Authorization header format. Expected: 'Bearer <token>'"
            }
            Self::Rejected(err) => return HttpError::from(err).into_response(),
        };

        HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
        .into_response()
    }
}
