// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential extraction at the server boundary.
//!
//! Every protected request carries the caller's login and password in the
//! `X-Agenda-Login` and `X-Agenda-Password` headers. They are checked
//! against the configured credential table on each request; there are no
//! sessions.

use agenda_api::{AuthError, AuthenticationService};
use agenda_domain::Actor;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Header carrying the login.
pub const LOGIN_HEADER: &str = "x-agenda-login";

/// Header carrying the password.
pub const PASSWORD_HEADER: &str = "x-agenda-password";

/// Extractor for the authenticated actor.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     AuthenticatedUser(actor): AuthenticatedUser,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: Actor
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if either header is missing or not valid UTF-8,
/// or the login and password do not match a configured user.
pub struct AuthenticatedUser(pub Actor);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = CredentialError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let login: &str = header_value(parts, LOGIN_HEADER)?;
        let password: &str = header_value(parts, PASSWORD_HEADER)?;

        let actor: Actor = AuthenticationService::authenticate(&state.credentials, login, password)
            .map_err(|e| {
                warn!(login, error = %e, "Authentication failed");
                CredentialError::Rejected(e)
            })?;

        debug!(login = actor.login(), role = %actor.role(), "Request authenticated");
        Ok(Self(actor))
    }
}

fn header_value<'p>(parts: &'p Parts, name: &'static str) -> Result<&'p str, CredentialError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing credential header");
            CredentialError::MissingHeader(name)
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Credential header is not valid UTF-8");
            CredentialError::InvalidHeader(name)
        })
}

/// Credential extraction errors, rendered as HTTP 401.
#[derive(Debug)]
pub enum CredentialError {
    /// A credential header is missing.
    MissingHeader(&'static str),
    /// A credential header is not valid UTF-8.
    InvalidHeader(&'static str),
    /// The credentials did not match.
    Rejected(AuthError),
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header"),
            Self::Rejected(e) => format!("Authentication failed: {e}"),
        };
        ErrorResponse::new("authentication_failed", message).into_status(StatusCode::UNAUTHORIZED)
    }
}
