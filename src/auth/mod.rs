//! Session-based authentication module.
//!
//! Credential checking is delegated entirely to the repository's
//! verification operation; this module turns its outcome into a session and
//! guards the admin routes. Token comparison is constant-time to mitigate
//! timing attacks.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::db::Repository;
use crate::errors::{
    codes, AppError, ErrorDetails, ErrorResponse, GENERIC_LOGIN_FAILURE, GENERIC_LOGIN_TRANSPORT,
};
use crate::models::Session;
use crate::session::SessionStore;

/// Translates credentials into sessions.
pub struct Authenticator {
    repo: Repository,
    sessions: SessionStore,
}

impl Authenticator {
    pub fn new(repo: Repository, sessions: SessionStore) -> Self {
        Self { repo, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Attempt a login.
    ///
    /// A failed verification call is reported with a generic retry message;
    /// the underlying cause only reaches the log. A negative outcome uses
    /// the verifier's message when it carries one.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let email = email.trim().to_lowercase();

        let outcome = match self.repo.verify_credentials(&email, password).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Credential verification failed: {}", e);
                return Err(AppError::AuthTransport(GENERIC_LOGIN_TRANSPORT.to_string()));
            }
        };

        let message = outcome
            .message
            .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string());
        let Some(user) = outcome.user.filter(|_| outcome.success) else {
            return Err(AppError::InvalidCredentials(message));
        };

        let session = Session::new(user);
        self.sessions.save(&session)?;
        tracing::info!("Login realizado para {}", session.user.email);

        Ok(session)
    }

    /// Clear the session unconditionally. Never fails.
    pub fn logout(&self) {
        self.sessions.clear();
        tracing::info!("Logout realizado");
    }

    /// The currently stored session, if any is valid.
    pub fn current(&self) -> Option<Session> {
        self.sessions.load()
    }
}

/// Session authentication layer for the admin routes.
///
/// Expects the session token as a bearer credential and re-checks expiry on
/// every request through the store's self-healing load.
pub async fn session_auth_layer(sessions: SessionStore, request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let Some(provided) = provided else {
        return unauthorized_response("Missing session token");
    };

    match sessions.load() {
        Some(session) if constant_time_compare(&provided, &session.token) => {
            next.run(request).await
        }
        _ => unauthorized_response("Invalid or expired session"),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("token-abc-123", "token-abc-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("token-abc-123", "token-abc-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-token"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }
}
