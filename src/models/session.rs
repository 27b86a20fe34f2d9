//! Session and authentication types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// How long a session stays valid after login.
pub const SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Identity of an authenticated admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// An authenticated session with a fixed absolute expiry.
///
/// The token is a plain random value with no cryptographic signing; it is
/// only as trustworthy as the store holding it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
    /// Unix timestamp in milliseconds.
    pub expires_at: i64,
}

impl Session {
    /// Create a session for `user` expiring [`SESSION_TTL_MS`] from now.
    pub fn new(user: AuthUser) -> Self {
        Self {
            token: uuid::Uuid::new_v4().to_string(),
            user,
            expires_at: Utc::now().timestamp_millis() + SESSION_TTL_MS,
        }
    }

    /// A session is valid iff its expiry lies in the future.
    pub fn is_valid(&self, now_ms: i64) -> bool {
        self.expires_at > now_ms
    }
}

/// Result of the credential-verification procedure.
///
/// An absent user with `success: true` is treated as a failed verification;
/// the authenticator never trusts a partial outcome.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub success: bool,
    pub message: Option<String>,
    pub user: Option<AuthUser>,
}

impl VerifyOutcome {
    pub fn rejected() -> Self {
        Self {
            success: false,
            message: None,
            user: None,
        }
    }
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
    pub expires_at: i64,
    /// User-visible notification ("Bem-vindo, ...!").
    pub message: String,
}
