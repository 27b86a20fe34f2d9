//! Authentication API endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse, Session};
use crate::AppState;

/// Response body for logout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub message: String,
}

/// POST /api/auth/login - Exchange credentials for a session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Email e senha são obrigatórios.".to_string(),
        ));
    }

    let session = state.auth.login(&request.email, &request.password).await?;

    let message = format!("Bem-vindo, {}!", session.user.name);
    success(LoginResponse {
        token: session.token,
        user: session.user,
        expires_at: session.expires_at,
        message,
    })
}

/// POST /api/auth/logout - Clear the active session.
pub async fn logout(State(state): State<AppState>) -> ApiResult<LogoutResponse> {
    state.auth.logout();
    success(LogoutResponse {
        message: "Você foi desconectado com sucesso.".to_string(),
    })
}

/// GET /api/auth/session - Return the active session.
pub async fn current_session(State(state): State<AppState>) -> ApiResult<Session> {
    match state.auth.current() {
        Some(session) => success(session),
        None => Err(AppError::Unauthorized("No active session".to_string())),
    }
}
