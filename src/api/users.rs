//! Admin user management API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{AdminUser, CreateUserRequest, UpdateUserRequest};
use crate::AppState;

/// GET /api/users - List all admin users.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<AdminUser>> {
    let users = state.repo.list_users().await?;
    success(users)
}

/// POST /api/users - Create a new admin user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<AdminUser> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let user = state.repo.create_user(&request).await?;
    success(user)
}

/// PUT /api/users/:id - Update an admin user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<AdminUser> {
    if let Some(password) = &request.password {
        if password.is_empty() {
            return Err(AppError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }
    }

    let user = state.repo.update_user(&id, &request).await?;
    success(user)
}

/// DELETE /api/users/:id - Delete an admin user.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_user(&id).await?;
    success(())
}
