//! Category API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    Category, CreateCategoryRequest, MoveCategoryRequest, UpdateCategoryRequest,
};
use crate::AppState;

/// GET /api/categories - List all categories in display order.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = state.repo.list_categories().await?;
    success(categories)
}

/// POST /api/categories - Create a new category.
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<Category> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Nome da categoria é obrigatório.".to_string(),
        ));
    }

    let category = state.repo.create_category(&request).await?;
    success(category)
}

/// PUT /api/categories/:id - Update a category.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> ApiResult<Category> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "Nome da categoria é obrigatório.".to_string(),
            ));
        }
    }

    let category = state.repo.update_category(&id, &request).await?;
    success(category)
}

/// DELETE /api/categories/:id - Delete a category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_category(&id).await?;
    success(())
}

/// POST /api/categories/:id/move - Swap a category with its neighbor.
///
/// Returns the full reordered list; boundary moves return it unchanged.
pub async fn move_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveCategoryRequest>,
) -> ApiResult<Vec<Category>> {
    let categories = state.repo.move_category(&id, request.direction).await?;
    success(categories)
}
