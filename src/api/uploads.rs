//! Campaign image upload endpoint.
//!
//! Stores accepted images under the served uploads directory and returns
//! their public URL. Validation happens before anything touches the disk.

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Largest accepted image payload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const OVERSIZE_MESSAGE: &str = "A imagem deve ter no máximo 5MB.";

/// Response body for a stored upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/uploads - Store a campaign image.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<UploadResponse> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !content_type.starts_with("image/") {
        return Err(AppError::Validation(
            "Apenas arquivos de imagem são aceitos.".to_string(),
        ));
    }

    if body.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(OVERSIZE_MESSAGE.to_string()));
    }

    let filename = format!("{}.{}", uuid::Uuid::new_v4(), extension_for(content_type));
    let path = state.config.uploads_dir.join(&filename);

    tokio::fs::create_dir_all(&state.config.uploads_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create uploads dir: {}", e)))?;
    tokio::fs::write(&path, &body)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

    tracing::info!("Stored upload {} ({} bytes)", filename, body.len());

    success(UploadResponse {
        url: format!("/uploads/{}", filename),
    })
}

/// Rewrap the body-limit rejection so oversize uploads answer with the
/// standard error envelope instead of a bare 413.
pub async fn envelope_oversize_upload(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(OVERSIZE_MESSAGE.to_string()).into_response();
    }
    response
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        _ => "img",
    }
}
