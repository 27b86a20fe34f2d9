//! Campaign API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Campaign, CreateCampaignRequest, UpdateCampaignRequest};
use crate::AppState;

/// GET /api/campaigns - List all campaigns, newest first.
pub async fn list_campaigns(State(state): State<AppState>) -> ApiResult<Vec<Campaign>> {
    let campaigns = state.repo.list_campaigns().await?;
    success(campaigns)
}

/// GET /api/campaigns/:id - Get a single campaign.
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Campaign> {
    match state.repo.get_campaign(&id).await? {
        Some(campaign) => success(campaign),
        None => Err(AppError::NotFound(format!("Campaign {} not found", id))),
    }
}

/// POST /api/campaigns - Create a new campaign.
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CreateCampaignRequest>,
) -> ApiResult<Campaign> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let campaign = state.repo.create_campaign(&request).await?;
    warn_when_unbookable(&campaign);
    success(campaign)
}

/// PUT /api/campaigns/:id - Update a campaign.
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCampaignRequest>,
) -> ApiResult<Campaign> {
    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }
    }

    let campaign = state.repo.update_campaign(&id, &request).await?;
    warn_when_unbookable(&campaign);
    success(campaign)
}

/// DELETE /api/campaigns/:id - Delete a campaign.
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_campaign(&id).await?;
    success(())
}

/// A campaign without a booking link still publishes; it just cannot sell.
fn warn_when_unbookable(campaign: &Campaign) {
    let missing = campaign
        .booking_url
        .as_deref()
        .map_or(true, |url| url.trim().is_empty());
    if missing {
        tracing::warn!(
            "Campaign '{}' ({}) has no booking URL",
            campaign.title,
            campaign.id
        );
    }
}
