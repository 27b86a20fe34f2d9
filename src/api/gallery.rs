//! Public gallery endpoint.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::models::{Campaign, CampaignStatus};
use crate::query;
use crate::AppState;

/// Gallery query parameters.
#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    /// Free-text search over title and description.
    #[serde(default)]
    pub search: String,
    /// Category facet filter.
    #[serde(default)]
    pub category: String,
}

/// Gallery listing with the selectable category facets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub campaigns: Vec<Campaign>,
    pub categories: Vec<String>,
    pub total: usize,
}

/// GET /api/gallery - Filtered public listing of active campaigns.
pub async fn gallery(
    State(state): State<AppState>,
    Query(params): Query<GalleryQuery>,
) -> ApiResult<GalleryResponse> {
    let active: Vec<Campaign> = state
        .repo
        .list_campaigns()
        .await?
        .into_iter()
        .filter(|c| c.status == CampaignStatus::Active)
        .collect();

    // Facets follow the admin-defined display order and span the whole
    // active set, not just the filtered page.
    let ordered = state.repo.list_categories().await?;
    let categories = query::category_facets(&active, Some(&ordered));

    let campaigns: Vec<Campaign> = query::filter_campaigns(&active, &params.search, &params.category)
        .into_iter()
        .cloned()
        .collect();
    let total = campaigns.len();

    success(GalleryResponse {
        campaigns,
        categories,
        total,
    })
}
