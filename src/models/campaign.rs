//! Campaign model matching the admin frontend contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default copy for campaigns stored without a description.
pub const DEFAULT_DESCRIPTION: &str = "Diária para dois adultos";
/// Default price prefix shown next to the promotional price.
pub const DEFAULT_PRICE_LABEL: &str = "A partir de";
/// Placeholder shown when a campaign has no uploaded image.
pub const DEFAULT_IMAGE: &str = "/placeholder.svg";
/// Accent color used by the gallery card wave when none is set.
pub const DEFAULT_WAVE_COLOR: &str = "#0EA5E9";
/// Fallback stay length when dates are missing or inverted.
pub const DEFAULT_DURATION_NIGHTS: i64 = 2;

/// Publication status of a campaign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Inactive,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CampaignStatus::Active),
            "inactive" => Some(CampaignStatus::Inactive),
            _ => None,
        }
    }
}

/// A category associated to a campaign through the join table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// A promotional campaign shown on the public gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price_original: f64,
    pub price_promotional: f64,
    pub price_label: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub duration_nights: i64,
    /// Display label derived from `duration_nights` ("4 diárias").
    pub duration: String,
    /// Whether the gallery strikes the original price through.
    #[serde(default)]
    pub has_discount: bool,
    pub status: CampaignStatus,
    /// Legacy single-category label, kept for backward compatibility.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    pub wave_color: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Whether a promotional price qualifies for the strike-through treatment.
pub fn has_discount(price_original: f64, price_promotional: f64) -> bool {
    price_promotional > 0.0 && price_promotional < price_original
}

/// Number of nights between two ISO dates.
///
/// Falls back to [`DEFAULT_DURATION_NIGHTS`] when either date is missing,
/// unparseable, or the range is inverted. A same-day range counts as one
/// night.
pub fn duration_nights(start_date: Option<&str>, end_date: Option<&str>) -> i64 {
    let parsed = start_date
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .zip(end_date.and_then(|e| NaiveDate::parse_from_str(e, "%Y-%m-%d").ok()));

    match parsed {
        Some((start, end)) if end >= start => (end - start).num_days().max(1),
        _ => DEFAULT_DURATION_NIGHTS,
    }
}

/// Display label for a stay length.
pub fn duration_label(nights: i64) -> String {
    if nights == 1 {
        "1 diária".to_string()
    } else {
        format!("{} diárias", nights)
    }
}

/// Request body for creating a new campaign.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_original: Option<f64>,
    #[serde(default)]
    pub price_promotional: Option<f64>,
    #[serde(default)]
    pub price_label: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
    #[serde(default)]
    pub category: Option<String>,
    /// Category ids written to the join table.
    #[serde(default)]
    pub category_ids: Option<Vec<String>>,
    #[serde(default)]
    pub booking_url: Option<String>,
    #[serde(default)]
    pub wave_color: Option<String>,
}

/// Request body for updating an existing campaign.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_original: Option<f64>,
    #[serde(default)]
    pub price_promotional: Option<f64>,
    #[serde(default)]
    pub price_label: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_ids: Option<Vec<String>>,
    #[serde(default)]
    pub booking_url: Option<String>,
    #[serde(default)]
    pub wave_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_same_day_is_one_night() {
        assert_eq!(duration_nights(Some("2025-09-01"), Some("2025-09-01")), 1);
    }

    #[test]
    fn test_duration_two_days_apart() {
        assert_eq!(duration_nights(Some("2025-09-01"), Some("2025-09-03")), 2);
    }

    #[test]
    fn test_duration_four_nights() {
        assert_eq!(duration_nights(Some("2025-09-01"), Some("2025-09-05")), 4);
    }

    #[test]
    fn test_duration_inverted_range_defaults() {
        assert_eq!(duration_nights(Some("2025-09-05"), Some("2025-09-01")), 2);
    }

    #[test]
    fn test_duration_missing_dates_default() {
        assert_eq!(duration_nights(None, None), 2);
        assert_eq!(duration_nights(Some("2025-09-01"), None), 2);
        assert_eq!(duration_nights(None, Some("2025-09-01")), 2);
    }

    #[test]
    fn test_duration_unparseable_dates_default() {
        assert_eq!(duration_nights(Some("setembro"), Some("2025-09-05")), 2);
    }

    #[test]
    fn test_duration_label_pluralization() {
        assert_eq!(duration_label(1), "1 diária");
        assert_eq!(duration_label(2), "2 diárias");
        assert_eq!(duration_label(4), "4 diárias");
    }

    #[test]
    fn test_discount_shown_only_when_promotional_below_original() {
        assert!(has_discount(1000.0, 800.0));
        assert!(!has_discount(800.0, 800.0));
        assert!(!has_discount(800.0, 1000.0));
        assert!(!has_discount(1000.0, 0.0));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(CampaignStatus::from_str("active"), Some(CampaignStatus::Active));
        assert_eq!(CampaignStatus::from_str("inactive"), Some(CampaignStatus::Inactive));
        assert_eq!(CampaignStatus::from_str("draft"), None);
        assert_eq!(CampaignStatus::Active.as_str(), "active");
    }
}
