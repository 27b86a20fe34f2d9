//! Campaign query engine for the public gallery.
//!
//! Pure functions over an in-memory campaign set: free-text and category
//! filtering plus facet derivation. Input order is preserved and inputs are
//! never mutated, so calling twice with the same arguments yields the same
//! result.

use crate::models::{Campaign, Category};

/// Filter campaigns by search term and category.
///
/// The term matches case-insensitively as a substring of the title or
/// description; an empty term matches everything. The category matches the
/// legacy label or any joined category name; an empty category matches
/// everything.
pub fn filter_campaigns<'a>(
    campaigns: &'a [Campaign],
    search_term: &str,
    category: &str,
) -> Vec<&'a Campaign> {
    let term = search_term.to_lowercase();

    campaigns
        .iter()
        .filter(|campaign| matches_search(campaign, &term) && matches_category(campaign, category))
        .collect()
}

fn matches_search(campaign: &Campaign, lowered_term: &str) -> bool {
    lowered_term.is_empty()
        || campaign.title.to_lowercase().contains(lowered_term)
        || campaign.description.to_lowercase().contains(lowered_term)
}

fn matches_category(campaign: &Campaign, category: &str) -> bool {
    category.is_empty()
        || campaign.category == category
        || campaign.categories.iter().any(|c| c.name == category)
}

/// Derive the selectable category facet list.
///
/// The facets are the distinct union of every legacy category label and
/// every joined category name, in first-seen order. When an externally
/// ordered category list is supplied, names it covers come first in that
/// display order (names without any campaign are dropped); legacy labels
/// with no category row keep their facet and follow in first-seen order.
pub fn category_facets(campaigns: &[Campaign], ordered: Option<&[Category]>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for campaign in campaigns {
        if !campaign.category.is_empty() && !seen.contains(&campaign.category) {
            seen.push(campaign.category.clone());
        }
        for category_ref in &campaign.categories {
            if !seen.contains(&category_ref.name) {
                seen.push(category_ref.name.clone());
            }
        }
    }

    let Some(categories) = ordered else {
        return seen;
    };

    let mut facets: Vec<String> = categories
        .iter()
        .filter(|category| seen.contains(&category.name))
        .map(|category| category.name.clone())
        .collect();
    for name in seen {
        if !facets.contains(&name) {
            facets.push(name);
        }
    }
    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        duration_label, CampaignStatus, CategoryRef, DEFAULT_IMAGE, DEFAULT_PRICE_LABEL,
        DEFAULT_WAVE_COLOR,
    };

    fn test_campaign(id: &str, title: &str, description: &str, category: &str) -> Campaign {
        Campaign {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            price_original: 1000.0,
            price_promotional: 800.0,
            price_label: DEFAULT_PRICE_LABEL.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            start_date: None,
            end_date: None,
            duration_nights: 2,
            duration: duration_label(2),
            has_discount: true,
            status: CampaignStatus::Active,
            category: category.to_string(),
            categories: Vec::new(),
            booking_url: None,
            wave_color: DEFAULT_WAVE_COLOR.to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn test_set() -> Vec<Campaign> {
        vec![
            test_campaign("1", "Setembro 2025", "Pacote de primavera", "Temporada"),
            test_campaign(
                "2",
                "Festival Gastronômico",
                "Jantar incluso",
                "Gastronômico",
            ),
        ]
    }

    #[test]
    fn test_empty_filters_return_input_in_order() {
        let campaigns = test_set();
        let filtered = filter_campaigns(&campaigns, "", "");
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_filter_is_pure_and_idempotent() {
        let campaigns = test_set();
        let first: Vec<String> = filter_campaigns(&campaigns, "festival", "")
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let second: Vec<String> = filter_campaigns(&campaigns, "festival", "")
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(first, second);
        // Inputs stay untouched.
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].title, "Setembro 2025");
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let campaigns = test_set();
        let filtered = filter_campaigns(&campaigns, "festival", "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_search_matches_description() {
        let campaigns = test_set();
        let filtered = filter_campaigns(&campaigns, "PRIMAVERA", "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_category_matches_legacy_field() {
        let campaigns = test_set();
        let filtered = filter_campaigns(&campaigns, "", "Temporada");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_category_matches_joined_names() {
        let mut campaigns = test_set();
        campaigns[0].categories.push(CategoryRef {
            id: "cat-1".to_string(),
            name: "Familiar".to_string(),
        });

        let filtered = filter_campaigns(&campaigns, "", "Familiar");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_search_and_category_combine() {
        let campaigns = test_set();
        assert!(filter_campaigns(&campaigns, "festival", "Temporada").is_empty());
        assert_eq!(filter_campaigns(&campaigns, "festival", "Gastronômico").len(), 1);
    }

    #[test]
    fn test_facets_first_seen_order() {
        let mut campaigns = test_set();
        campaigns[1].categories.push(CategoryRef {
            id: "cat-1".to_string(),
            name: "Familiar".to_string(),
        });

        let facets = category_facets(&campaigns, None);
        assert_eq!(facets, vec!["Temporada", "Gastronômico", "Familiar"]);
    }

    #[test]
    fn test_facets_dedupe() {
        let campaigns = vec![
            test_campaign("1", "A", "", "Temporada"),
            test_campaign("2", "B", "", "Temporada"),
        ];
        assert_eq!(category_facets(&campaigns, None), vec!["Temporada"]);
    }

    #[test]
    fn test_facets_follow_external_display_order() {
        let campaigns = test_set();
        let ordered = vec![
            Category {
                id: "cat-g".to_string(),
                name: "Gastronômico".to_string(),
                description: None,
                slug: "gastronomico".to_string(),
                display_order: 0,
                created_at: "2025-01-01T00:00:00Z".to_string(),
            },
            Category {
                id: "cat-t".to_string(),
                name: "Temporada".to_string(),
                description: None,
                slug: "temporada".to_string(),
                display_order: 1,
                created_at: "2025-01-01T00:00:00Z".to_string(),
            },
            Category {
                id: "cat-r".to_string(),
                name: "Romântico".to_string(),
                description: None,
                slug: "romantico".to_string(),
                display_order: 2,
                created_at: "2025-01-01T00:00:00Z".to_string(),
            },
        ];

        // External order wins; "Romântico" has no campaigns and is dropped.
        let facets = category_facets(&campaigns, Some(&ordered));
        assert_eq!(facets, vec!["Gastronômico", "Temporada"]);
    }

    #[test]
    fn test_facets_keep_legacy_labels_missing_from_ordered_list() {
        let mut campaigns = test_set();
        campaigns.push(test_campaign("3", "Pacote VIP", "", "Exclusivo"));

        let ordered = vec![Category {
            id: "cat-g".to_string(),
            name: "Gastronômico".to_string(),
            description: None,
            slug: "gastronomico".to_string(),
            display_order: 0,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }];

        // Labels with no category row stay filterable, after the ordered ones.
        let facets = category_facets(&campaigns, Some(&ordered));
        assert_eq!(facets, vec!["Gastronômico", "Temporada", "Exclusivo"]);
    }
}
