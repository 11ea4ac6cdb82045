use super::config::DiscoveryConfig;
use super::criteria::SortBy;
use super::score::score_with;
use crate::models::{PropertyRecord, UserShareMap};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Stable sort of matched records by the chosen key
///
/// Scores are only computed for [`SortBy::AiRecommended`], once per record.
pub fn sort_matches(
    matches: &mut Vec<&PropertyRecord>,
    sort_by: SortBy,
    shares: &UserShareMap,
    now: DateTime<Utc>,
    config: &DiscoveryConfig,
) {
    match sort_by {
        SortBy::AiRecommended => {
            let mut scored: Vec<(f64, &PropertyRecord)> = matches
                .iter()
                .map(|r| (score_with(r, shares, now, config), *r))
                .collect();
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
            *matches = scored.into_iter().map(|(_, r)| r).collect();
        }
        _ => matches.sort_by(|a, b| compare(a, b, sort_by)),
    }
}

fn compare(a: &PropertyRecord, b: &PropertyRecord, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::AiRecommended => Ordering::Equal,
        SortBy::Newest => b.created_at.cmp(&a.created_at),
        SortBy::Oldest => a.created_at.cmp(&b.created_at),
        SortBy::PriceHigh => b.price.cmp(&a.price),
        SortBy::PriceLow => a.price.cmp(&b.price),
        SortBy::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        SortBy::Views => b.views.cmp(&a.views),
        SortBy::Availability => b
            .available_shares_or_zero()
            .cmp(&a.available_shares_or_zero()),
    }
}
