//! Recommendation score
//!
//! A static heuristic over record fields, used for the default ordering.
//! Pure in `(record, shares, now)`.

use super::config::DiscoveryConfig;
use crate::models::{PropertyRecord, UserShareMap};
use chrono::{DateTime, Utc};

/// Score a record with the default weights
pub fn score(record: &PropertyRecord, shares: &UserShareMap, now: DateTime<Utc>) -> f64 {
    score_with(record, shares, now, &DiscoveryConfig::default())
}

pub fn score_with(
    record: &PropertyRecord,
    shares: &UserShareMap,
    now: DateTime<Utc>,
    config: &DiscoveryConfig,
) -> f64 {
    let weights = &config.weights;
    let mut total = record.rating_or_zero() * weights.rating;

    if record.has_open_fraction() {
        total += weights.open_fraction;
    }
    if let Some(expected_return) = record.expected_return {
        total += expected_return * weights.expected_return;
    }
    if config.is_hot_city(&record.city) {
        total += weights.hot_city;
    }
    if !shares.owns(&record.id) {
        total += weights.not_owned;
    }
    // Future-dated listings have a negative age and count as recent.
    if now.signed_duration_since(record.created_at) < config.recency_window {
        total += weights.recent;
    }

    total
}
