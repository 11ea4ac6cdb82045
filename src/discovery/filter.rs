//! Per-stage filter predicates

use super::criteria::{Availability, FilterCriteria, PriceRange};
use crate::models::{PropertyRecord, UserShareMap};

/// Case-insensitive substring match over the searchable text fields
///
/// `needle` must already be trimmed and lowercased; empty matches all.
pub fn matches_search(record: &PropertyRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &record.title,
        &record.address,
        &record.city,
        &record.state,
        &record.owner_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

pub fn matches_availability(
    record: &PropertyRecord,
    availability: Availability,
    shares: &UserShareMap,
) -> bool {
    match availability {
        Availability::All => true,
        Availability::Fraction => record.has_open_fraction(),
        Availability::Rent => record.rent_available,
        Availability::Loan => record.loan_available,
        Availability::MyProperties => shares.owns(&record.id),
    }
}

pub fn matches_price(record: &PropertyRecord, range: PriceRange) -> bool {
    range.contains_cents(record.price)
}

/// Normalized search needle for a criteria set
pub fn search_needle(criteria: &FilterCriteria) -> String {
    criteria.search_term.trim().to_lowercase()
}

/// Every filter stage, in pipeline order
pub fn matches_all(
    record: &PropertyRecord,
    criteria: &FilterCriteria,
    needle: &str,
    shares: &UserShareMap,
) -> bool {
    matches_search(record, needle)
        && criteria.property_type.matches(&record.property_type)
        && criteria.status.matches(&record.status)
        && criteria.ownership_type.matches(&record.ownership_type)
        && matches_availability(record, criteria.availability, shares)
        && matches_price(record, criteria.price_range)
}
