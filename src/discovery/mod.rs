//! Property discovery: filter, score, sort and paginate listings
//!
//! Stages run in a fixed order: search, type, status, ownership,
//! availability and price filters, then scoring (recommended order only),
//! a stable sort, and finally pagination.

pub mod config;
pub mod criteria;
pub mod engine;
pub mod filter;
pub mod score;
pub mod sort;

#[cfg(test)]
mod property_tests;

pub use config::{DiscoveryConfig, ScoringWeights};
pub use criteria::{
    Availability, CriteriaPolicy, Filter, FilterCriteria, PriceRange, RawCriteria, SortBy,
};
pub use engine::{discover, DiscoveryEngine, DiscoveryPage};
pub use score::{score, score_with};
