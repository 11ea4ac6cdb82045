//! Query criteria for property discovery
//!
//! [`RawCriteria`] is the loosely-typed shape a UI or the CLI hands us;
//! [`FilterCriteria`] is the validated form the engine runs on.

use crate::error::{DiscoveryError, Result};
use crate::models::{OwnershipType, PropertyType, VerificationStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Either no constraint, or a single required value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Value(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Value(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = DiscoveryError>,
{
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        if is_wildcard(s) {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Value)
        }
    }
}

fn is_wildcard(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("all")
}

/// Which offering a listing must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    All,
    Fraction,
    Rent,
    Loan,
    MyProperties,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::All => "all",
            Availability::Fraction => "fraction",
            Availability::Rent => "rent",
            Availability::Loan => "loan",
            Availability::MyProperties => "my-properties",
        }
    }
}

impl FromStr for Availability {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        if is_wildcard(s) {
            return Ok(Availability::All);
        }
        match s.trim().to_lowercase().as_str() {
            "fraction" => Ok(Availability::Fraction),
            "rent" => Ok(Availability::Rent),
            "loan" => Ok(Availability::Loan),
            "my-properties" => Ok(Availability::MyProperties),
            _ => Err(DiscoveryError::invalid("availability", s)),
        }
    }
}

/// Price bucket, in whole currency units
///
/// Buckets are half-open so every price falls in exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    Under1m,
    From1mTo3m,
    From3mTo5m,
    Over5m,
}

const MILLION: i64 = 1_000_000;

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::All => "all",
            PriceRange::Under1m => "under-1m",
            PriceRange::From1mTo3m => "1m-3m",
            PriceRange::From3mTo5m => "3m-5m",
            PriceRange::Over5m => "over-5m",
        }
    }

    /// Lower bound (inclusive) and upper bound (exclusive), whole units
    pub fn bounds(&self) -> (i64, Option<i64>) {
        match self {
            PriceRange::All => (0, None),
            PriceRange::Under1m => (0, Some(MILLION)),
            PriceRange::From1mTo3m => (MILLION, Some(3 * MILLION)),
            PriceRange::From3mTo5m => (3 * MILLION, Some(5 * MILLION)),
            PriceRange::Over5m => (5 * MILLION, None),
        }
    }

    /// Whether a price given in cents falls in this bucket
    pub fn contains_cents(&self, price_cents: i64) -> bool {
        if *self == PriceRange::All {
            return true;
        }
        // Compare in cents so sub-unit amounts never round across a bound.
        let (low, high) = self.bounds();
        let low = low * 100;
        price_cents >= low && high.map_or(true, |high| price_cents < high * 100)
    }
}

impl FromStr for PriceRange {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        if is_wildcard(s) {
            return Ok(PriceRange::All);
        }
        match s.trim().to_lowercase().as_str() {
            "under-1m" => Ok(PriceRange::Under1m),
            "1m-3m" => Ok(PriceRange::From1mTo3m),
            "3m-5m" => Ok(PriceRange::From3mTo5m),
            "over-5m" => Ok(PriceRange::Over5m),
            _ => Err(DiscoveryError::invalid("priceRange", s)),
        }
    }
}

/// Ordering of the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    AiRecommended,
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
    Rating,
    Views,
    Availability,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::AiRecommended => "ai-recommended",
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::PriceHigh => "price-high",
            SortBy::PriceLow => "price-low",
            SortBy::Rating => "rating",
            SortBy::Views => "views",
            SortBy::Availability => "availability",
        }
    }
}

impl FromStr for SortBy {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ai-recommended" => Ok(SortBy::AiRecommended),
            "newest" => Ok(SortBy::Newest),
            "oldest" => Ok(SortBy::Oldest),
            "price-high" => Ok(SortBy::PriceHigh),
            "price-low" => Ok(SortBy::PriceLow),
            "rating" => Ok(SortBy::Rating),
            "views" => Ok(SortBy::Views),
            "availability" => Ok(SortBy::Availability),
            _ => Err(DiscoveryError::invalid("sortBy", s)),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a criteria value we don't recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CriteriaPolicy {
    /// Fail the whole query
    #[default]
    Strict,
    /// Fall back to the field's wildcard (or default sort) and log it
    Lenient,
}

/// Criteria exactly as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCriteria {
    pub search_term: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub ownership_type: Option<String>,
    pub availability: Option<String>,
    pub price_range: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Validated discovery criteria, built fresh for each query
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub property_type: Filter<PropertyType>,
    pub status: Filter<VerificationStatus>,
    pub ownership_type: Filter<OwnershipType>,
    pub availability: Availability,
    pub price_range: PriceRange,
    pub sort_by: SortBy,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            property_type: Filter::All,
            status: Filter::All,
            ownership_type: Filter::All,
            availability: Availability::All,
            price_range: PriceRange::All,
            sort_by: SortBy::AiRecommended,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterCriteria {
    /// Parse caller-supplied criteria under the given policy
    ///
    /// Zero `page` or `page_size` is rejected under either policy.
    pub fn from_raw(raw: &RawCriteria, policy: CriteriaPolicy) -> Result<Self> {
        let criteria = Self {
            search_term: raw.search_term.clone().unwrap_or_default(),
            property_type: parse_field(raw.property_type.as_deref(), policy)?,
            status: parse_field(raw.status.as_deref(), policy)?,
            ownership_type: parse_field(raw.ownership_type.as_deref(), policy)?,
            availability: parse_field(raw.availability.as_deref(), policy)?,
            price_range: parse_field(raw.price_range.as_deref(), policy)?,
            sort_by: parse_field(raw.sort_by.as_deref(), policy)?,
            page: raw.page.unwrap_or(1),
            page_size: raw.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        };
        criteria.validate()?;
        Ok(criteria)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(DiscoveryError::invalid("page", "0"));
        }
        if self.page_size == 0 {
            return Err(DiscoveryError::invalid("pageSize", "0"));
        }
        Ok(())
    }

    /// Same criteria, first page; callers use this whenever anything but
    /// the page changes
    pub fn first_page(&self) -> Self {
        Self {
            page: 1,
            ..self.clone()
        }
    }
}

fn parse_field<T>(value: Option<&str>, policy: CriteriaPolicy) -> Result<T>
where
    T: FromStr<Err = DiscoveryError> + Default,
{
    let Some(value) = value else {
        return Ok(T::default());
    };
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(err) => match policy {
            CriteriaPolicy::Strict => Err(err),
            CriteriaPolicy::Lenient => {
                warn!("Ignoring unrecognized criteria value: {}", err);
                Ok(T::default())
            }
        },
    }
}
