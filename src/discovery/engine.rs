use super::config::DiscoveryConfig;
use super::criteria::{CriteriaPolicy, FilterCriteria, RawCriteria};
use super::filter::{matches_all, search_needle};
use super::sort::sort_matches;
use crate::error::Result;
use crate::models::{PropertyRecord, UserShareMap};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// One page of discovery results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryPage {
    pub items: Vec<PropertyRecord>,
    /// Matches after filtering, before pagination
    pub total_matched: usize,
    pub page: usize,
    pub page_size: usize,
}

impl DiscoveryPage {
    pub fn total_pages(&self) -> usize {
        self.total_matched.div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Filter, score, sort and paginate property listings
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryEngine {
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn discover(
        &self,
        records: &[PropertyRecord],
        criteria: &FilterCriteria,
        shares: &UserShareMap,
        now: DateTime<Utc>,
    ) -> Result<DiscoveryPage> {
        criteria.validate()?;

        let needle = search_needle(criteria);
        let mut matches: Vec<&PropertyRecord> = records
            .iter()
            .filter(|r| matches_all(r, criteria, &needle, shares))
            .collect();
        let total_matched = matches.len();

        debug!(
            "Discovery matched {} of {} records (sort: {})",
            total_matched,
            records.len(),
            criteria.sort_by
        );

        sort_matches(&mut matches, criteria.sort_by, shares, now, &self.config);

        let start = (criteria.page - 1).saturating_mul(criteria.page_size);
        let items: Vec<PropertyRecord> = matches
            .into_iter()
            .skip(start)
            .take(criteria.page_size)
            .cloned()
            .collect();

        Ok(DiscoveryPage {
            items,
            total_matched,
            page: criteria.page,
            page_size: criteria.page_size,
        })
    }

    /// Parse raw criteria under `policy`, then discover
    pub fn discover_raw(
        &self,
        records: &[PropertyRecord],
        raw: &RawCriteria,
        policy: CriteriaPolicy,
        shares: &UserShareMap,
        now: DateTime<Utc>,
    ) -> Result<DiscoveryPage> {
        let criteria = FilterCriteria::from_raw(raw, policy)?;
        self.discover(records, &criteria, shares, now)
    }
}

/// Discover with the default configuration
pub fn discover(
    records: &[PropertyRecord],
    criteria: &FilterCriteria,
    shares: &UserShareMap,
    now: DateTime<Utc>,
) -> Result<DiscoveryPage> {
    DiscoveryEngine::new().discover(records, criteria, shares, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::criteria::{Availability, Filter, PriceRange, SortBy};
    use crate::error::DiscoveryError;
    use crate::models::fixtures::{now, record};
    use crate::models::PropertyType;
    use chrono::Duration;

    fn ids(page: &DiscoveryPage) -> Vec<&str> {
        page.items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_miami_fraction_listing_ranks_first() {
        let mut miami = record("miami");
        miami.price = 250_000_000;
        miami.city = "Miami".to_string();
        miami.rating = Some(4.8);
        miami.fraction_available = true;
        miami.available_shares = Some(45);
        miami.total_shares = Some(100);

        let mut other = record("other");
        other.price = 150_000_000;
        other.rating = Some(4.9);

        let mut pricey = record("pricey");
        pricey.price = 900_000_000;
        pricey.rating = Some(5.0);

        let criteria = FilterCriteria {
            sort_by: SortBy::AiRecommended,
            price_range: PriceRange::From1mTo3m,
            ..Default::default()
        };
        let records = [other, miami, pricey];
        let page = discover(&records, &criteria, &UserShareMap::new(), now()).unwrap();

        assert_eq!(page.total_matched, 2);
        assert_eq!(ids(&page), ["miami", "other"]);
    }

    #[test]
    fn test_sold_out_fraction_excluded() {
        let mut r = record("p1");
        r.fraction_available = true;
        r.available_shares = Some(0);

        let criteria = FilterCriteria {
            availability: Availability::Fraction,
            ..Default::default()
        };
        let page = discover(&[r], &criteria, &UserShareMap::new(), now()).unwrap();
        assert_eq!(page.total_matched, 0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_search_matches_city_case_insensitively() {
        let mut r = record("sf");
        r.city = "San Francisco".to_string();

        let criteria = FilterCriteria {
            search_term: "san francisco".to_string(),
            ..Default::default()
        };
        let page = discover(&[r, record("other")], &criteria, &UserShareMap::new(), now()).unwrap();
        assert_eq!(ids(&page), ["sf"]);
    }

    #[test]
    fn test_second_page_of_twenty_five() {
        let records: Vec<PropertyRecord> = (0..25)
            .map(|i| {
                let mut r = record(&format!("p{:02}", i));
                r.created_at = now() - Duration::days(i);
                r
            })
            .collect();

        let criteria = FilterCriteria {
            sort_by: SortBy::Newest,
            page: 2,
            page_size: 12,
            ..Default::default()
        };
        let page = discover(&records, &criteria, &UserShareMap::new(), now()).unwrap();

        assert_eq!(page.total_matched, 25);
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.items.first().unwrap().id, "p12");
        assert_eq!(page.items.last().unwrap().id, "p23");
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_type_filter_excludes_other_types() {
        let mut r = record("shop");
        r.property_type = PropertyType::Commercial;

        let criteria = FilterCriteria {
            property_type: Filter::Value(PropertyType::Residential),
            ..Default::default()
        };
        let page = discover(&[r], &criteria, &UserShareMap::new(), now()).unwrap();
        assert_eq!(page.total_matched, 0);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let criteria = FilterCriteria {
            page: 5,
            page_size: 2,
            ..Default::default()
        };
        let records = [record("a"), record("b")];
        let page = discover(&records, &criteria, &UserShareMap::new(), now()).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_matched, 2);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let criteria = FilterCriteria {
            page_size: 0,
            ..Default::default()
        };
        let err = discover(&[record("a")], &criteria, &UserShareMap::new(), now()).unwrap_err();
        assert_eq!(err, DiscoveryError::invalid("pageSize", "0"));
    }

    #[test]
    fn test_my_properties_uses_share_map() {
        let shares: UserShareMap = [("b", 10)].into_iter().collect();
        let criteria = FilterCriteria {
            availability: Availability::MyProperties,
            ..Default::default()
        };
        let page = discover(&[record("a"), record("b")], &criteria, &shares, now()).unwrap();
        assert_eq!(ids(&page), ["b"]);
    }

    #[test]
    fn test_discover_raw_policies() {
        let engine = DiscoveryEngine::new();
        let records = [record("a")];
        let raw = RawCriteria {
            ownership_type: Some("timeshare".to_string()),
            ..Default::default()
        };

        let err = engine
            .discover_raw(&records, &raw, CriteriaPolicy::Strict, &UserShareMap::new(), now())
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidCriteria { field: "ownershipType", .. }));

        let page = engine
            .discover_raw(&records, &raw, CriteriaPolicy::Lenient, &UserShareMap::new(), now())
            .unwrap();
        assert_eq!(page.total_matched, 1);
    }

    #[test]
    fn test_input_records_untouched() {
        let mut a = record("a");
        a.price = 1;
        let mut b = record("b");
        b.price = 2;
        let records = vec![a, b];
        let before = records.clone();

        let criteria = FilterCriteria {
            sort_by: SortBy::PriceHigh,
            ..Default::default()
        };
        let page = discover(&records, &criteria, &UserShareMap::new(), now()).unwrap();
        assert_eq!(ids(&page), ["b", "a"]);
        assert_eq!(records, before);
    }
}
