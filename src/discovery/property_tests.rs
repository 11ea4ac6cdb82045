use super::criteria::{Availability, Filter, FilterCriteria, PriceRange, SortBy};
use super::engine::discover;
use super::filter::{matches_all, search_needle};
use super::score::score;
use crate::models::fixtures::now;
use crate::models::{OwnershipType, PropertyRecord, PropertyType, UserShareMap, VerificationStatus};
use chrono::Duration;
use proptest::prelude::*;

fn property_type() -> impl Strategy<Value = PropertyType> {
    prop_oneof![
        Just(PropertyType::Residential),
        Just(PropertyType::Commercial),
        Just(PropertyType::Industrial),
        Just(PropertyType::Land),
    ]
}

fn status() -> impl Strategy<Value = VerificationStatus> {
    prop_oneof![
        Just(VerificationStatus::Verified),
        Just(VerificationStatus::Pending),
        Just(VerificationStatus::Unverified),
    ]
}

fn ownership() -> impl Strategy<Value = OwnershipType> {
    prop_oneof![
        Just(OwnershipType::Full),
        Just(OwnershipType::Fractional),
        Just(OwnershipType::Shared),
    ]
}

fn availability() -> impl Strategy<Value = Availability> {
    prop_oneof![
        Just(Availability::All),
        Just(Availability::Fraction),
        Just(Availability::Rent),
        Just(Availability::Loan),
        Just(Availability::MyProperties),
    ]
}

fn price_range() -> impl Strategy<Value = PriceRange> {
    prop_oneof![
        Just(PriceRange::All),
        Just(PriceRange::Under1m),
        Just(PriceRange::From1mTo3m),
        Just(PriceRange::From3mTo5m),
        Just(PriceRange::Over5m),
    ]
}

fn sort_by() -> impl Strategy<Value = SortBy> {
    prop_oneof![
        Just(SortBy::AiRecommended),
        Just(SortBy::Newest),
        Just(SortBy::Oldest),
        Just(SortBy::PriceHigh),
        Just(SortBy::PriceLow),
        Just(SortBy::Rating),
        Just(SortBy::Views),
        Just(SortBy::Availability),
    ]
}

fn filter_of<T: Clone + std::fmt::Debug + 'static>(
    inner: impl Strategy<Value = T> + 'static,
) -> impl Strategy<Value = Filter<T>> {
    prop_oneof![Just(Filter::All), inner.prop_map(Filter::Value)]
}

fn record_strategy() -> impl Strategy<Value = PropertyRecord> {
    (
        (
            prop::sample::select(vec!["Miami", "Austin", "New York", "Boise"]),
            property_type(),
            status(),
            ownership(),
            0i64..800_000_000,
            proptest::option::of(0u32..50),
        ),
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(0u8..=10),
            0u64..500,
            0i64..90,
        ),
    )
        .prop_map(
            |(
                (city, property_type, status, ownership_type, price, available_shares),
                (fraction_available, rent_available, loan_available, rating, views, age_days),
            )| PropertyRecord {
                id: String::new(),
                title: format!("{} listing", city),
                address: "1 Main St".to_string(),
                city: city.to_string(),
                state: "XX".to_string(),
                property_type,
                price,
                status,
                ownership_type,
                available_shares,
                total_shares: available_shares.map(|s| s + 10),
                fraction_available,
                rent_available,
                loan_available,
                rating: rating.map(|r| f64::from(r) / 2.0),
                expected_return: None,
                views,
                created_at: now() - Duration::days(age_days),
                owner_name: "Owner".to_string(),
            },
        )
}

/// Records with unique ids, plus shares held in some of them
fn inventory() -> impl Strategy<Value = (Vec<PropertyRecord>, UserShareMap)> {
    (
        prop::collection::vec(record_strategy(), 0..40),
        prop::collection::vec(0u32..3, 40),
    )
        .prop_map(|(mut records, held)| {
            let mut shares = UserShareMap::new();
            for (i, r) in records.iter_mut().enumerate() {
                r.id = format!("p{}", i);
                if held[i] > 0 {
                    shares.insert(r.id.clone(), held[i]);
                }
            }
            (records, shares)
        })
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::sample::select(vec!["", "miami", "NEW", " main ", "zzz"]),
        filter_of(property_type()),
        filter_of(status()),
        filter_of(ownership()),
        availability(),
        price_range(),
        sort_by(),
        1usize..5,
        1usize..15,
    )
        .prop_map(
            |(
                search,
                property_type,
                status,
                ownership_type,
                availability,
                price_range,
                sort_by,
                page,
                page_size,
            )| FilterCriteria {
                search_term: search.to_string(),
                property_type,
                status,
                ownership_type,
                availability,
                price_range,
                sort_by,
                page,
                page_size,
            },
        )
}

fn all_matches(
    records: &[PropertyRecord],
    criteria: &FilterCriteria,
    shares: &UserShareMap,
) -> Vec<PropertyRecord> {
    let unpaged = FilterCriteria {
        page: 1,
        page_size: records.len().max(1),
        ..criteria.clone()
    };
    discover(records, &unpaged, shares, now()).unwrap().items
}

proptest! {
    #[test]
    fn discover_is_idempotent((records, shares) in inventory(), criteria in criteria_strategy()) {
        let first = discover(&records, &criteria, &shares, now()).unwrap();
        let second = discover(&records, &criteria, &shares, now()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_item_passes_every_filter(
        (records, shares) in inventory(),
        criteria in criteria_strategy(),
    ) {
        let needle = search_needle(&criteria);
        let page = discover(&records, &criteria, &shares, now()).unwrap();
        for item in &page.items {
            prop_assert!(matches_all(item, &criteria, &needle, &shares));
        }
        let expected = records
            .iter()
            .filter(|r| matches_all(r, &criteria, &needle, &shares))
            .count();
        prop_assert_eq!(page.total_matched, expected);
    }

    #[test]
    fn narrowing_never_grows_matches(
        (records, shares) in inventory(),
        criteria in criteria_strategy(),
        narrow_type in property_type(),
        narrow_availability in availability(),
    ) {
        let base = FilterCriteria {
            property_type: Filter::All,
            availability: Availability::All,
            ..criteria.clone()
        };
        let narrowed = FilterCriteria {
            property_type: Filter::Value(narrow_type),
            availability: narrow_availability,
            ..criteria
        };
        let wide = discover(&records, &base, &shares, now()).unwrap();
        let narrow = discover(&records, &narrowed, &shares, now()).unwrap();
        prop_assert!(narrow.total_matched <= wide.total_matched);
    }

    #[test]
    fn page_is_contiguous_slice((records, shares) in inventory(), criteria in criteria_strategy()) {
        let page = discover(&records, &criteria, &shares, now()).unwrap();
        let full = all_matches(&records, &criteria, &shares);

        prop_assert!(page.items.len() <= criteria.page_size);
        let start = (criteria.page - 1) * criteria.page_size;
        let expected: Vec<PropertyRecord> =
            full.into_iter().skip(start).take(criteria.page_size).collect();
        prop_assert_eq!(page.items, expected);
    }

    #[test]
    fn equal_keys_keep_input_order(
        (records, shares) in inventory(),
        criteria in criteria_strategy(),
    ) {
        let full = all_matches(&records, &criteria, &shares);
        let position = |id: &str| id[1..].parse::<usize>().unwrap();

        for pair in full.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let tied = match criteria.sort_by {
                SortBy::AiRecommended => score(a, &shares, now()) == score(b, &shares, now()),
                SortBy::Newest | SortBy::Oldest => a.created_at == b.created_at,
                SortBy::PriceHigh | SortBy::PriceLow => a.price == b.price,
                SortBy::Rating => a.rating_or_zero() == b.rating_or_zero(),
                SortBy::Views => a.views == b.views,
                SortBy::Availability => {
                    a.available_shares_or_zero() == b.available_shares_or_zero()
                }
            };
            if tied {
                prop_assert!(position(&a.id) < position(&b.id));
            }
        }
    }

    #[test]
    fn score_is_independent_of_call_order((records, shares) in inventory()) {
        let forward: Vec<f64> = records.iter().map(|r| score(r, &shares, now())).collect();
        let mut backward: Vec<f64> =
            records.iter().rev().map(|r| score(r, &shares, now())).collect();
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn fraction_filter_never_returns_closed_offers(
        (records, shares) in inventory(),
        criteria in criteria_strategy(),
    ) {
        let criteria = FilterCriteria { availability: Availability::Fraction, ..criteria };
        let page = discover(&records, &criteria, &shares, now()).unwrap();
        for item in &page.items {
            prop_assert!(item.fraction_available);
            prop_assert!(item.available_shares.unwrap_or(0) > 0);
        }
    }
}
