use crate::error::DiscoveryError;
use crate::models::{OwnershipType, PropertyRecord, PropertyType, UserShareMap, VerificationStatus};
use crate::stores::traits::{PropertyStore, UserShareLedger};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, info};

pub const DEMO_USER: &str = "demo-user";

/// In-memory listing store
pub struct MemoryPropertyStore {
    records: RwLock<Vec<PropertyRecord>>,
}

impl MemoryPropertyStore {
    /// Create a store over the given records, rejecting malformed ones
    /// and repeated ids
    pub fn new(records: Vec<PropertyRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(DiscoveryError::malformed(&record.id, "duplicate id").into());
            }
        }
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Store seeded with the demo marketplace listings
    pub fn with_mock_listings() -> Self {
        info!("📋 Seeding in-memory store with mock marketplace listings");
        Self {
            records: RwLock::new(mock_listings()),
        }
    }

    /// Apply `update` to one record under the write lock
    pub(crate) async fn update<T>(
        &self,
        id: &str,
        update: impl FnOnce(&mut PropertyRecord) -> T,
    ) -> Result<T> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .with_context(|| format!("Unknown property: {}", id))?;
        Ok(update(record))
    }

    pub(crate) async fn snapshot(&self) -> Vec<PropertyRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn list(&self) -> Result<Vec<PropertyRecord>> {
        Ok(self.snapshot().await)
    }

    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn record_view(&self, id: &str) -> Result<u64> {
        let views = self
            .update(id, |record| {
                record.views += 1;
                record.views
            })
            .await?;
        debug!("Property {} now has {} views", id, views);
        Ok(views)
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}

/// In-memory share holdings, keyed by user
#[derive(Default)]
pub struct MemoryShareLedger {
    holdings: HashMap<String, UserShareMap>,
}

impl MemoryShareLedger {
    pub fn new(holdings: HashMap<String, UserShareMap>) -> Self {
        Self { holdings }
    }

    /// Ledger matching the mock listings: the demo user holds shares in two
    pub fn with_mock_holdings() -> Self {
        let demo: UserShareMap = [("deed-002", 12), ("deed-005", 3)].into_iter().collect();
        Self::new(HashMap::from([(DEMO_USER.to_string(), demo)]))
    }
}

#[async_trait]
impl UserShareLedger for MemoryShareLedger {
    async fn shares_for(&self, user: &str) -> Result<UserShareMap> {
        Ok(self.holdings.get(user).cloned().unwrap_or_default())
    }
}

struct Seed {
    id: &'static str,
    title: &'static str,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    property_type: PropertyType,
    price_dollars: i64,
    status: VerificationStatus,
    ownership_type: OwnershipType,
    shares: Option<(u32, u32)>,
    offers: (bool, bool, bool),
    rating: Option<f64>,
    expected_return: Option<f64>,
    views: u64,
    age_days: i64,
    owner_name: &'static str,
}

/// Demo listings covering every type, status and offering
fn mock_listings() -> Vec<PropertyRecord> {
    let seeds = [
        Seed {
            id: "deed-001",
            title: "Bayfront Loft",
            address: "120 Biscayne Blvd",
            city: "Miami",
            state: "FL",
            property_type: PropertyType::Residential,
            price_dollars: 2_500_000,
            status: VerificationStatus::Verified,
            ownership_type: OwnershipType::Fractional,
            shares: Some((45, 100)),
            offers: (true, false, true),
            rating: Some(4.8),
            expected_return: Some(6.5),
            views: 342,
            age_days: 12,
            owner_name: "Marisol Vega",
        },
        Seed {
            id: "deed-002",
            title: "Mission Street Retail Block",
            address: "2100 Mission St",
            city: "San Francisco",
            state: "CA",
            property_type: PropertyType::Commercial,
            price_dollars: 4_750_000,
            status: VerificationStatus::Verified,
            ownership_type: OwnershipType::Shared,
            shares: Some((20, 200)),
            offers: (true, true, false),
            rating: Some(4.5),
            expected_return: Some(8.0),
            views: 518,
            age_days: 45,
            owner_name: "Harbor Holdings LLC",
        },
        Seed {
            id: "deed-003",
            title: "Riverside Warehouse",
            address: "88 Industrial Pkwy",
            city: "Columbus",
            state: "OH",
            property_type: PropertyType::Industrial,
            price_dollars: 1_200_000,
            status: VerificationStatus::Pending,
            ownership_type: OwnershipType::Full,
            shares: None,
            offers: (false, true, true),
            rating: Some(3.9),
            expected_return: None,
            views: 97,
            age_days: 5,
            owner_name: "Dale Porter",
        },
        Seed {
            id: "deed-004",
            title: "Hill Country Acreage",
            address: "County Rd 12",
            city: "Austin",
            state: "TX",
            property_type: PropertyType::Land,
            price_dollars: 650_000,
            status: VerificationStatus::Unverified,
            ownership_type: OwnershipType::Full,
            shares: None,
            offers: (false, false, true),
            rating: None,
            expected_return: None,
            views: 21,
            age_days: 90,
            owner_name: "Ruth Albers",
        },
        Seed {
            id: "deed-005",
            title: "Park Slope Brownstone",
            address: "410 7th Ave",
            city: "New York",
            state: "NY",
            property_type: PropertyType::Residential,
            price_dollars: 3_000_000,
            status: VerificationStatus::Verified,
            ownership_type: OwnershipType::Fractional,
            shares: Some((0, 50)),
            offers: (true, true, false),
            rating: Some(4.9),
            expected_return: Some(5.0),
            views: 1_204,
            age_days: 200,
            owner_name: "Jordan Ellis",
        },
        Seed {
            id: "deed-006",
            title: "Sunset Strip Offices",
            address: "8800 Sunset Blvd",
            city: "Los Angeles",
            state: "CA",
            property_type: PropertyType::Commercial,
            price_dollars: 7_800_000,
            status: VerificationStatus::Verified,
            ownership_type: OwnershipType::Fractional,
            shares: Some((310, 500)),
            offers: (true, false, true),
            rating: Some(4.2),
            expected_return: Some(7.2),
            views: 655,
            age_days: 2,
            owner_name: "Westside Realty Trust",
        },
        Seed {
            id: "deed-007",
            title: "Lakeview Cottage",
            address: "7 Shore Ln",
            city: "Madison",
            state: "WI",
            property_type: PropertyType::Residential,
            price_dollars: 480_000,
            status: VerificationStatus::Pending,
            ownership_type: OwnershipType::Shared,
            shares: Some((8, 10)),
            offers: (true, true, false),
            rating: Some(4.0),
            expected_return: Some(4.1),
            views: 58,
            age_days: 28,
            owner_name: "Priya Natarajan",
        },
        Seed {
            id: "deed-008",
            title: "Desert Solar Parcel",
            address: "Route 66 Mile 112",
            city: "Barstow",
            state: "CA",
            property_type: PropertyType::Land,
            price_dollars: 5_000_000,
            status: VerificationStatus::Verified,
            ownership_type: OwnershipType::Fractional,
            shares: Some((1_000, 1_000)),
            offers: (true, false, true),
            rating: Some(3.5),
            expected_return: Some(9.5),
            views: 140,
            age_days: 60,
            owner_name: "Mojave Energy Co-op",
        },
    ];

    let now = Utc::now();
    seeds
        .into_iter()
        .map(|seed| {
            let (fraction_available, rent_available, loan_available) = seed.offers;
            PropertyRecord {
                id: seed.id.to_string(),
                title: seed.title.to_string(),
                address: seed.address.to_string(),
                city: seed.city.to_string(),
                state: seed.state.to_string(),
                property_type: seed.property_type,
                price: seed.price_dollars * 100,
                status: seed.status,
                ownership_type: seed.ownership_type,
                available_shares: seed.shares.map(|(available, _)| available),
                total_shares: seed.shares.map(|(_, total)| total),
                fraction_available,
                rent_available,
                loan_available,
                rating: seed.rating,
                expected_return: seed.expected_return,
                views: seed.views,
                created_at: now - Duration::days(seed.age_days),
                owner_name: seed.owner_name.to_string(),
            }
        })
        .collect()
}
