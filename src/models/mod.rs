use crate::error::{DiscoveryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
    Land,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "Residential",
            PropertyType::Commercial => "Commercial",
            PropertyType::Industrial => "Industrial",
            PropertyType::Land => "Land",
        }
    }
}

impl FromStr for PropertyType {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "residential" => Ok(PropertyType::Residential),
            "commercial" => Ok(PropertyType::Commercial),
            "industrial" => Ok(PropertyType::Industrial),
            "land" => Ok(PropertyType::Land),
            _ => Err(DiscoveryError::invalid("type", s)),
        }
    }
}

/// Deed verification state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Unverified,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Unverified => "unverified",
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "verified" => Ok(VerificationStatus::Verified),
            "pending" => Ok(VerificationStatus::Pending),
            "unverified" => Ok(VerificationStatus::Unverified),
            _ => Err(DiscoveryError::invalid("status", s)),
        }
    }
}

/// How the deed is held
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OwnershipType {
    Full,
    Fractional,
    Shared,
}

impl OwnershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipType::Full => "Full",
            OwnershipType::Fractional => "Fractional",
            OwnershipType::Shared => "Shared",
        }
    }
}

impl FromStr for OwnershipType {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(OwnershipType::Full),
            "fractional" => Ok(OwnershipType::Fractional),
            "shared" => Ok(OwnershipType::Shared),
            _ => Err(DiscoveryError::invalid("ownershipType", s)),
        }
    }
}

macro_rules! impl_display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(PropertyType, VerificationStatus, OwnershipType);

/// A listed property on the deed marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,
    pub title: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Price in cents
    pub price: i64,
    pub status: VerificationStatus,
    pub ownership_type: OwnershipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_shares: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shares: Option<u32>,
    #[serde(default)]
    pub fraction_available: bool,
    #[serde(default)]
    pub rent_available: bool,
    #[serde(default)]
    pub loan_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Expected annual return, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<f64>,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub owner_name: String,
}

impl PropertyRecord {
    /// Price in whole currency units
    pub fn price_major(&self) -> i64 {
        self.price / 100
    }

    pub fn available_shares_or_zero(&self) -> u32 {
        self.available_shares.unwrap_or(0)
    }

    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Fractional shares are offered and some remain
    pub fn has_open_fraction(&self) -> bool {
        self.fraction_available && self.available_shares_or_zero() > 0
    }

    /// Check the data model invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DiscoveryError::malformed(&self.id, "empty id"));
        }
        // Ids double as export file names, so they must stay a single path segment.
        if self.id.contains(['/', '\\']) || self.id.contains("..") {
            return Err(DiscoveryError::malformed(&self.id, "id is not an opaque identifier"));
        }
        if self.price < 0 {
            return Err(DiscoveryError::malformed(
                &self.id,
                format!("negative price {}", self.price),
            ));
        }
        if let (Some(available), Some(total)) = (self.available_shares, self.total_shares) {
            if available > total {
                return Err(DiscoveryError::malformed(
                    &self.id,
                    format!("available shares {} exceed total {}", available, total),
                ));
            }
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(DiscoveryError::malformed(
                    &self.id,
                    format!("rating {} outside [0, 5]", rating),
                ));
            }
        }
        Ok(())
    }
}

/// Shares the acting user holds, keyed by property id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserShareMap(HashMap<String, u32>);

impl UserShareMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shares_of(&self, property_id: &str) -> u32 {
        self.0.get(property_id).copied().unwrap_or(0)
    }

    pub fn owns(&self, property_id: &str) -> bool {
        self.shares_of(property_id) > 0
    }

    pub fn insert(&mut self, property_id: impl Into<String>, shares: u32) {
        self.0.insert(property_id.into(), shares);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, u32>> for UserShareMap {
    fn from(map: HashMap<String, u32>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for UserShareMap {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
