use crate::stores::json::{JsonPropertyStore, JsonShareLedger};
use crate::stores::memory::{MemoryPropertyStore, MemoryShareLedger, DEMO_USER};
use crate::stores::traits::{PropertyStore, UserShareLedger};
use anyhow::Result;
use std::path::PathBuf;

/// Where listings and share holdings come from
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// JSON array of listings; mock listings when absent
    pub data: Option<PathBuf>,
    /// JSON map of user holdings; mock holdings when absent
    pub shares: Option<PathBuf>,
    /// User whose holdings drive scoring and "my properties"
    pub user: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data: None,
            shares: None,
            user: DEMO_USER.to_string(),
        }
    }
}

impl StoreConfig {
    pub async fn open_property_store(&self) -> Result<Box<dyn PropertyStore>> {
        Ok(match &self.data {
            Some(path) => Box::new(JsonPropertyStore::open(path).await?),
            None => Box::new(MemoryPropertyStore::with_mock_listings()),
        })
    }

    pub async fn open_share_ledger(&self) -> Result<Box<dyn UserShareLedger>> {
        Ok(match &self.shares {
            Some(path) => Box::new(JsonShareLedger::open(path).await?),
            None => Box::new(MemoryShareLedger::with_mock_holdings()),
        })
    }
}
