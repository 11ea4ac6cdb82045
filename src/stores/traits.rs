use crate::models::{PropertyRecord, UserShareMap};
use anyhow::Result;
use async_trait::async_trait;

/// Source of property listings
/// Implementations own the records; discovery only ever reads a snapshot.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Snapshot of every listing
    async fn list(&self) -> Result<Vec<PropertyRecord>>;

    /// Look up a single listing
    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>>;

    /// Atomically increment the view counter, returning the new count
    async fn record_view(&self, id: &str) -> Result<u64>;

    /// Get the name of the store backend
    fn source_name(&self) -> &'static str;
}

/// Source of per-user share holdings
#[async_trait]
pub trait UserShareLedger: Send + Sync {
    /// Shares held by `user`; unknown users hold nothing
    async fn shares_for(&self, user: &str) -> Result<UserShareMap>;
}
