use crate::models::{PropertyRecord, UserShareMap};
use crate::stores::memory::{MemoryPropertyStore, MemoryShareLedger};
use crate::stores::traits::{PropertyStore, UserShareLedger};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Listing store backed by a JSON array on disk
///
/// The whole file is loaded on open; view increments are written back
/// through a temp file and rename, and only reach memory once the file
/// has been replaced.
pub struct JsonPropertyStore {
    path: PathBuf,
    inner: MemoryPropertyStore,
    write_lock: Mutex<()>,
}

impl JsonPropertyStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let json = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read properties file {}", path.display()))?;
        let records: Vec<PropertyRecord> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse properties file {}", path.display()))?;
        let inner = MemoryPropertyStore::new(records)
            .with_context(|| format!("Invalid listing in {}", path.display()))?;

        info!("Loaded properties from {}", path.display());
        Ok(Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self, records: &[PropertyRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        debug!("Persisted {} properties to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for JsonPropertyStore {
    async fn list(&self) -> Result<Vec<PropertyRecord>> {
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>> {
        self.inner.get(id).await
    }

    async fn record_view(&self, id: &str) -> Result<u64> {
        // Only this method mutates, so the snapshot stays current under the lock.
        let _guard = self.write_lock.lock().await;
        let mut records = self.inner.snapshot().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .with_context(|| format!("Unknown property: {}", id))?;
        record.views += 1;
        let views = record.views;

        self.persist(&records).await?;
        self.inner.update(id, |record| record.views = views).await?;
        debug!("Property {} now has {} views", id, views);
        Ok(views)
    }

    fn source_name(&self) -> &'static str {
        "json"
    }
}

/// Share ledger loaded from `{ "<user>": { "<property id>": shares } }`
pub struct JsonShareLedger {
    inner: MemoryShareLedger,
}

impl JsonShareLedger {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read shares file {}", path.display()))?;
        let holdings: HashMap<String, UserShareMap> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse shares file {}", path.display()))?;

        info!("Loaded share holdings for {} users", holdings.len());
        Ok(Self {
            inner: MemoryShareLedger::new(holdings),
        })
    }
}

#[async_trait]
impl UserShareLedger for JsonShareLedger {
    async fn shares_for(&self, user: &str) -> Result<UserShareMap> {
        self.inner.shares_for(user).await
    }
}
