//! # In-Memory Store
//!
//! A [`SnapshotSource`] over a snapshot held in memory. Used by tests and by
//! callers that already have the collections in hand.

use std::sync::Arc;

use rekap_core::types::Snapshot;
use tokio::sync::RwLock;
use tracing::debug;

use crate::adapter::parse_snapshot;
use crate::error::StoreResult;
use crate::snapshot::{IngestReport, SnapshotSource};

/// Shared, replaceable in-memory snapshot.
///
/// Clones share the same snapshot; [`InMemoryStore::replace`] is visible to
/// every clone on its next `load`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshot: Arc<RwLock<Snapshot>>,
}

impl InMemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        InMemoryStore {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Builds a store from a JSON snapshot document.
    pub fn from_json(bytes: &[u8]) -> StoreResult<(Self, IngestReport)> {
        let (snapshot, report) = parse_snapshot(bytes)?;
        Ok((InMemoryStore::new(snapshot), report))
    }

    /// Swaps in a new snapshot.
    pub async fn replace(&self, snapshot: Snapshot) {
        debug!(sales = snapshot.sales.len(), "Replacing in-memory snapshot");
        *self.snapshot.write().await = snapshot;
    }
}

impl SnapshotSource for InMemoryStore {
    async fn load(&self) -> StoreResult<Snapshot> {
        Ok(self.snapshot.read().await.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_is_seen_by_clones() {
        let store = InMemoryStore::default();
        let other = store.clone();
        assert!(other.load().await.unwrap().is_empty());

        let (parsed, _) = InMemoryStore::from_json(
            br#"{"channels": [{"id": "ch1", "name": "Shopee"}],
                 "sales": [{"id": "s1", "channel": "ch1", "price": 5000, "date": "2024-03-05"}]}"#,
        )
        .unwrap();
        let snapshot = parsed.load().await.unwrap();
        assert_eq!(snapshot.sales[0].channel.display_name(), "Shopee");

        store.replace(snapshot.clone()).await;
        assert_eq!(other.load().await.unwrap(), snapshot);
    }
}
