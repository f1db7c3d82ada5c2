//! `rekap seed`: write a demo snapshot to the data file.

use chrono::Local;
use rekap_store::demo::demo_snapshot;
use rekap_store::{JsonFileStore, StoreError};
use tracing::info;

use super::open_store;
use crate::config::RekapConfig;
use crate::SeedArgs;

pub async fn run(config: &RekapConfig, args: SeedArgs) -> anyhow::Result<()> {
    let store = open_store(config);
    let written = seed(&store, &args).await?;
    println!("Wrote {} demo sales to {}", written, store.path().display());
    Ok(())
}

/// Writes the demo snapshot, refusing to replace existing data unless forced.
async fn seed(store: &JsonFileStore, args: &SeedArgs) -> Result<usize, StoreError> {
    if store.exists().await && !args.force {
        return Err(StoreError::AlreadyExists {
            path: store.path().display().to_string(),
        });
    }

    let snapshot = demo_snapshot(args.count, Local::now().date_naive());
    store.save(&snapshot).await?;
    info!(sales = snapshot.sales.len(), path = %store.path().display(), "Demo data seeded");

    Ok(snapshot.sales.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekap_store::{JsonStoreConfig, SnapshotSource};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_seed_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(JsonStoreConfig::new(dir.path().join("rekap.json")));

        let args = SeedArgs { count: 12, force: false };
        assert_eq!(seed(&store, &args).await.unwrap(), 12);
        assert_eq!(store.load().await.unwrap().sales.len(), 12);

        let again = seed(&store, &args).await;
        assert!(matches!(again, Err(StoreError::AlreadyExists { .. })));

        let forced = SeedArgs { count: 5, force: true };
        assert_eq!(seed(&store, &forced).await.unwrap(), 5);
        assert_eq!(store.load().await.unwrap().sales.len(), 5);
    }
}
