//! # JSON File Store
//!
//! Keeps the whole snapshot in one JSON document, the same layout the back
//! office used for its local-storage mode.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  JsonStoreConfig::new(path) ← Configure path and behavior              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  JsonFileStore::new(config)                                            │
//! │       │                                                                 │
//! │       ├──► load()  : read ──► parse ──► normalize ──► Snapshot         │
//! │       │              (missing file → empty snapshot if allowed)        │
//! │       │                                                                 │
//! │       └──► save()  : denormalize ──► write <path>.tmp ──► rename       │
//! │                      (readers never see a half-written file)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rekap_core::types::Snapshot;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::adapter::{parse_snapshot, snapshot_to_json};
use crate::error::{StoreError, StoreResult};
use crate::snapshot::{IngestReport, SnapshotSource};

// =============================================================================
// Configuration
// =============================================================================

/// JSON store configuration.
///
/// ## Example
/// ```rust
/// use rekap_store::JsonStoreConfig;
///
/// let config = JsonStoreConfig::new("./data/rekap.json")
///     .create_if_missing(true)
///     .pretty(false);
/// assert!(config.create_if_missing);
/// ```
#[derive(Debug, Clone)]
pub struct JsonStoreConfig {
    /// Path to the snapshot document.
    pub path: PathBuf,

    /// Treat a missing file as an empty snapshot instead of an error.
    /// Default: false
    pub create_if_missing: bool,

    /// Indent saved documents.
    /// Default: true
    pub pretty: bool,
}

impl JsonStoreConfig {
    /// Creates a configuration for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStoreConfig {
            path: path.into(),
            create_if_missing: false,
            pretty: true,
        }
    }

    /// Sets whether a missing file loads as an empty snapshot.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets whether saved documents are indented.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: JsonStoreConfig,
}

impl JsonFileStore {
    /// Creates a store. Nothing is read until [`JsonFileStore::load_with_report`].
    pub fn new(config: JsonStoreConfig) -> Self {
        JsonFileStore { config }
    }

    /// Path of the snapshot document.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn path_string(&self) -> String {
        self.config.path.display().to_string()
    }

    /// Whether the snapshot document exists.
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.config.path).await.is_ok()
    }

    /// Loads the snapshot together with the ingestion report.
    ///
    /// ## Returns
    /// * `Ok((snapshot, report))` - Normalized snapshot
    /// * `Err(StoreError::NotFound)` - File missing and `create_if_missing` is off
    /// * `Err(StoreError::Malformed)` - Not a snapshot document
    pub async fn load_with_report(&self) -> StoreResult<(Snapshot, IngestReport)> {
        let path = self.path_string();
        debug!(path = %path, "Reading snapshot");

        let bytes = match fs::read(&self.config.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.config.create_if_missing {
                    info!(path = %path, "Snapshot file missing, starting empty");
                    return Ok((Snapshot::default(), IngestReport::default()));
                }
                return Err(StoreError::NotFound { path });
            }
            Err(e) => return Err(StoreError::read_failed(path, e)),
        };

        let (snapshot, report) = parse_snapshot(&bytes)?;

        if !report.is_clean() {
            warn!(
                path = %path,
                skipped_sales = report.skipped_sales,
                coerced_prices = report.coerced_prices,
                unresolved_refs = report.unresolved_refs,
                blank_fields = report.blank_fields,
                "Snapshot loaded with repairs"
            );
        }

        info!(
            path = %path,
            sales = snapshot.sales.len(),
            customers = snapshot.customers.len(),
            products = snapshot.products.len(),
            channels = snapshot.channels.len(),
            "Snapshot loaded"
        );

        Ok((snapshot, report))
    }

    /// Writes the whole snapshot, replacing the document atomically.
    pub async fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let path = self.path_string();
        let bytes = snapshot_to_json(snapshot, self.config.pretty)?;

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::write_failed(&path, e))?;
            }
        }

        let mut tmp = self.config.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::write_failed(&path, e))?;
        fs::rename(&tmp, &self.config.path)
            .await
            .map_err(|e| StoreError::write_failed(&path, e))?;

        info!(path = %path, bytes = bytes.len(), sales = snapshot.sales.len(), "Snapshot saved");
        Ok(())
    }
}

impl SnapshotSource for JsonFileStore {
    async fn load(&self) -> StoreResult<Snapshot> {
        let (snapshot, _) = self.load_with_report().await?;
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        self.path_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
