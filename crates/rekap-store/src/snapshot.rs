//! # Snapshot Source
//!
//! The read interface the reporting commands are written against.
//!
//! ```text
//! ┌──────────────────────┐        load()        ┌──────────────────────────┐
//! │  report / export /   │ ───────────────────► │ S: SnapshotSource        │
//! │  dashboard command   │ ◄─────────────────── │  ├── JsonFileStore       │
//! └──────────────────────┘   Snapshot (fresh)   │  └── InMemoryStore       │
//!                                               └──────────────────────────┘
//! ```
//!
//! Sources are passed in explicitly as a generic parameter; there is no
//! process-wide cache. Every `load` returns a snapshot that reflects the data
//! at that moment.

use std::future::Future;

use rekap_core::types::Snapshot;
use serde::Serialize;

use crate::error::StoreResult;

/// What ingestion had to repair while reading a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Sale rows present in the document.
    pub sales_read: usize,
    /// Sale rows dropped because the purchase date could not be parsed.
    pub skipped_sales: usize,
    /// Prices replaced by 0 (non-numeric, missing or negative).
    pub coerced_prices: usize,
    /// References left without a display name.
    pub unresolved_refs: usize,
    /// Sales and list entries that arrived without an id.
    pub generated_ids: usize,
    /// Reference-list text fields that were null or missing, stored as empty.
    pub blank_fields: usize,
}

impl IngestReport {
    /// Whether anything had to be repaired.
    pub fn is_clean(&self) -> bool {
        self.skipped_sales == 0
            && self.coerced_prices == 0
            && self.unresolved_refs == 0
            && self.generated_ids == 0
            && self.blank_fields == 0
    }
}

/// Read access to the current collections.
pub trait SnapshotSource: Send + Sync {
    /// Loads a fresh snapshot.
    fn load(&self) -> impl Future<Output = StoreResult<Snapshot>> + Send;

    /// Short description for log lines, e.g. the file path.
    fn describe(&self) -> String;
}
