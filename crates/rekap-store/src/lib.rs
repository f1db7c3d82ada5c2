//! # rekap-store: Snapshot Repository for Rekap POS
//!
//! This crate provides the collections the reporting engine reads. It owns
//! the wire format of the back office data and normalizes it into canonical
//! rekap-core types before any report sees it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rekap POS Data Flow                              │
//! │                                                                         │
//! │  rekap report / export / dashboard                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   rekap-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SnapshotSource│    │    adapter    │    │    demo      │  │   │
//! │  │   │ (snapshot.rs) │    │               │    │              │  │   │
//! │  │   │               │    │ RawRef:       │    │ seed data    │  │   │
//! │  │   │ JsonFileStore │◄───│  id | object  │    │ for `seed`   │  │   │
//! │  │   │ InMemoryStore │    │ price/date    │    │              │  │   │
//! │  │   │               │    │ coercion      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     JSON snapshot document                      │   │
//! │  │   { customers, products, channels, payments, admins, sales }    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`snapshot`] - `SnapshotSource` trait and ingestion report
//! - [`adapter`] - Wire types and normalization
//! - [`json`] - JSON file store
//! - [`memory`] - In-memory store
//! - [`demo`] - Demo snapshot generator
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rekap_store::{JsonFileStore, JsonStoreConfig, SnapshotSource};
//!
//! # async fn run() -> rekap_store::StoreResult<()> {
//! let store = JsonFileStore::new(JsonStoreConfig::new("rekap.json"));
//! let snapshot = store.load().await?;
//! println!("{} sales", snapshot.sales.len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod demo;
pub mod error;
pub mod json;
pub mod memory;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use json::{JsonFileStore, JsonStoreConfig};
pub use memory::InMemoryStore;
pub use snapshot::{IngestReport, SnapshotSource};
