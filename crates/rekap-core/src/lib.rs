//! # rekap-core: Pure Reporting Logic for Rekap POS
//!
//! This crate is the **heart** of Rekap POS. It turns a snapshot of sales and
//! reference entities into report windows, KPIs and rollups, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rekap POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rekap (CLI)                                  │   │
//! │  │    report ──► dashboard ──► export ──► seed                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      rekap-store (load)           rekap-report (render)         │   │
//! │  │   JSON snapshot, normalization    screen tables, paginated PDF  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Snapshot                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rekap-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  window   │  │ aggregate │  │ dashboard │  │   │
//! │  │   │ SaleRecord│  │  Preset   │  │  rollup   │  │  7 days   │  │   │
//! │  │   │ EntityRef │  │ DateWindow│  │   KPIs    │  │ top chan. │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │          ┌───────────┐  ┌───────────┐                          │   │
//! │  │          │   money   │  │  format   │                          │   │
//! │  │          └───────────┘  └───────────┘                          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Reference entities, canonical sale records, snapshot
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`format`] - Currency, count and date display
//! - [`window`] - Preset → inclusive date window
//! - [`aggregate`] - Filtering, KPIs, rollups, top entity
//! - [`dashboard`] - Home screen summary
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: "now" is an argument, never read from the clock
//! 2. **Total Functions**: bad data degrades to 0 / `N/A` / open bound, never panics
//! 3. **Integer Money**: minor units (i64), so rollups always add up to the KPIs
//! 4. **Explicit Errors**: only user-typed names (presets, sections) can fail
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rekap_core::aggregate::{filter_and_aggregate, SalesQuery};
//! use rekap_core::window::{resolve_window, Preset};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let window = resolve_window(Preset::Monthly, now, None, None);
//!
//! let result = filter_and_aggregate(&[], &SalesQuery::new(window));
//! assert_eq!(result.kpis.total_orders, 0);
//! assert_eq!(window.period_label(), "2024-03-01 to 2024-03-31");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod money;
pub mod types;
pub mod window;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rekap_core::Money` instead of
// `use rekap_core::money::Money`

pub use aggregate::{
    filter_and_aggregate, rollup, top_by_revenue, Aggregation, AggregationRow, Dimension,
    ReportKpis, SalesQuery,
};
pub use dashboard::{DailyStat, DashboardSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::CurrencyFormat;
pub use money::Money;
pub use types::*;
pub use window::{resolve_window, DateWindow, Preset};
