//! # Sales Filtering and Aggregation
//!
//! Selects the sales inside a report window, applies the free-text search,
//! and derives KPIs plus one rollup per requested dimension.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   &[SaleRecord] ──► window.contains(purchase_date)                      │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                     search (case-insensitive substring, any field)      │
//! │                          │                                              │
//! │            ┌─────────────┴──────────────────────┐                       │
//! │            ▼                                    ▼                       │
//! │     stable sort,                   rollup(Channel) ... rollup(Admin)    │
//! │     purchase_date descending       [{name, orders, revenue}, ...]       │
//! │            │                       first seen in input order            │
//! │            ▼                                                            │
//! │       filtered, ReportKpis                                              │
//! │       (orders, revenue, average)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Total: any input produces an [`Aggregation`], nothing here fails
//! - The input slice is never mutated; `filtered` holds clones
//! - For every dimension, rollup orders sum to `kpis.total_orders` and rollup
//!   revenue sums to `kpis.total_revenue` exactly (integer money)
//! - Same input, same output: no hashing order leaks into results

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::format::{format_iso_date, CurrencyFormat};
use crate::money::Money;
use crate::types::{EntityRef, SaleRecord};
use crate::window::DateWindow;

// =============================================================================
// Dimension
// =============================================================================

/// A reference dimension sales can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Channel,
    Product,
    Admin,
    Customer,
    Payment,
}

impl Dimension {
    /// The dimensions of the standard sales report.
    pub const STANDARD: [Dimension; 3] = [Dimension::Channel, Dimension::Product, Dimension::Admin];

    /// Canonical identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dimension::Channel => "channel",
            Dimension::Product => "product",
            Dimension::Admin => "admin",
            Dimension::Customer => "customer",
            Dimension::Payment => "payment",
        }
    }

    /// Column heading for the rollup table.
    pub const fn label(&self) -> &'static str {
        match self {
            Dimension::Channel => "Channel",
            Dimension::Product => "Product",
            Dimension::Admin => "Admin",
            Dimension::Customer => "Customer",
            Dimension::Payment => "Payment",
        }
    }

    /// The reference this dimension reads from a sale.
    pub fn entity<'a>(&self, sale: &'a SaleRecord) -> &'a EntityRef {
        match self {
            Dimension::Channel => &sale.channel,
            Dimension::Product => &sale.product,
            Dimension::Admin => &sale.admin,
            Dimension::Customer => &sale.customer,
            Dimension::Payment => &sale.payment,
        }
    }

    /// Grouping key: the display name, or `"N/A"` when unresolved.
    pub fn key(&self, sale: &SaleRecord) -> String {
        self.entity(sale).display_name().to_string()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "channel" | "channels" => Ok(Dimension::Channel),
            "product" | "products" | "produk" => Ok(Dimension::Product),
            "admin" | "admins" => Ok(Dimension::Admin),
            "customer" | "customers" | "pelanggan" => Ok(Dimension::Customer),
            "payment" | "payments" | "pembayaran" => Ok(Dimension::Payment),
            _ => Err(ValidationError::not_allowed(
                "dimension",
                &["channel", "product", "admin", "customer", "payment"],
            )),
        }
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// One group of a rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregationRow {
    pub name: String,
    pub orders: u64,
    pub revenue: Money,
}

/// Scalar summary of a set of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportKpis {
    pub total_orders: u64,
    pub total_revenue: Money,
    /// `total_revenue / total_orders`, rounded half away from zero; zero when
    /// there are no orders.
    pub average_order_value: Money,
}

impl ReportKpis {
    /// Computes KPIs over a set of sales.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SaleRecord>,
    {
        let (total_orders, total_revenue) = records
            .into_iter()
            .fold((0u64, Money::zero()), |(orders, revenue), sale| {
                (orders + 1, revenue + sale.price)
            });

        ReportKpis {
            total_orders,
            total_revenue,
            average_order_value: total_revenue.average_over(total_orders),
        }
    }
}

// =============================================================================
// Query
// =============================================================================

/// What to select and how to group it.
///
/// ## Example
/// ```rust
/// use rekap_core::aggregate::{Dimension, SalesQuery};
/// use rekap_core::window::DateWindow;
///
/// let query = SalesQuery::new(DateWindow::unbounded())
///     .with_search("shopee")
///     .with_dimensions(vec![Dimension::Channel]);
/// assert_eq!(query.dimensions, vec![Dimension::Channel]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SalesQuery {
    pub window: DateWindow,
    /// Free-text filter. Blank means no filter.
    pub search: Option<String>,
    pub dimensions: Vec<Dimension>,
    /// Used to match searches against the displayed price (`Rp 150.000`).
    pub currency: CurrencyFormat,
}

impl SalesQuery {
    /// A query over `window` with the standard dimensions and no search.
    pub fn new(window: DateWindow) -> Self {
        SalesQuery {
            window,
            search: None,
            dimensions: Dimension::STANDARD.to_vec(),
            currency: CurrencyFormat::default(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: Vec<Dimension>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }
}

/// Output of [`filter_and_aggregate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Window the sales were selected with.
    pub window: DateWindow,
    /// Search text that was applied, if any.
    pub search: Option<String>,
    /// Matching sales, newest purchase first.
    pub filtered: Vec<SaleRecord>,
    pub kpis: ReportKpis,
    /// Rollups for the requested dimensions that matched at least one sale.
    pub rollups: BTreeMap<Dimension, Vec<AggregationRow>>,
    /// Requested dimensions, in request order, without duplicates.
    pub dimensions: Vec<Dimension>,
}

impl Aggregation {
    /// Rows for one dimension; empty when nothing matched or not requested.
    pub fn rollup(&self, dimension: Dimension) -> &[AggregationRow] {
        self.rollups
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The highest-revenue row of one dimension.
    pub fn top(&self, dimension: Dimension) -> Option<&AggregationRow> {
        top_by_revenue(self.rollup(dimension))
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Filters, sorts and aggregates `sales` according to `query`.
///
/// ## Example
/// ```rust
/// use rekap_core::aggregate::{filter_and_aggregate, SalesQuery};
/// use rekap_core::window::DateWindow;
///
/// let result = filter_and_aggregate(&[], &SalesQuery::new(DateWindow::unbounded()));
/// assert_eq!(result.kpis.total_orders, 0);
/// assert!(result.rollups.is_empty());
/// ```
pub fn filter_and_aggregate(sales: &[SaleRecord], query: &SalesQuery) -> Aggregation {
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    let matched: Vec<&SaleRecord> = sales
        .iter()
        .filter(|sale| query.window.contains(sale.purchase_date))
        .filter(|sale| needle.is_empty() || matches_search(sale, &needle, &query.currency))
        .collect();

    let mut filtered: Vec<SaleRecord> = matched.iter().map(|sale| (*sale).clone()).collect();
    // sort_by is stable: same-day sales keep their input order
    filtered.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));

    let kpis = ReportKpis::from_records(&filtered);

    let mut dimensions = Vec::with_capacity(query.dimensions.len());
    for dimension in &query.dimensions {
        if !dimensions.contains(dimension) {
            dimensions.push(*dimension);
        }
    }

    let rollups = dimensions
        .iter()
        .map(|dimension| {
            let rows = rollup(matched.iter().copied(), |sale| dimension.key(sale));
            (*dimension, rows)
        })
        .filter(|(_, rows)| !rows.is_empty())
        .collect();

    Aggregation {
        window: query.window,
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        filtered,
        kpis,
        rollups,
        dimensions,
    }
}

/// Groups records by an arbitrary key.
///
/// One row per distinct key, in the order keys are first seen.
///
/// ## Example
/// ```rust
/// use rekap_core::aggregate::rollup;
/// use rekap_core::types::SaleRecord;
///
/// let rows = rollup(&Vec::<SaleRecord>::new(), |sale| sale.link.clone());
/// assert!(rows.is_empty());
/// ```
pub fn rollup<'a, I, F>(records: I, key_fn: F) -> Vec<AggregationRow>
where
    I: IntoIterator<Item = &'a SaleRecord>,
    F: Fn(&SaleRecord) -> String,
{
    let mut rows: Vec<AggregationRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sale in records {
        let key = key_fn(sale);
        match index.get(&key).copied() {
            Some(i) => {
                rows[i].orders += 1;
                rows[i].revenue += sale.price;
            }
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(AggregationRow {
                    name: key,
                    orders: 1,
                    revenue: sale.price,
                });
            }
        }
    }

    rows
}

/// The row with strictly maximal revenue.
///
/// Ties keep the row that appears first, so the result follows the
/// first-seen order of [`rollup`].
pub fn top_by_revenue(rows: &[AggregationRow]) -> Option<&AggregationRow> {
    let mut best: Option<&AggregationRow> = None;
    for row in rows {
        if best.map_or(true, |current| row.revenue > current.revenue) {
            best = Some(row);
        }
    }
    best
}

/// Case-insensitive substring match over the searchable fields of a sale.
///
/// `needle` must already be lowercased.
fn matches_search(sale: &SaleRecord, needle: &str, currency: &CurrencyFormat) -> bool {
    let refs = [
        sale.customer.name.as_deref(),
        sale.customer.detail.as_deref(),
        sale.product.name.as_deref(),
        sale.product.detail.as_deref(),
        sale.channel.name.as_deref(),
        sale.payment.name.as_deref(),
        sale.admin.name.as_deref(),
    ];

    let hit = |field: &str| field.to_lowercase().contains(needle);

    refs.into_iter().flatten().any(|field| hit(field))
        || hit(&format_iso_date(sale.purchase_date))
        || hit(&sale.price.round_to_major().to_string())
        || hit(&currency.format(sale.price))
        || hit(&sale.link)
        || sale.ship_date.map(format_iso_date).is_some_and(|d| hit(&d))
        || hit(&sale.note)
}

// =============================================================================
// Unit Tests
// =============================================================================
