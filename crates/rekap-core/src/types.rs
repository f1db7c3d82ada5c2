//! # Domain Types
//!
//! Reference entities, canonical sale records and the snapshot that carries
//! them into the reporting engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Reference entities (read-only, looked up for display and grouping)     │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐       │
//! │  │ Customer │ │ Product  │ │ Channel  │ │ Payment  │ │  Admin   │       │
//! │  │ name     │ │ name     │ │ name     │ │ name     │ │ name     │       │
//! │  │ username │ │ type/sku │ │ desc/url │ │ desc/code│ │ username │       │
//! │  └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘       │
//! │       └────────────┴─────┬──────┴────────────┴────────────┘             │
//! │                          ▼ (normalized once, at ingestion)              │
//! │                    ┌─────────────┐                                      │
//! │                    │  EntityRef  │  id + name + detail                  │
//! │                    └──────┬──────┘                                      │
//! │                           ▼                                             │
//! │                    ┌─────────────┐                                      │
//! │                    │ SaleRecord  │  price: Money, purchase_date         │
//! │                    └─────────────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Canonical References
//! The data layer sends a sale's customer, product, channel, payment and
//! admin either as a bare id or as an embedded copy of the entity. By the time
//! a [`SaleRecord`] exists, both shapes have been folded into one
//! [`EntityRef`]; aggregation code never inspects the raw shape.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// Display name used when a reference cannot be resolved.
pub const UNRESOLVED_NAME: &str = "N/A";

// =============================================================================
// Reference Entities
// =============================================================================

/// A customer of the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub note: String,
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Product category, e.g. "Digital" or "Fisik".
    #[serde(rename = "type", default)]
    pub product_type: String,
    #[serde(default)]
    pub sku: String,
}

/// A sales channel (marketplace, storefront, social account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub url: String,
}

/// A payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub code: String,
}

/// A staff member who records sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub note: String,
}

// =============================================================================
// Entity Reference
// =============================================================================

/// Canonical reference from a sale to one of its reference entities.
///
/// `detail` carries the secondary searchable field of the entity:
/// the username of a customer or admin, the type of a product.
///
/// ## Example
/// ```rust
/// use rekap_core::types::EntityRef;
///
/// let channel = EntityRef::named("ch-1", "Tokopedia");
/// assert_eq!(channel.display_name(), "Tokopedia");
/// assert_eq!(EntityRef::unresolved().display_name(), "N/A");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl EntityRef {
    /// A reference with nothing known about the target.
    pub fn unresolved() -> Self {
        EntityRef::default()
    }

    /// A reference with an id and a display name.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        EntityRef {
            id: Some(id.into()),
            name: Some(name.into()),
            detail: None,
        }
    }

    /// Attaches the secondary searchable field.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the display name, or `"N/A"` when the name is missing or blank.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNRESOLVED_NAME,
        }
    }

    /// Whether this reference points at `id`.
    pub fn is(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

impl From<&Customer> for EntityRef {
    fn from(customer: &Customer) -> Self {
        EntityRef::named(&customer.id, &customer.name).with_detail(&customer.username)
    }
}

impl From<&Product> for EntityRef {
    fn from(product: &Product) -> Self {
        EntityRef::named(&product.id, &product.name).with_detail(&product.product_type)
    }
}

impl From<&Channel> for EntityRef {
    fn from(channel: &Channel) -> Self {
        EntityRef::named(&channel.id, &channel.name)
    }
}

impl From<&Payment> for EntityRef {
    fn from(payment: &Payment) -> Self {
        EntityRef::named(&payment.id, &payment.name)
    }
}

impl From<&Admin> for EntityRef {
    fn from(admin: &Admin) -> Self {
        EntityRef::named(&admin.id, &admin.name).with_detail(&admin.username)
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// A single sale transaction, after reference normalization.
///
/// ## Invariants
/// - `price` is never negative (the ingestion adapter coerces bad prices to 0)
/// - `purchase_date` is a valid calendar date
/// - `ship_date` is informational only, it never participates in windowing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub customer: EntityRef,
    pub product: EntityRef,
    pub channel: EntityRef,
    pub payment: EntityRef,
    pub admin: EntityRef,
    pub price: Money,
    #[serde(default)]
    pub link: String,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub ship_date: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Every collection the reporting engine reads, as of one load.
///
/// A snapshot is immutable once built. Callers load a fresh one whenever the
/// underlying data changes; nothing derived from an older snapshot is reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
}

impl Snapshot {
    /// Whether the snapshot holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
            && self.products.is_empty()
            && self.channels.is_empty()
            && self.payments.is_empty()
            && self.admins.is_empty()
            && self.sales.is_empty()
    }
}

// =============================================================================
// Report Section
// =============================================================================

/// A section of the exported report.
///
/// `Sales` toggles the transaction detail table, the others toggle the full
/// listing of one reference collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Sales,
    Customers,
    Products,
    Channels,
    Payments,
    Admins,
}

impl Section {
    /// All sections, in report order.
    pub const ALL: [Section; 6] = [
        Section::Sales,
        Section::Customers,
        Section::Products,
        Section::Channels,
        Section::Payments,
        Section::Admins,
    ];

    /// Canonical identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Section::Sales => "sales",
            Section::Customers => "customers",
            Section::Products => "products",
            Section::Channels => "channels",
            Section::Payments => "payments",
            Section::Admins => "admins",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses English identifiers and the Indonesian ids used by older exports
/// (`penjualan`, `pelanggan`, `produk`, `channel`, `pembayaran`, `admin`).
impl FromStr for Section {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sales" | "sale" | "penjualan" => Ok(Section::Sales),
            "customers" | "customer" | "pelanggan" => Ok(Section::Customers),
            "products" | "product" | "produk" => Ok(Section::Products),
            "channels" | "channel" => Ok(Section::Channels),
            "payments" | "payment" | "pembayaran" => Ok(Section::Payments),
            "admins" | "admin" => Ok(Section::Admins),
            _ => Err(ValidationError::not_allowed(
                "section",
                &["sales", "customers", "products", "channels", "payments", "admins"],
            )),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
