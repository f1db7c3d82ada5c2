//! # Ingestion Adapter
//!
//! Maps the wire shape of the back office data onto canonical rekap-core
//! types. This is the only place that knows a sale's references can arrive in
//! two shapes.
//!
//! ## Reference Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Wire (either form, per field)           Canonical                      │
//! │                                                                         │
//! │  "channel": "ch-1"               ──┐                                    │
//! │  "channel_id": "ch-1"            ──┼──► lookup in snapshot.channels     │
//! │                                    │         │ found     │ not found    │
//! │  "channel": { "id": "ch-1",      ──┘         ▼           ▼              │
//! │               "name": "Shopee" }        live entity   embedded fields   │
//! │                                                       (or id only)      │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                 EntityRef { id, name, detail }          │
//! │                                 name missing → displayed as "N/A"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Coercion Rules
//! | Field          | Bad value                    | Result                      |
//! |----------------|------------------------------|-----------------------------|
//! | `price`        | text, null, negative, NaN    | `0`, counted, `warn!`       |
//! | `date`         | missing or not `YYYY-MM-DD`  | sale skipped, counted       |
//! | `ship_date`    | missing or malformed         | `None`                      |
//! | `id`           | missing or blank             | fresh UUID v4, counted      |
//! | `id`           | integer                      | decimal text                |
//! | any reference  | unknown id / no name         | `"N/A"` on display, counted |
//! | list field     | null or missing              | empty text, counted         |

use std::collections::HashMap;

use rekap_core::format::format_iso_date;
use rekap_core::money::{Money, MINOR_PER_MAJOR};
use rekap_core::types::{Admin, Channel, Customer, EntityRef, Payment, Product, SaleRecord, Snapshot};
use rekap_core::window::parse_calendar_date;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::snapshot::IngestReport;

// =============================================================================
// Wire Types
// =============================================================================

/// An identifier as it appears on the wire: text or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    /// The identifier as trimmed text, `None` when blank.
    fn canonical(&self) -> Option<String> {
        match self {
            RawId::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            RawId::Number(n) => Some(n.to_string()),
        }
    }
}

/// A reference as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRef {
    /// Bare identifier, text or numeric.
    Id(RawId),
    /// Denormalized copy of the referenced entity.
    Embedded(RawEntity),
}

/// Any reference entity, with every field optional.
///
/// Used both for embedded references and for the entries of the reference
/// lists, where `null` is accepted in place of any text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RawId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A sale as it appears on the wire.
///
/// Accepts the snake_case API field names, the `*_id` input form and the
/// camelCase names of the local-storage variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RawId>,
    #[serde(default, alias = "customer_id", alias = "customerId")]
    pub customer: Option<RawRef>,
    #[serde(default, alias = "product_id", alias = "productId")]
    pub product: Option<RawRef>,
    #[serde(default, alias = "channel_id", alias = "channelId")]
    pub channel: Option<RawRef>,
    #[serde(default, alias = "payment_id", alias = "paymentId")]
    pub payment: Option<RawRef>,
    #[serde(default, alias = "admin_id", alias = "adminId")]
    pub admin: Option<RawRef>,
    #[serde(default)]
    pub price: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, alias = "purchase_date", alias = "purchaseDate")]
    pub date: Option<String>,
    #[serde(default, alias = "shipDate", skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The whole snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub customers: Vec<RawEntity>,
    #[serde(default)]
    pub products: Vec<RawEntity>,
    #[serde(default)]
    pub channels: Vec<RawEntity>,
    #[serde(default)]
    pub payments: Vec<RawEntity>,
    #[serde(default)]
    pub admins: Vec<RawEntity>,
    #[serde(default)]
    pub sales: Vec<RawSale>,
}

// =============================================================================
// Reference Kinds
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefKind {
    Customer,
    Product,
    Channel,
    Payment,
    Admin,
}

impl RefKind {
    const fn label(&self) -> &'static str {
        match self {
            RefKind::Customer => "customer",
            RefKind::Product => "product",
            RefKind::Channel => "channel",
            RefKind::Payment => "payment",
            RefKind::Admin => "admin",
        }
    }
}

impl RawEntity {
    fn to_entity_ref(&self, kind: RefKind) -> EntityRef {
        let detail = match kind {
            RefKind::Customer | RefKind::Admin => self.username.clone(),
            RefKind::Product => self.product_type.clone(),
            RefKind::Channel | RefKind::Payment => None,
        };
        EntityRef {
            id: self.id.as_ref().and_then(RawId::canonical),
            name: self.name.clone(),
            detail,
        }
    }

    fn from_entity_ref(kind: RefKind, entity: &EntityRef) -> Self {
        let mut raw = RawEntity {
            id: entity.id.clone().map(RawId::Text),
            name: entity.name.clone(),
            ..RawEntity::default()
        };
        match kind {
            RefKind::Customer | RefKind::Admin => raw.username = entity.detail.clone(),
            RefKind::Product => raw.product_type = entity.detail.clone(),
            RefKind::Channel | RefKind::Payment => {}
        }
        raw
    }
}

// =============================================================================
// Reference Lists
// =============================================================================

/// Takes a list entry's id, generating one when it is missing or blank.
fn record_id(id: Option<&RawId>, report: &mut IngestReport) -> String {
    id.and_then(RawId::canonical).unwrap_or_else(|| {
        report.generated_ids += 1;
        Uuid::new_v4().to_string()
    })
}

/// Takes a text field of a list entry, `null` or missing becoming empty.
fn list_text(value: Option<String>, report: &mut IngestReport) -> String {
    value.unwrap_or_else(|| {
        report.blank_fields += 1;
        String::new()
    })
}

impl RawEntity {
    fn into_customer(self, report: &mut IngestReport) -> Customer {
        Customer {
            id: record_id(self.id.as_ref(), report),
            name: list_text(self.name, report),
            username: list_text(self.username, report),
            note: list_text(self.note, report),
        }
    }

    fn into_product(self, report: &mut IngestReport) -> Product {
        Product {
            id: record_id(self.id.as_ref(), report),
            name: list_text(self.name, report),
            product_type: list_text(self.product_type, report),
            sku: list_text(self.sku, report),
        }
    }

    fn into_channel(self, report: &mut IngestReport) -> Channel {
        Channel {
            id: record_id(self.id.as_ref(), report),
            name: list_text(self.name, report),
            desc: list_text(self.desc, report),
            url: list_text(self.url, report),
        }
    }

    fn into_payment(self, report: &mut IngestReport) -> Payment {
        Payment {
            id: record_id(self.id.as_ref(), report),
            name: list_text(self.name, report),
            desc: list_text(self.desc, report),
            code: list_text(self.code, report),
        }
    }

    fn into_admin(self, report: &mut IngestReport) -> Admin {
        Admin {
            id: record_id(self.id.as_ref(), report),
            name: list_text(self.name, report),
            username: list_text(self.username, report),
            note: list_text(self.note, report),
        }
    }
}

impl From<&Customer> for RawEntity {
    fn from(customer: &Customer) -> Self {
        RawEntity {
            id: Some(RawId::Text(customer.id.clone())),
            name: Some(customer.name.clone()),
            username: Some(customer.username.clone()),
            note: Some(customer.note.clone()),
            ..RawEntity::default()
        }
    }
}

impl From<&Product> for RawEntity {
    fn from(product: &Product) -> Self {
        RawEntity {
            id: Some(RawId::Text(product.id.clone())),
            name: Some(product.name.clone()),
            product_type: Some(product.product_type.clone()),
            sku: Some(product.sku.clone()),
            ..RawEntity::default()
        }
    }
}

impl From<&Channel> for RawEntity {
    fn from(channel: &Channel) -> Self {
        RawEntity {
            id: Some(RawId::Text(channel.id.clone())),
            name: Some(channel.name.clone()),
            desc: Some(channel.desc.clone()),
            url: Some(channel.url.clone()),
            ..RawEntity::default()
        }
    }
}

impl From<&Payment> for RawEntity {
    fn from(payment: &Payment) -> Self {
        RawEntity {
            id: Some(RawId::Text(payment.id.clone())),
            name: Some(payment.name.clone()),
            desc: Some(payment.desc.clone()),
            code: Some(payment.code.clone()),
            ..RawEntity::default()
        }
    }
}

impl From<&Admin> for RawEntity {
    fn from(admin: &Admin) -> Self {
        RawEntity {
            id: Some(RawId::Text(admin.id.clone())),
            name: Some(admin.name.clone()),
            username: Some(admin.username.clone()),
            note: Some(admin.note.clone()),
            ..RawEntity::default()
        }
    }
}

// =============================================================================
// Reference Index
// =============================================================================

/// Id → canonical reference, one table per reference kind.
struct RefIndex {
    customers: HashMap<String, EntityRef>,
    products: HashMap<String, EntityRef>,
    channels: HashMap<String, EntityRef>,
    payments: HashMap<String, EntityRef>,
    admins: HashMap<String, EntityRef>,
}

fn index_by_id<'a, T: 'a>(items: &'a [T]) -> HashMap<String, EntityRef>
where
    &'a T: Into<EntityRef>,
{
    items
        .iter()
        .filter_map(|item| {
            let entity: EntityRef = item.into();
            entity.id.clone().map(|id| (id, entity))
        })
        .collect()
}

impl RefIndex {
    fn new(lists: &Snapshot) -> Self {
        RefIndex {
            customers: index_by_id(&lists.customers),
            products: index_by_id(&lists.products),
            channels: index_by_id(&lists.channels),
            payments: index_by_id(&lists.payments),
            admins: index_by_id(&lists.admins),
        }
    }

    fn lookup(&self, kind: RefKind, id: &str) -> Option<EntityRef> {
        let table = match kind {
            RefKind::Customer => &self.customers,
            RefKind::Product => &self.products,
            RefKind::Channel => &self.channels,
            RefKind::Payment => &self.payments,
            RefKind::Admin => &self.admins,
        };
        table.get(id.trim()).cloned()
    }

    /// Resolves one reference. The live entity wins over embedded fields.
    fn resolve(
        &self,
        kind: RefKind,
        raw: Option<&RawRef>,
        sale_id: &str,
        report: &mut IngestReport,
    ) -> EntityRef {
        let id_only = |id: String| EntityRef {
            id: Some(id),
            name: None,
            detail: None,
        };

        let entity = match raw {
            None => EntityRef::unresolved(),
            Some(RawRef::Id(raw_id)) => match raw_id.canonical() {
                Some(id) => self.lookup(kind, &id).unwrap_or_else(|| id_only(id)),
                None => EntityRef::unresolved(),
            },
            Some(RawRef::Embedded(embedded)) => embedded
                .id
                .as_ref()
                .and_then(RawId::canonical)
                .and_then(|id| self.lookup(kind, &id))
                .unwrap_or_else(|| embedded.to_entity_ref(kind)),
        };

        if entity.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            report.unresolved_refs += 1;
            warn!(
                sale_id,
                kind = kind.label(),
                ref_id = ?entity.id,
                "Unresolved reference, displayed as N/A"
            );
        }

        entity
    }

    fn sale(&self, raw: &RawSale, report: &mut IngestReport) -> Option<SaleRecord> {
        let id = record_id(raw.id.as_ref(), report);

        let Some(purchase_date) = raw.date.as_deref().and_then(parse_sale_date) else {
            report.skipped_sales += 1;
            warn!(sale_id = %id, date = ?raw.date, "Skipping sale with unparseable purchase date");
            return None;
        };

        let price = match coerce_price(&raw.price) {
            Some(price) if !price.is_negative() => price,
            _ => {
                report.coerced_prices += 1;
                warn!(sale_id = %id, price = %raw.price, "Invalid price, counted as 0");
                Money::zero()
            }
        };

        Some(SaleRecord {
            customer: self.resolve(RefKind::Customer, raw.customer.as_ref(), &id, report),
            product: self.resolve(RefKind::Product, raw.product.as_ref(), &id, report),
            channel: self.resolve(RefKind::Channel, raw.channel.as_ref(), &id, report),
            payment: self.resolve(RefKind::Payment, raw.payment.as_ref(), &id, report),
            admin: self.resolve(RefKind::Admin, raw.admin.as_ref(), &id, report),
            price,
            link: raw.link.clone().unwrap_or_default(),
            purchase_date,
            ship_date: raw.ship_date.as_deref().and_then(parse_sale_date),
            note: raw.note.clone().unwrap_or_default(),
            id,
        })
    }
}

// =============================================================================
// Coercion
// =============================================================================

/// Reads a price from a JSON number or numeric string.
///
/// Returns `None` for anything that is not a finite number.
fn coerce_price(value: &Value) -> Option<Money> {
    let major = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    major.is_finite().then(|| Money::from_f64_lenient(major))
}

/// Accepts `YYYY-MM-DD`, or a timestamp starting with one.
fn parse_sale_date(input: &str) -> Option<chrono::NaiveDate> {
    parse_calendar_date(input).or_else(|| input.trim().get(..10).and_then(parse_calendar_date))
}

/// Price in whole units when exact, so saved files stay readable.
fn price_value(price: Money) -> Value {
    if price.minor() % MINOR_PER_MAJOR == 0 {
        Value::from(price.minor() / MINOR_PER_MAJOR)
    } else {
        Value::from(price.as_major_f64())
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Normalizes a wire snapshot into canonical types.
pub fn normalize(raw: RawSnapshot) -> (Snapshot, IngestReport) {
    let mut report = IngestReport {
        sales_read: raw.sales.len(),
        ..IngestReport::default()
    };

    let mut snapshot = Snapshot {
        customers: raw.customers.into_iter().map(|c| c.into_customer(&mut report)).collect(),
        products: raw.products.into_iter().map(|p| p.into_product(&mut report)).collect(),
        channels: raw.channels.into_iter().map(|c| c.into_channel(&mut report)).collect(),
        payments: raw.payments.into_iter().map(|p| p.into_payment(&mut report)).collect(),
        admins: raw.admins.into_iter().map(|a| a.into_admin(&mut report)).collect(),
        sales: Vec::new(),
    };

    let index = RefIndex::new(&snapshot);
    snapshot.sales = raw
        .sales
        .iter()
        .filter_map(|sale| index.sale(sale, &mut report))
        .collect();

    debug!(
        sales = snapshot.sales.len(),
        skipped = report.skipped_sales,
        unresolved = report.unresolved_refs,
        blank_fields = report.blank_fields,
        "Snapshot normalized"
    );

    (snapshot, report)
}

/// Converts a canonical snapshot back to the wire shape.
///
/// References are written embedded, so the document stays readable without
/// the reference lists.
pub fn denormalize(snapshot: &Snapshot) -> RawSnapshot {
    let embed = |kind: RefKind, entity: &EntityRef| {
        Some(RawRef::Embedded(RawEntity::from_entity_ref(kind, entity)))
    };

    let sales = snapshot
        .sales
        .iter()
        .map(|sale| RawSale {
            id: Some(RawId::Text(sale.id.clone())),
            customer: embed(RefKind::Customer, &sale.customer),
            product: embed(RefKind::Product, &sale.product),
            channel: embed(RefKind::Channel, &sale.channel),
            payment: embed(RefKind::Payment, &sale.payment),
            admin: embed(RefKind::Admin, &sale.admin),
            price: price_value(sale.price),
            link: Some(sale.link.clone()),
            date: Some(format_iso_date(sale.purchase_date)),
            ship_date: sale.ship_date.map(format_iso_date),
            note: Some(sale.note.clone()),
        })
        .collect();

    RawSnapshot {
        customers: snapshot.customers.iter().map(RawEntity::from).collect(),
        products: snapshot.products.iter().map(RawEntity::from).collect(),
        channels: snapshot.channels.iter().map(RawEntity::from).collect(),
        payments: snapshot.payments.iter().map(RawEntity::from).collect(),
        admins: snapshot.admins.iter().map(RawEntity::from).collect(),
        sales,
    }
}

/// Parses and normalizes a JSON snapshot document.
pub fn parse_snapshot(bytes: &[u8]) -> StoreResult<(Snapshot, IngestReport)> {
    let raw: RawSnapshot = serde_json::from_slice(bytes)?;
    Ok(normalize(raw))
}

/// Serializes a snapshot to its JSON document form.
pub fn snapshot_to_json(snapshot: &Snapshot, pretty: bool) -> StoreResult<Vec<u8>> {
    let raw = denormalize(snapshot);
    let bytes = if pretty {
        serde_json::to_vec_pretty(&raw)?
    } else {
        serde_json::to_vec(&raw)?
    };
    Ok(bytes)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const REFS: &str = r#"
        "customers": [{"id": "c1", "name": "Budi", "username": "budis", "note": ""}],
        "products": [{"id": "p1", "name": "Netflix", "type": "Digital", "sku": "NF"}],
        "channels": [{"id": "ch1", "name": "Shopee", "desc": "", "url": ""}],
        "payments": [{"id": "pay1", "name": "GoPay", "desc": "", "code": "GP"}],
        "admins": [{"id": "a1", "name": "Sari", "username": "sari", "note": ""}]
    "#;

    fn parse(sales: &str) -> (Snapshot, IngestReport) {
        let doc = format!("{{ {REFS}, \"sales\": [{sales}] }}");
        parse_snapshot(doc.as_bytes()).unwrap()
    }

    #[test]
    fn test_bare_ids_resolve_against_lists() {
        let (snap, report) = parse(
            r#"{"id": "s1", "customer": "c1", "product": "p1", "channel": "ch1",
                "payment": "pay1", "admin": "a1", "price": 150000, "link": "",
                "date": "2024-03-05", "ship_date": "", "note": ""}"#,
        );
        let sale = &snap.sales[0];
        assert_eq!(sale.customer.display_name(), "Budi");
        assert_eq!(sale.customer.detail.as_deref(), Some("budis"));
        assert_eq!(sale.product.detail.as_deref(), Some("Digital"));
        assert_eq!(sale.channel.display_name(), "Shopee");
        assert_eq!(sale.price, Money::from_major(150_000));
        assert_eq!(sale.purchase_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(sale.ship_date, None);
        assert_eq!(report, IngestReport { sales_read: 1, ..IngestReport::default() });
    }

    #[test]
    fn test_input_form_and_camel_case_aliases() {
        let (snap, _) = parse(
            r#"{"id": "s1", "customer_id": "c1", "productId": "p1", "channel_id": "ch1",
                "purchaseDate": "2024-03-05", "shipDate": "2024-03-06", "price": 1}"#,
        );
        let sale = &snap.sales[0];
        assert_eq!(sale.customer.display_name(), "Budi");
        assert_eq!(sale.product.display_name(), "Netflix");
        assert_eq!(sale.channel.display_name(), "Shopee");
        assert_eq!(sale.ship_date, NaiveDate::from_ymd_opt(2024, 3, 6));
    }

    #[test]
    fn test_embedded_prefers_live_entity() {
        let (snap, _) = parse(
            r#"{"id": "s1", "channel": {"id": "ch1", "name": "Old Shopee Name"},
                "price": 1, "date": "2024-03-05"}"#,
        );
        assert_eq!(snap.sales[0].channel.display_name(), "Shopee");
    }

    #[test]
    fn test_embedded_falls_back_to_its_own_fields() {
        let (snap, report) = parse(
            r#"{"id": "s1", "channel": {"id": "deleted", "name": "Lazada"},
                "customer": {"name": "Walk-in", "username": "walkin"},
                "price": 1, "date": "2024-03-05"}"#,
        );
        let sale = &snap.sales[0];
        assert_eq!(sale.channel.display_name(), "Lazada");
        assert!(sale.channel.is("deleted"));
        assert_eq!(sale.customer.detail.as_deref(), Some("walkin"));
        // product, payment, admin are missing
        assert_eq!(report.unresolved_refs, 3);
    }

    #[test]
    fn test_unknown_id_is_unresolved() {
        let (snap, report) = parse(
            r#"{"id": "s1", "customer": "c1", "product": "p1", "channel": "nope",
                "payment": 42, "admin": "a1", "price": 1, "date": "2024-03-05"}"#,
        );
        let sale = &snap.sales[0];
        assert_eq!(sale.channel.display_name(), "N/A");
        assert!(sale.channel.is("nope"));
        assert!(sale.payment.is("42"));
        assert_eq!(report.unresolved_refs, 2);
    }

    #[test]
    fn test_price_coercion() {
        let (snap, report) = parse(
            r#"{"id": "a", "price": "75000", "date": "2024-03-05"},
               {"id": "b", "price": "abc", "date": "2024-03-05"},
               {"id": "c", "price": -5000, "date": "2024-03-05"},
               {"id": "d", "price": null, "date": "2024-03-05"},
               {"id": "e", "price": 1250.5, "date": "2024-03-05"}"#,
        );
        let prices: Vec<i64> = snap.sales.iter().map(|s| s.price.minor()).collect();
        assert_eq!(prices, vec![7_500_000, 0, 0, 0, 125_050]);
        assert_eq!(report.coerced_prices, 3);
    }

    #[test]
    fn test_bad_purchase_date_skips_sale() {
        let (snap, report) = parse(
            r#"{"id": "ok", "price": 1, "date": "2024-03-05T08:30:00.000Z"},
               {"id": "bad", "price": 1, "date": "kemarin"},
               {"id": "none", "price": 1}"#,
        );
        assert_eq!(snap.sales.len(), 1);
        assert_eq!(snap.sales[0].id, "ok");
        assert_eq!(report.sales_read, 3);
        assert_eq!(report.skipped_sales, 2);
    }

    #[test]
    fn test_missing_id_gets_uuid() {
        let (snap, report) = parse(r#"{"price": 1, "date": "2024-03-05"}"#);
        assert!(Uuid::parse_str(&snap.sales[0].id).is_ok());
        assert_eq!(report.generated_ids, 1);
    }

    #[test]
    fn test_null_list_fields_become_empty() {
        let doc = br#"{
            "customers": [{"id": "c1", "name": "Budi", "username": "b", "note": null}],
            "channels": [{"id": "ch1", "name": "Shopee", "desc": null}],
            "sales": [{"id": "s1", "customer": "c1", "channel": "ch1",
                       "price": 1, "date": "2024-03-05"}]
        }"#;
        let (snap, report) = parse_snapshot(doc).unwrap();

        assert_eq!(snap.customers[0].note, "");
        assert_eq!(snap.customers[0].username, "b");
        assert_eq!(snap.channels[0].desc, "");
        assert_eq!(snap.sales[0].customer.display_name(), "Budi");
        assert_eq!(snap.sales[0].channel.display_name(), "Shopee");
        // customer note, channel desc (null) and channel url (missing)
        assert_eq!(report.blank_fields, 3);
        assert_eq!(report.skipped_sales, 0);
    }

    #[test]
    fn test_numeric_ids_everywhere() {
        let doc = br#"{
            "channels": [{"id": 1, "name": "Shopee", "desc": "", "url": ""}],
            "payments": [{"id": "2", "name": "GoPay", "desc": "", "code": ""}],
            "sales": [{"id": 7, "channel": {"id": 1, "name": "Old"},
                       "payment": {"id": 2}, "price": 1, "date": "2024-03-05"}]
        }"#;
        let (snap, report) = parse_snapshot(doc).unwrap();

        assert_eq!(snap.channels[0].id, "1");
        let sale = &snap.sales[0];
        assert_eq!(sale.id, "7");
        assert_eq!(sale.channel.display_name(), "Shopee");
        assert!(sale.channel.is("1"));
        assert_eq!(sale.payment.display_name(), "GoPay");
        assert_eq!(report.generated_ids, 0);
        assert_eq!(report.blank_fields, 0);
    }

    #[test]
    fn test_list_entry_without_id_gets_uuid() {
        let (snap, report) =
            parse_snapshot(br#"{"products": [{"name": "Canva", "type": "Digital", "sku": ""}]}"#)
                .unwrap();
        assert!(Uuid::parse_str(&snap.products[0].id).is_ok());
        assert_eq!(report.generated_ids, 1);
    }

    #[test]
    fn test_save_then_load_preserves_sales() {
        let (snap, _) = parse(
            r#"{"id": "s1", "customer": "c1", "product": "p1", "channel": "ch1",
                "payment": "pay1", "admin": "a1", "price": 150000.25, "link": "https://x",
                "date": "2024-03-05", "ship_date": "2024-03-07", "note": "gift"},
               {"id": "s2", "channel": {"name": "Offline"}, "price": 10, "date": "2024-03-06"}"#,
        );

        let bytes = snapshot_to_json(&snap, true).unwrap();
        let (reloaded, report) = parse_snapshot(&bytes).unwrap();
        assert_eq!(reloaded, snap);
        assert_eq!(report.blank_fields, 0);
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_snapshot(b"[1, 2, 3]").is_err());
        assert!(parse_snapshot(b"not json").is_err());
        let (empty, report) = parse_snapshot(b"{}").unwrap();
        assert!(empty.is_empty());
        assert_eq!(report, IngestReport::default());
    }
}
