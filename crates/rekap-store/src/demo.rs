//! # Demo Data
//!
//! Builds a realistic snapshot for trying the reports without a live back
//! office: a small shop selling digital subscriptions and a few physical
//! goods over marketplaces and chat.
//!
//! Everything except the UUIDs is a pure function of `(count, today)`, so two
//! runs on the same day produce the same figures.
//!
//! ```text
//! 8 customers × 6 products × 4 channels × 4 payments × 3 admins
//!                        │
//!                        ▼
//!        `count` sales spread over the last 90 days
//! ```

use chrono::{Days, NaiveDate};
use rekap_core::money::Money;
use rekap_core::types::{Admin, Channel, Customer, EntityRef, Payment, Product, SaleRecord, Snapshot};
use uuid::Uuid;

/// Default number of generated sales.
pub const DEFAULT_SALE_COUNT: usize = 120;

/// Sales are spread over this many days ending today.
pub const DEMO_SPAN_DAYS: usize = 90;

/// (name, username)
const CUSTOMERS: &[(&str, &str)] = &[
    ("Budi Santoso", "budis"),
    ("Siti Rahma", "sitirahma"),
    ("Agus Wijaya", "agusw"),
    ("Dewi Lestari", "dewil"),
    ("Rina Marlina", "rinam"),
    ("Joko Prasetyo", "jokop"),
    ("Putri Ayu", "putriayu"),
    ("Hendra Gunawan", "hendrag"),
];

/// (name, type, sku, base price)
const PRODUCTS: &[(&str, &str, &str, i64)] = &[
    ("Netflix Premium 1 Bulan", "Digital", "NF-PRM-1", 55_000),
    ("Spotify Family 1 Bulan", "Digital", "SP-FAM-1", 35_000),
    ("Canva Pro 1 Tahun", "Digital", "CV-PRO-12", 150_000),
    ("YouTube Premium 3 Bulan", "Digital", "YT-PRM-3", 90_000),
    ("Kaos Polos Hitam", "Fisik", "KP-HTM-L", 75_000),
    ("Tumbler Stainless 500ml", "Fisik", "TB-SS-500", 120_000),
];

/// (name, desc, url)
const CHANNELS: &[(&str, &str, &str)] = &[
    ("Shopee", "Marketplace", "https://shopee.co.id"),
    ("Tokopedia", "Marketplace", "https://tokopedia.com"),
    ("WhatsApp", "Chat langsung", "https://wa.me"),
    ("Instagram", "DM Instagram", "https://instagram.com"),
];

/// (name, desc, code)
const PAYMENTS: &[(&str, &str, &str)] = &[
    ("BCA Transfer", "Transfer bank", "BCA"),
    ("GoPay", "E-wallet", "GOPAY"),
    ("OVO", "E-wallet", "OVO"),
    ("QRIS", "QR pembayaran", "QRIS"),
];

/// (name, username)
const ADMINS: &[(&str, &str)] = &[("Sari", "sari"), ("Rizky", "rizky"), ("Dewi", "dewi")];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds the demo snapshot.
pub fn demo_snapshot(count: usize, today: NaiveDate) -> Snapshot {
    let customers: Vec<Customer> = CUSTOMERS
        .iter()
        .map(|(name, username)| Customer {
            id: new_id(),
            name: name.to_string(),
            username: username.to_string(),
            note: String::new(),
        })
        .collect();

    let products: Vec<Product> = PRODUCTS
        .iter()
        .map(|(name, product_type, sku, _)| Product {
            id: new_id(),
            name: name.to_string(),
            product_type: product_type.to_string(),
            sku: sku.to_string(),
        })
        .collect();

    let channels: Vec<Channel> = CHANNELS
        .iter()
        .map(|(name, desc, url)| Channel {
            id: new_id(),
            name: name.to_string(),
            desc: desc.to_string(),
            url: url.to_string(),
        })
        .collect();

    let payments: Vec<Payment> = PAYMENTS
        .iter()
        .map(|(name, desc, code)| Payment {
            id: new_id(),
            name: name.to_string(),
            desc: desc.to_string(),
            code: code.to_string(),
        })
        .collect();

    let admins: Vec<Admin> = ADMINS
        .iter()
        .map(|(name, username)| Admin {
            id: new_id(),
            name: name.to_string(),
            username: username.to_string(),
            note: String::new(),
        })
        .collect();

    let sales = (0..count)
        .map(|i| {
            let customer = &customers[(i * 7 + 3) % customers.len()];
            let product_idx = (i * 5 + 1) % products.len();
            let product = &products[product_idx];
            let channel = &channels[(i * 3 + i / 4) % channels.len()];
            let payment = &payments[(i * 11) % payments.len()];
            let admin = &admins[i % admins.len()];

            let days_back = (i * 37 + i / 5) % DEMO_SPAN_DAYS;
            let purchase_date = today
                .checked_sub_days(Days::new(days_back as u64))
                .unwrap_or(today);

            let (_, product_type, _, base_price) = PRODUCTS[product_idx];
            let price = base_price + ((i * 13) % 5) as i64 * 5_000;

            let ship_date = (product_type == "Fisik")
                .then(|| purchase_date.checked_add_days(Days::new(1 + (i % 3) as u64)))
                .flatten();

            SaleRecord {
                id: new_id(),
                customer: EntityRef::from(customer),
                product: EntityRef::from(product),
                channel: EntityRef::from(channel),
                payment: EntityRef::from(payment),
                admin: EntityRef::from(admin),
                price: Money::from_major(price),
                link: format!("{}/order/{:06}", channel.url, 100_000 + i * 17),
                purchase_date,
                ship_date,
                note: if i % 6 == 0 {
                    "Pelanggan lama".to_string()
                } else {
                    String::new()
                },
            }
        })
        .collect();

    Snapshot {
        customers,
        products,
        channels,
        payments,
        admins,
        sales,
    }
}
