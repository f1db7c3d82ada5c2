//! Shared fixtures for renderer tests.

use chrono::{NaiveDate, NaiveDateTime};
use rekap_core::money::Money;
use rekap_core::types::{Admin, Channel, Customer, EntityRef, Payment, Product, SaleRecord, Snapshot};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn now() -> NaiveDateTime {
    date(2024, 3, 15).and_hms_opt(10, 20, 0).unwrap()
}

pub fn sale(id: &str, day: NaiveDate, price: i64, channel: &str) -> SaleRecord {
    SaleRecord {
        id: id.to_string(),
        customer: EntityRef::named("c1", "Budi Santoso").with_detail("budis"),
        product: EntityRef::named("p1", "Netflix Premium").with_detail("Digital"),
        channel: EntityRef::named(format!("ch-{channel}"), channel),
        payment: EntityRef::named("pay1", "BCA Transfer"),
        admin: EntityRef::named("a1", "Sari"),
        price: Money::from_major(price),
        link: String::new(),
        purchase_date: day,
        ship_date: None,
        note: String::new(),
    }
}

/// Two March sales (channels A and B) and one in April.
pub fn march_snapshot() -> Snapshot {
    let mut first = sale("s1", date(2024, 3, 5), 100_000, "A");
    first.ship_date = Some(date(2024, 3, 7));

    Snapshot {
        customers: vec![Customer {
            id: "c1".to_string(),
            name: "Budi Santoso".to_string(),
            username: "budis".to_string(),
            note: String::new(),
        }],
        products: vec![Product {
            id: "p1".to_string(),
            name: "Netflix Premium".to_string(),
            product_type: "Digital".to_string(),
            sku: "NF-1".to_string(),
        }],
        channels: ["A", "B"]
            .iter()
            .map(|name| Channel {
                id: format!("ch-{name}"),
                name: name.to_string(),
                desc: String::new(),
                url: String::new(),
            })
            .collect(),
        payments: vec![Payment {
            id: "pay1".to_string(),
            name: "BCA Transfer".to_string(),
            desc: "Transfer bank".to_string(),
            code: "BCA".to_string(),
        }],
        admins: vec![Admin {
            id: "a1".to_string(),
            name: "Sari".to_string(),
            username: "sari".to_string(),
            note: String::new(),
        }],
        sales: vec![
            first,
            sale("s2", date(2024, 3, 20), 50_000, "B"),
            sale("s3", date(2024, 4, 1), 75_000, "A"),
        ],
    }
}

/// `count` sales spread over March 2024.
pub fn many_sales(count: usize) -> Snapshot {
    let sales = (0..count)
        .map(|i| {
            let channel = if i % 2 == 0 { "A" } else { "B" };
            sale(&format!("s{i}"), date(2024, 3, 1 + (i % 28) as u32), 10_000 + i as i64, channel)
        })
        .collect();
    Snapshot {
        sales,
        ..march_snapshot()
    }
}
