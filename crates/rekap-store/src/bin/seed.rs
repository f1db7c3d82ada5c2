//! # Demo Data Seeder
//!
//! Writes a demo snapshot document for development.
//!
//! ## Usage
//! ```bash
//! # Generate 120 sales (default) into ./rekap.json
//! cargo run -p rekap-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p rekap-store --bin seed -- --count 500
//!
//! # Specify snapshot path, replacing an existing file
//! cargo run -p rekap-store --bin seed -- --data ./data/rekap.json --force
//! ```
//!
//! ## Generated Data
//! - 8 customers, 6 products, 4 channels, 4 payment methods, 3 admins
//! - Sales spread over the last 90 days, ids are UUID v4
//! - Physical products carry a ship date

use std::env;

use chrono::Local;
use rekap_core::aggregate::{filter_and_aggregate, SalesQuery};
use rekap_core::window::DateWindow;
use rekap_store::demo::{demo_snapshot, DEFAULT_SALE_COUNT};
use rekap_store::{JsonFileStore, JsonStoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = DEFAULT_SALE_COUNT;
    let mut data_path = String::from("./rekap.json");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_SALE_COUNT);
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Rekap POS Demo Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of sales to generate (default: {DEFAULT_SALE_COUNT})");
                println!("  -d, --data <PATH>   Snapshot file path (default: ./rekap.json)");
                println!("  -f, --force         Overwrite an existing snapshot");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Rekap POS Demo Data Seeder");
    println!("============================");
    println!("Snapshot: {}", data_path);
    println!("Sales:    {}", count);
    println!();

    let store = JsonFileStore::new(JsonStoreConfig::new(&data_path));

    if store.exists().await && !force {
        println!("⚠ {} already exists", data_path);
        println!("  Skipping seed to avoid overwriting real data.");
        println!("  Re-run with --force to replace it.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let snapshot = demo_snapshot(count, Local::now().date_naive());
    store.save(&snapshot).await?;

    println!("✓ Wrote {} sales in {:?}", snapshot.sales.len(), start.elapsed());

    // Verify by reading it back
    let (reloaded, report) = store.load_with_report().await?;
    let all_time = filter_and_aggregate(&reloaded.sales, &SalesQuery::new(DateWindow::unbounded()));
    println!(
        "  Reloaded: {} sales, revenue {}",
        all_time.kpis.total_orders, all_time.kpis.total_revenue
    );
    if !report.is_clean() {
        println!("  ⚠ Ingestion repairs: {:?}", report);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
