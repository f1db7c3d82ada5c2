//! `rekap report`: the period report on screen or as JSON.

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use rekap_core::aggregate::{filter_and_aggregate, Aggregation};
use rekap_core::types::{Section, Snapshot};
use rekap_report::{render_text, ReportDocument, ReportOptions};
use tracing::info;

use super::{build_query, load_with_report, open_store};
use crate::config::RekapConfig;
use crate::ReportArgs;

pub async fn run(config: &RekapConfig, args: ReportArgs) -> anyhow::Result<()> {
    let store = open_store(config);
    let (snapshot, ingest) = load_with_report(&store).await?;
    let now = Local::now().naive_local();

    let output = render(config, &args, &snapshot, ingest.skipped_sales, now)?;
    println!("{}", output);
    Ok(())
}

/// Aggregates and formats the report output.
fn render(
    config: &RekapConfig,
    args: &ReportArgs,
    snapshot: &Snapshot,
    skipped: usize,
    now: NaiveDateTime,
) -> anyhow::Result<String> {
    let query = build_query(&args.window, &args.dimensions, config, now);
    let aggregation = filter_and_aggregate(&snapshot.sales, &query);
    log_result(&aggregation);

    if args.json {
        return serde_json::to_string_pretty(&aggregation).context("serializing report");
    }

    // Screen view: summary, transactions and rollups; listings are export-only.
    let options = ReportOptions::new(&config.report.title)
        .with_sections(vec![Section::Sales])
        .with_currency(config.currency.clone())
        .with_skipped_records(skipped);
    let doc = ReportDocument::build(&aggregation, snapshot, &options, now);
    Ok(render_text(&doc))
}

fn log_result(aggregation: &Aggregation) {
    info!(
        period = %aggregation.window.period_label(),
        orders = aggregation.kpis.total_orders,
        revenue = %aggregation.kpis.total_revenue,
        "Report aggregated"
    );
}
