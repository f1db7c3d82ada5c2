//! `rekap dashboard`: the home screen figures over all sales.

use std::fmt::{self, Write};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use rekap_core::dashboard::DashboardSummary;
use rekap_core::error::ValidationError;
use rekap_core::format::{format_date, CurrencyFormat};
use rekap_core::window::parse_calendar_date;
use rekap_report::{render_table, Column, Table};

use super::{load_snapshot, open_store};
use crate::config::RekapConfig;
use crate::DashboardArgs;

pub async fn run(config: &RekapConfig, args: DashboardArgs) -> anyhow::Result<()> {
    let today = today_from(args.today.as_deref(), Local::now().date_naive())?;

    let store = open_store(config);
    let snapshot = load_snapshot(&store).await?;
    let summary = DashboardSummary::compute(&snapshot, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary).context("serializing dashboard")?);
    } else {
        print!("{}", render(&summary, today, &config.currency)?);
    }
    Ok(())
}

/// The `--today` flag as a date, or `fallback` when it is absent.
fn today_from(arg: Option<&str>, fallback: NaiveDate) -> Result<NaiveDate, ValidationError> {
    match arg {
        Some(text) => parse_calendar_date(text).ok_or_else(|| ValidationError::InvalidFormat {
            field: "--today".to_string(),
            reason: format!("expected YYYY-MM-DD, got {text:?}"),
        }),
        None => Ok(fallback),
    }
}

fn render(summary: &DashboardSummary, today: NaiveDate, currency: &CurrencyFormat) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let kpis = &summary.kpis;

    writeln!(out, "Dashboard ({})\n", format_date(today))?;
    writeln!(out, "Total orders   {}", currency.format_count(kpis.total_orders))?;
    writeln!(out, "Total revenue  {}", currency.format(kpis.total_revenue))?;
    writeln!(out, "Average order  {}", currency.format(kpis.average_order_value))?;
    writeln!(out, "Top channel    {}\n", summary.top_channel)?;

    let last_7_days = Table {
        title: "Last 7 days".to_string(),
        columns: vec![
            Column::left("Date", 1.0),
            Column::right("Orders", 1.0),
            Column::right("Revenue", 1.0),
        ],
        rows: summary
            .last_7_days
            .iter()
            .map(|day| {
                vec![
                    format_date(day.date),
                    currency.format_count(day.orders),
                    currency.format(day.revenue),
                ]
            })
            .collect(),
        empty_message: String::new(),
    };
    render_table(&mut out, &last_7_days)?;
    writeln!(out)?;

    let this_month = Table {
        title: "Channels this month".to_string(),
        columns: vec![
            Column::left("Channel", 1.0),
            Column::right("Orders", 1.0),
            Column::right("Revenue", 1.0),
        ],
        rows: summary
            .month_channels
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    currency.format_count(row.orders),
                    currency.format(row.revenue),
                ]
            })
            .collect(),
        empty_message: "No sales this month".to_string(),
    };
    render_table(&mut out, &this_month)?;

    Ok(out)
}
