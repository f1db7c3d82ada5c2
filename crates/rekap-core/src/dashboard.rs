//! # Dashboard Summary
//!
//! The at-a-glance figures of the back office home screen, computed over the
//! whole snapshot (no report window, no search).
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Total orders │ Revenue      │ Avg. order   │ Top channel  │
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//! ┌─────────────────────────────┐ ┌─────────────────────────────┐
//! │ Last 7 days (oldest first)  │ │ This month, per channel     │
//! │ date    orders   revenue    │ │ name    orders   revenue    │
//! └─────────────────────────────┘ └─────────────────────────────┘
//! ```
//!
//! "Today" is passed in, like every other clock-dependent input of this crate.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregate::{rollup, top_by_revenue, AggregationRow, ReportKpis};
use crate::format::EMPTY_CELL;
use crate::money::Money;
use crate::types::{SaleRecord, Snapshot};

/// Number of days in the recent activity strip.
pub const RECENT_DAYS: u64 = 7;

/// Orders and revenue of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyStat {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub orders: u64,
    pub revenue: Money,
}

/// Home screen figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub kpis: ReportKpis,
    /// Name of the highest-revenue channel, `-` when there is none.
    pub top_channel: String,
    /// One entry per day ending today, oldest first, zero-filled.
    pub last_7_days: Vec<DailyStat>,
    /// Channels of the reference list with at least one order this month,
    /// in reference-list order.
    pub month_channels: Vec<AggregationRow>,
}

impl DashboardSummary {
    /// Computes the summary for `today`.
    pub fn compute(snapshot: &Snapshot, today: NaiveDate) -> Self {
        DashboardSummary {
            kpis: ReportKpis::from_records(&snapshot.sales),
            top_channel: top_channel(snapshot),
            last_7_days: recent_days(&snapshot.sales, today),
            month_channels: month_channels(snapshot, today),
        }
    }
}

/// Top channel by revenue, grouped by channel id and named from the
/// reference list.
fn top_channel(snapshot: &Snapshot) -> String {
    let by_id = rollup(
        snapshot.sales.iter().filter(|sale| sale.channel.id.is_some()),
        |sale| sale.channel.id.clone().unwrap_or_default(),
    );

    top_by_revenue(&by_id)
        .and_then(|row| snapshot.channels.iter().find(|c| c.id == row.name))
        .map(|channel| channel.name.clone())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

fn recent_days(sales: &[SaleRecord], today: NaiveDate) -> Vec<DailyStat> {
    (0..RECENT_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let kpis = ReportKpis::from_records(sales.iter().filter(|s| s.purchase_date == date));
            DailyStat {
                date,
                orders: kpis.total_orders,
                revenue: kpis.total_revenue,
            }
        })
        .collect()
}

fn month_channels(snapshot: &Snapshot, today: NaiveDate) -> Vec<AggregationRow> {
    let in_month = |sale: &&SaleRecord| {
        sale.purchase_date.year() == today.year() && sale.purchase_date.month() == today.month()
    };

    snapshot
        .channels
        .iter()
        .map(|channel| {
            let kpis = ReportKpis::from_records(
                snapshot
                    .sales
                    .iter()
                    .filter(in_month)
                    .filter(|sale| sale.channel.is(&channel.id)),
            );
            AggregationRow {
                name: channel.name.clone(),
                orders: kpis.total_orders,
                revenue: kpis.total_revenue,
            }
        })
        .filter(|row| row.orders > 0)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
