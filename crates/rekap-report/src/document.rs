//! # Report Document
//!
//! The single model both renderers draw from. Every figure is formatted
//! here, once, so the terminal view and the PDF cannot disagree.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sales Recap Report                                        (title)      │
//! │  Printed: 15/03/2024 10:20:00                                           │
//! │  Period: 2024-03-01 to 2024-03-31                                       │
//! │                                                                         │
//! │  Summary         Total orders / Total revenue / Average / Top ...       │
//! │                                                                         │
//! │  Transactions    No | Date | Customer | Product | Channel | Price ...   │
//! │                  (omitted unless Section::Sales is selected)            │
//! │                                                                         │
//! │  Sales by Channel / Product / Admin ...  (one per dimension)            │
//! │                                                                         │
//! │  Customers / Products / Channels / Payments / Admins                    │
//! │                  (full listings for the selected sections)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty table keeps its title and header and carries a "no data"
//! message that renderers print in place of rows.

use chrono::NaiveDateTime;
use rekap_core::aggregate::{top_by_revenue, Aggregation, Dimension};
use rekap_core::format::{format_date, format_date_opt, format_timestamp, CurrencyFormat, EMPTY_CELL};
use rekap_core::types::{Section, Snapshot};
use serde::Serialize;

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "Sales Recap Report";

/// Message for a table without rows in the selected period.
pub const NO_DATA_FOR_PERIOD: &str = "No data for this period";

/// Message for an empty reference listing.
pub const NO_DATA: &str = "No data";

// =============================================================================
// Options
// =============================================================================

/// What goes into the report.
///
/// ## Example
/// ```rust
/// use rekap_core::types::Section;
/// use rekap_report::ReportOptions;
///
/// let options = ReportOptions::new("March recap")
///     .with_sections(vec![Section::Sales, Section::Channels]);
/// assert!(options.includes(Section::Sales));
/// assert!(!options.includes(Section::Customers));
///
/// // No section list means everything
/// assert!(ReportOptions::default().includes(Section::Admins));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub title: String,
    /// `None` includes every section.
    pub sections: Option<Vec<Section>>,
    pub currency: CurrencyFormat,
    /// Sales dropped at ingestion, shown in the summary when non-zero.
    pub skipped_records: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions::new(DEFAULT_TITLE)
    }
}

impl ReportOptions {
    pub fn new(title: impl Into<String>) -> Self {
        ReportOptions {
            title: title.into(),
            sections: None,
            currency: CurrencyFormat::default(),
            skipped_records: 0,
        }
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = Some(sections);
        self
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_skipped_records(mut self, skipped: usize) -> Self {
        self.skipped_records = skipped;
        self
    }

    /// Whether `section` is part of the report.
    pub fn includes(&self, section: Section) -> bool {
        self.sections
            .as_ref()
            .map_or(true, |sections| sections.contains(&section))
    }
}

// =============================================================================
// Model
// =============================================================================

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Right,
}

/// A table column. `weight` is its share of the table width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub heading: String,
    pub weight: f32,
    pub align: Align,
}

impl Column {
    /// A left-aligned text column.
    pub fn left(heading: &str, weight: f32) -> Self {
        Column {
            heading: heading.to_string(),
            weight,
            align: Align::Left,
        }
    }

    /// A right-aligned figure column.
    pub fn right(heading: &str, weight: f32) -> Self {
        Column {
            heading: heading.to_string(),
            weight,
            align: Align::Right,
        }
    }
}

/// A titled table of preformatted cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Printed in place of rows when `rows` is empty.
    pub empty_message: String,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One line of the summary block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

impl SummaryLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        SummaryLine {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A fully formatted report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub printed_at: NaiveDateTime,
    pub period: String,
    pub summary: Vec<SummaryLine>,
    pub tables: Vec<Table>,
}

impl ReportDocument {
    /// Builds the document for one aggregation.
    ///
    /// `snapshot` supplies the reference listings; the sales figures come
    /// only from `aggregation`.
    pub fn build(
        aggregation: &Aggregation,
        snapshot: &Snapshot,
        options: &ReportOptions,
        printed_at: NaiveDateTime,
    ) -> Self {
        let currency = &options.currency;

        let mut period = aggregation.window.period_label();
        if let Some(search) = &aggregation.search {
            period.push_str(&format!(" (search: \"{}\")", search));
        }

        let mut tables = Vec::new();
        if options.includes(Section::Sales) {
            tables.push(transactions_table(aggregation, currency));
        }
        for dimension in &aggregation.dimensions {
            tables.push(rollup_table(aggregation, *dimension, currency));
        }
        tables.extend(
            Section::ALL
                .into_iter()
                .filter(|section| options.includes(*section))
                .filter_map(|section| listing_table(section, snapshot)),
        );

        let mut summary = summary_lines(aggregation, currency);
        if options.skipped_records > 0 {
            summary.push(SummaryLine::new(
                "Skipped records",
                format!(
                    "{} with an invalid purchase date",
                    currency.format_count(options.skipped_records as u64)
                ),
            ));
        }

        ReportDocument {
            title: options.title.clone(),
            printed_at,
            period,
            summary,
            tables,
        }
    }

    /// Print timestamp as displayed.
    pub fn printed_label(&self) -> String {
        format_timestamp(self.printed_at)
    }

    /// Looks up a table by title.
    pub fn table(&self, title: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.title == title)
    }
}

// =============================================================================
// Sections
// =============================================================================

fn summary_lines(aggregation: &Aggregation, currency: &CurrencyFormat) -> Vec<SummaryLine> {
    let kpis = &aggregation.kpis;
    let mut lines = vec![
        SummaryLine::new(
            "Total orders",
            format!("{} transactions", currency.format_count(kpis.total_orders)),
        ),
        SummaryLine::new("Total revenue", currency.format(kpis.total_revenue)),
        SummaryLine::new("Average per order", currency.format(kpis.average_order_value)),
    ];

    for dimension in &aggregation.dimensions {
        let value = top_by_revenue(aggregation.rollup(*dimension))
            .map(|row| format!("{} ({})", row.name, currency.format(row.revenue)))
            .unwrap_or_else(|| EMPTY_CELL.to_string());
        lines.push(SummaryLine::new(
            format!("Top {}", dimension.label().to_lowercase()),
            value,
        ));
    }

    lines
}

fn transactions_table(aggregation: &Aggregation, currency: &CurrencyFormat) -> Table {
    let rows = aggregation
        .filtered
        .iter()
        .enumerate()
        .map(|(i, sale)| {
            vec![
                (i + 1).to_string(),
                format_date(sale.purchase_date),
                sale.customer.display_name().to_string(),
                sale.product.display_name().to_string(),
                sale.channel.display_name().to_string(),
                currency.format(sale.price),
                sale.payment.display_name().to_string(),
                sale.admin.display_name().to_string(),
                format_date_opt(sale.ship_date),
            ]
        })
        .collect();

    Table {
        title: "Transactions".to_string(),
        columns: vec![
            Column::right("No", 0.5),
            Column::left("Date", 1.1),
            Column::left("Customer", 1.6),
            Column::left("Product", 2.0),
            Column::left("Channel", 1.2),
            Column::right("Price", 1.3),
            Column::left("Payment", 1.2),
            Column::left("Admin", 1.0),
            Column::left("Shipped", 1.1),
        ],
        rows,
        empty_message: NO_DATA_FOR_PERIOD.to_string(),
    }
}

fn rollup_table(aggregation: &Aggregation, dimension: Dimension, currency: &CurrencyFormat) -> Table {
    let rows = aggregation
        .rollup(dimension)
        .iter()
        .map(|row| {
            vec![
                row.name.clone(),
                currency.format_count(row.orders),
                currency.format(row.revenue),
            ]
        })
        .collect();

    Table {
        title: format!("Sales by {}", dimension.label()),
        columns: vec![
            Column::left(dimension.label(), 3.0),
            Column::right("Orders", 1.0),
            Column::right("Revenue", 1.6),
        ],
        rows,
        empty_message: NO_DATA_FOR_PERIOD.to_string(),
    }
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

/// The full listing for a reference section; `None` for [`Section::Sales`].
fn listing_table(section: Section, snapshot: &Snapshot) -> Option<Table> {
    let (title, columns, rows): (&str, Vec<Column>, Vec<Vec<String>>) = match section {
        Section::Sales => return None,
        Section::Customers => (
            "Customers",
            vec![Column::left("Name", 2.0), Column::left("Username", 1.5), Column::left("Note", 2.5)],
            snapshot
                .customers
                .iter()
                .map(|c| vec![or_dash(&c.name), or_dash(&c.username), or_dash(&c.note)])
                .collect(),
        ),
        Section::Products => (
            "Products",
            vec![Column::left("Name", 2.5), Column::left("Type", 1.2), Column::left("SKU", 1.3)],
            snapshot
                .products
                .iter()
                .map(|p| vec![or_dash(&p.name), or_dash(&p.product_type), or_dash(&p.sku)])
                .collect(),
        ),
        Section::Channels => (
            "Channels",
            vec![Column::left("Name", 1.5), Column::left("Description", 2.0), Column::left("URL", 2.5)],
            snapshot
                .channels
                .iter()
                .map(|c| vec![or_dash(&c.name), or_dash(&c.desc), or_dash(&c.url)])
                .collect(),
        ),
        Section::Payments => (
            "Payments",
            vec![Column::left("Name", 1.5), Column::left("Description", 2.5), Column::left("Code", 1.0)],
            snapshot
                .payments
                .iter()
                .map(|p| vec![or_dash(&p.name), or_dash(&p.desc), or_dash(&p.code)])
                .collect(),
        ),
        Section::Admins => (
            "Admins",
            vec![Column::left("Name", 2.0), Column::left("Username", 1.5), Column::left("Note", 2.5)],
            snapshot
                .admins
                .iter()
                .map(|a| vec![or_dash(&a.name), or_dash(&a.username), or_dash(&a.note)])
                .collect(),
        ),
    };

    Some(Table {
        title: title.to_string(),
        columns,
        rows,
        empty_message: NO_DATA.to_string(),
    })
}

/// Shortens `text` to at most `max_chars` characters, marking the cut.
pub(crate) fn fit(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut shortened: String = text.chars().take(max_chars - 3).collect();
    shortened.push_str("...");
    shortened
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{march_snapshot, now};
    use rekap_core::aggregate::{filter_and_aggregate, SalesQuery};
    use rekap_core::window::{resolve_window, Preset};

    fn build(preset: Preset, options: &ReportOptions) -> ReportDocument {
        let snapshot = march_snapshot();
        let window = resolve_window(preset, now(), None, None);
        let aggregation = filter_and_aggregate(&snapshot.sales, &SalesQuery::new(window));
        ReportDocument::build(&aggregation, &snapshot, options, now())
    }

    #[test]
    fn test_header_and_summary() {
        let doc = build(Preset::Monthly, &ReportOptions::default());
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.printed_label(), "15/03/2024 10:20:00");
        assert_eq!(doc.period, "2024-03-01 to 2024-03-31");

        let values: Vec<&str> = doc.summary.iter().map(|l| l.value.as_str()).collect();
        assert_eq!(values[0], "2 transactions");
        assert_eq!(values[1], "Rp 150.000");
        assert_eq!(values[2], "Rp 75.000");
        assert_eq!(doc.summary[3].label, "Top channel");
        assert_eq!(values[3], "A (Rp 100.000)");
    }

    #[test]
    fn test_tables_follow_aggregation() {
        let doc = build(Preset::Monthly, &ReportOptions::default());

        let sales = doc.table("Transactions").unwrap();
        assert_eq!(sales.rows.len(), 2);
        // newest first, display date format
        assert_eq!(sales.rows[0][1], "20/03/2024");
        assert_eq!(sales.rows[0][5], "Rp 50.000");
        assert_eq!(sales.rows[1][8], "07/03/2024");
        assert_eq!(sales.rows[0][8], "-");

        let by_channel = doc.table("Sales by Channel").unwrap();
        assert_eq!(by_channel.rows, vec![
            vec!["A".to_string(), "1".to_string(), "Rp 100.000".to_string()],
            vec!["B".to_string(), "1".to_string(), "Rp 50.000".to_string()],
        ]);

        let titles: Vec<&str> = doc.tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Transactions",
                "Sales by Channel",
                "Sales by Product",
                "Sales by Admin",
                "Customers",
                "Products",
                "Channels",
                "Payments",
                "Admins",
            ]
        );
    }

    #[test]
    fn test_listing_table_per_section() {
        let snapshot = march_snapshot();
        assert!(listing_table(Section::Sales, &snapshot).is_none());

        let admins = listing_table(Section::Admins, &snapshot).unwrap();
        assert_eq!(admins.title, "Admins");
        assert_eq!(admins.rows.len(), snapshot.admins.len());
        assert_eq!(listing_table(Section::Channels, &snapshot).unwrap().title, "Channels");
    }

    #[test]
    fn test_skipped_records_in_summary() {
        let doc = build(Preset::Monthly, &ReportOptions::default());
        assert!(doc.summary.iter().all(|l| l.label != "Skipped records"));

        let doc = build(Preset::Monthly, &ReportOptions::default().with_skipped_records(2));
        let last = doc.summary.last().unwrap();
        assert_eq!(last.label, "Skipped records");
        assert_eq!(last.value, "2 with an invalid purchase date");
    }

    #[test]
    fn test_sections_limit_tables() {
        let options = ReportOptions::default().with_sections(vec![Section::Channels]);
        let doc = build(Preset::Monthly, &options);
        assert!(doc.table("Transactions").is_none());
        assert!(doc.table("Customers").is_none());
        assert!(doc.table("Channels").is_some());
        // rollups are always part of the report
        assert!(doc.table("Sales by Admin").is_some());
    }

    #[test]
    fn test_empty_period_renders_no_data() {
        let snapshot = march_snapshot();
        let window = resolve_window(Preset::Custom, now(), Some("2030-01-01"), None);
        let aggregation = filter_and_aggregate(&snapshot.sales, &SalesQuery::new(window));
        let doc = ReportDocument::build(&aggregation, &snapshot, &ReportOptions::default(), now());

        let sales = doc.table("Transactions").unwrap();
        assert!(sales.is_empty());
        assert_eq!(sales.empty_message, NO_DATA_FOR_PERIOD);
        assert!(doc.table("Sales by Channel").unwrap().is_empty());
        assert_eq!(doc.summary[0].value, "0 transactions");
        assert_eq!(doc.summary[3].value, "-");
    }

    #[test]
    fn test_search_is_shown_in_period() {
        let snapshot = march_snapshot();
        let query = SalesQuery::new(rekap_core::DateWindow::unbounded()).with_search("  Budi ");
        let aggregation = filter_and_aggregate(&snapshot.sales, &query);
        let doc = ReportDocument::build(&aggregation, &snapshot, &ReportOptions::default(), now());
        assert_eq!(doc.period, "All time (search: \"Budi\")");
    }

    #[test]
    fn test_custom_currency() {
        let options = ReportOptions::default().with_currency(CurrencyFormat::new("IDR", ',', true));
        let doc = build(Preset::Monthly, &options);
        assert_eq!(doc.summary[1].value, "IDR 150,000");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("Shopee", 10), "Shopee");
        assert_eq!(fit("Netflix Premium 1 Bulan", 10), "Netflix...");
        assert_eq!(fit("abcdef", 2), "ab");
    }
}
