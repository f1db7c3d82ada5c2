//! # Display Formatting
//!
//! Currency, count and date formatting shared by the screen tables and the
//! PDF export, so both renderings print identical strings.
//!
//! ## Formats
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Value                     Storage form        Display form            │
//! │  ─────────────────────     ────────────        ────────────            │
//! │  Money (minor units)       15000000            Rp 150.000              │
//! │  Order count               1234                1.234                   │
//! │  Calendar date             2024-03-05          05/03/2024              │
//! │  Missing date              (none)              -                       │
//! │  Print timestamp           NaiveDateTime       15/03/2024 10:20:00     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Currency display is integer-rounded: the report never shows sub-units.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Placeholder printed for an absent value in a table cell.
pub const EMPTY_CELL: &str = "-";

/// Storage form of calendar dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display form of calendar dates.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Display form of print timestamps.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

// =============================================================================
// Currency Format
// =============================================================================

/// Locale settings for currency display.
///
/// ## Example
/// ```rust
/// use rekap_core::format::CurrencyFormat;
/// use rekap_core::money::Money;
///
/// let idr = CurrencyFormat::default();
/// assert_eq!(idr.format(Money::from_major(1_250_000)), "Rp 1.250.000");
///
/// let usd = CurrencyFormat::new("$", ',', false);
/// assert_eq!(usd.format(Money::from_major(1_250_000)), "$1,250,000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Currency symbol placed before the amount.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Thousands separator.
    #[serde(default = "default_grouping_separator")]
    pub grouping_separator: char,

    /// Whether a space separates the symbol and the amount.
    #[serde(default = "default_symbol_spacing")]
    pub symbol_spacing: bool,
}

fn default_symbol() -> String {
    "Rp".to_string()
}

fn default_grouping_separator() -> char {
    '.'
}

fn default_symbol_spacing() -> bool {
    true
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: default_symbol(),
            grouping_separator: default_grouping_separator(),
            symbol_spacing: default_symbol_spacing(),
        }
    }
}

impl CurrencyFormat {
    /// Creates a currency format.
    pub fn new(symbol: impl Into<String>, grouping_separator: char, symbol_spacing: bool) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            grouping_separator,
            symbol_spacing,
        }
    }

    /// Formats money rounded to whole units.
    pub fn format(&self, amount: Money) -> String {
        let major = amount.round_to_major();
        let sign = if major < 0 { "-" } else { "" };
        let spacing = if self.symbol_spacing { " " } else { "" };
        format!(
            "{}{}{}{}",
            sign,
            self.symbol,
            spacing,
            group_digits(major.unsigned_abs(), self.grouping_separator)
        )
    }

    /// Formats an order count with thousands grouping.
    pub fn format_count(&self, count: u64) -> String {
        group_digits(count, self.grouping_separator)
    }
}

/// Inserts `separator` between every group of three digits.
fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Dates
// =============================================================================

/// Formats a calendar date for display (`DD/MM/YYYY`).
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Formats an optional calendar date, `-` when absent.
pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date)
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Formats a calendar date in its storage form (`YYYY-MM-DD`).
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Formats a print timestamp (`DD/MM/YYYY HH:MM:SS`).
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
