//! # Report Windows
//!
//! Turns a named preset and the current instant into an inclusive
//! `[from, to]` window over purchase dates.
//!
//! ## Presets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  now = Friday 2024-03-15 10:20                                          │
//! │                                                                         │
//! │  Preset     from                     to                                 │
//! │  ────────   ──────────────────────   ──────────────────────────         │
//! │  Daily      2024-03-15 00:00:00      2024-03-15 23:59:59.999            │
//! │  Weekly     2024-03-11 00:00:00 Mon  2024-03-17 23:59:59.999 Sun        │
//! │  Monthly    2024-03-01 00:00:00      2024-03-31 23:59:59.999            │
//! │  Yearly     2024-01-01 00:00:00      2024-12-31 23:59:59.999            │
//! │  AllTime    (unbounded)              (unbounded)                        │
//! │  Custom     parsed "from" or none    parsed "to" at 23:59:59.999 or none│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Permissive Custom Dates
//! A custom bound that is empty or cannot be parsed as `YYYY-MM-DD` opens the
//! window on that side instead of failing. Resolution never errors; only
//! parsing a preset *name* can.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use rekap_core::window::{resolve_window, Preset};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(10, 20, 0).unwrap();
//! let window = resolve_window(Preset::Monthly, now, None, None);
//!
//! assert!(window.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
//! assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::format::ISO_DATE_FORMAT;

// =============================================================================
// Preset
// =============================================================================

/// A named shorthand for a report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// The calendar day containing "now".
    Daily,
    /// Monday through Sunday of the week containing "now".
    Weekly,
    /// The calendar month containing "now".
    #[default]
    Monthly,
    /// The calendar year containing "now".
    Yearly,
    /// No bounds at all.
    AllTime,
    /// User-supplied dates.
    Custom,
}

impl Preset {
    /// All presets, in menu order.
    pub const ALL: [Preset; 6] = [
        Preset::Daily,
        Preset::Weekly,
        Preset::Monthly,
        Preset::Yearly,
        Preset::AllTime,
        Preset::Custom,
    ];

    /// Canonical identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Preset::Daily => "daily",
            Preset::Weekly => "weekly",
            Preset::Monthly => "monthly",
            Preset::Yearly => "yearly",
            Preset::AllTime => "all-time",
            Preset::Custom => "custom",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the English names and the Indonesian labels of the back office
/// (`harian`, `mingguan`, `bulanan`, `tahunan`).
impl FromStr for Preset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "harian" => Ok(Preset::Daily),
            "weekly" | "mingguan" => Ok(Preset::Weekly),
            "monthly" | "bulanan" => Ok(Preset::Monthly),
            "yearly" | "tahunan" => Ok(Preset::Yearly),
            "all-time" | "alltime" | "all" => Ok(Preset::AllTime),
            "custom" => Ok(Preset::Custom),
            _ => Err(ValidationError::not_allowed(
                "preset",
                &["daily", "weekly", "monthly", "yearly", "all-time", "custom"],
            )),
        }
    }
}

// =============================================================================
// Date Window
// =============================================================================

/// An inclusive range of instants. `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateWindow {
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDateTime>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDateTime>,
}

impl DateWindow {
    /// A window with no bounds.
    pub const fn unbounded() -> Self {
        DateWindow { from: None, to: None }
    }

    /// A window covering whole days `first..=last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        DateWindow {
            from: Some(start_of_day(first)),
            to: Some(end_of_day(last)),
        }
    }

    /// Whether neither side is bounded.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether a calendar date falls inside the window.
    ///
    /// The date is taken at its start of day and compared inclusively on both
    /// bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let at = start_of_day(date);
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at <= to)
    }

    /// Checks that `from <= to` when both are present.
    ///
    /// Resolution accepts an inverted custom range (it just matches nothing);
    /// callers that want to warn the user call this.
    pub fn validate(&self) -> CoreResult<()> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(CoreError::InvertedWindow {
                from: from.date().format(ISO_DATE_FORMAT).to_string(),
                to: to.date().format(ISO_DATE_FORMAT).to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Human-readable period, e.g. `2024-03-01 to 2024-03-31`.
    ///
    /// ## Example
    /// ```rust
    /// use rekap_core::window::DateWindow;
    ///
    /// assert_eq!(DateWindow::unbounded().period_label(), "All time");
    /// ```
    pub fn period_label(&self) -> String {
        if self.is_unbounded() {
            return "All time".to_string();
        }

        let from = self
            .from
            .map(|f| f.date().format(ISO_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "start".to_string());
        let to = self
            .to
            .map(|t| t.date().format(ISO_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "end".to_string());

        format!("{} to {}", from, to)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves a preset against "now".
///
/// `custom_from` and `custom_to` are only read for [`Preset::Custom`].
pub fn resolve_window(
    preset: Preset,
    now: NaiveDateTime,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
) -> DateWindow {
    let today = now.date();

    match preset {
        Preset::Daily => DateWindow::days(today, today),
        Preset::Weekly => {
            let back = u64::from(today.weekday().num_days_from_monday());
            let monday = today.checked_sub_days(Days::new(back)).unwrap_or(today);
            let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
            DateWindow::days(monday, sunday)
        }
        Preset::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(today);
            DateWindow::days(first, last)
        }
        Preset::Yearly => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
            DateWindow::days(first, last)
        }
        Preset::AllTime => DateWindow::unbounded(),
        Preset::Custom => DateWindow {
            from: custom_from.and_then(parse_calendar_date).map(start_of_day),
            to: custom_to.and_then(parse_calendar_date).map(end_of_day),
        },
    }
}

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// Returns `None` for empty or malformed input.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).ok()
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 on `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn eod(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_milli_opt(23, 59, 59, 999).unwrap()
    }

    #[test]
    fn test_daily() {
        let w = resolve_window(Preset::Daily, at(2024, 3, 15, 10, 20), None, None);
        assert_eq!(w.from, Some(at(2024, 3, 15, 0, 0)));
        assert_eq!(w.to, Some(eod(2024, 3, 15)));
    }

    #[test]
    fn test_weekly_starts_monday() {
        // 2024-03-15 is a Friday
        let w = resolve_window(Preset::Weekly, at(2024, 3, 15, 10, 20), None, None);
        assert_eq!(w.from, Some(at(2024, 3, 11, 0, 0)));
        assert_eq!(w.to, Some(eod(2024, 3, 17)));

        // On a Monday the week starts today
        let w = resolve_window(Preset::Weekly, at(2024, 3, 11, 8, 0), None, None);
        assert_eq!(w.from, Some(at(2024, 3, 11, 0, 0)));

        // On a Sunday the week started six days ago
        let w = resolve_window(Preset::Weekly, at(2024, 3, 17, 23, 0), None, None);
        assert_eq!(w.from, Some(at(2024, 3, 11, 0, 0)));
        assert_eq!(w.to, Some(eod(2024, 3, 17)));
    }

    #[test]
    fn test_weekly_across_month_boundary() {
        // 2024-03-01 is a Friday, its Monday is in February
        let w = resolve_window(Preset::Weekly, at(2024, 3, 1, 12, 0), None, None);
        assert_eq!(w.from, Some(at(2024, 2, 26, 0, 0)));
        assert_eq!(w.to, Some(eod(2024, 3, 3)));
    }

    #[test]
    fn test_monthly() {
        let w = resolve_window(Preset::Monthly, at(2024, 3, 15, 10, 20), None, None);
        assert_eq!(w.from, Some(at(2024, 3, 1, 0, 0)));
        assert_eq!(w.to, Some(eod(2024, 3, 31)));

        // Leap year February
        let w = resolve_window(Preset::Monthly, at(2024, 2, 10, 0, 0), None, None);
        assert_eq!(w.to, Some(eod(2024, 2, 29)));

        // December rolls into the next year
        let w = resolve_window(Preset::Monthly, at(2023, 12, 5, 0, 0), None, None);
        assert_eq!(w.to, Some(eod(2023, 12, 31)));
    }

    #[test]
    fn test_yearly() {
        let w = resolve_window(Preset::Yearly, at(2024, 3, 15, 10, 20), None, None);
        assert_eq!(w.from, Some(at(2024, 1, 1, 0, 0)));
        assert_eq!(w.to, Some(eod(2024, 12, 31)));
    }

    #[test]
    fn test_all_time_is_unbounded() {
        let w = resolve_window(Preset::AllTime, at(2024, 3, 15, 10, 20), None, None);
        assert!(w.is_unbounded());
        assert!(w.contains(date(1970, 1, 1)));
        assert!(w.contains(date(2999, 12, 31)));
    }

    #[test]
    fn test_bounded_presets_are_ordered() {
        let now = at(2024, 3, 15, 10, 20);
        for preset in [Preset::Daily, Preset::Weekly, Preset::Monthly, Preset::Yearly] {
            let w = resolve_window(preset, now, None, None);
            let (from, to) = (w.from.unwrap(), w.to.unwrap());
            assert!(from <= to, "{preset} produced an inverted window");
            assert!(from <= now && now <= to, "{preset} does not contain now");
        }
    }

    #[test]
    fn test_custom_with_empty_from() {
        let w = resolve_window(Preset::Custom, at(2024, 3, 15, 0, 0), Some(""), Some("2024-03-10"));
        assert_eq!(w.from, None);
        assert_eq!(w.to, Some(eod(2024, 3, 10)));
        assert!(w.contains(date(2024, 3, 10)));
        assert!(w.contains(date(2020, 1, 1)));
        assert!(!w.contains(date(2024, 3, 11)));
    }

    #[test]
    fn test_custom_unparseable_bounds_open_the_window() {
        let w = resolve_window(Preset::Custom, at(2024, 3, 15, 0, 0), Some("yesterday"), Some("2024-13-40"));
        assert!(w.is_unbounded());

        let w = resolve_window(Preset::Custom, at(2024, 3, 15, 0, 0), Some(" 2024-03-01 "), None);
        assert_eq!(w.from, Some(at(2024, 3, 1, 0, 0)));
        assert_eq!(w.to, None);
    }

    #[test]
    fn test_custom_strings_ignored_for_other_presets() {
        let w = resolve_window(Preset::Daily, at(2024, 3, 15, 0, 0), Some("2020-01-01"), Some("2020-01-02"));
        assert_eq!(w.from, Some(at(2024, 3, 15, 0, 0)));
    }

    #[test]
    fn test_inverted_custom_matches_nothing() {
        let w = resolve_window(Preset::Custom, at(2024, 3, 15, 0, 0), Some("2024-03-10"), Some("2024-03-01"));
        assert!(w.validate().is_err());
        for day in 1..=31 {
            assert!(!w.contains(date(2024, 3, day)));
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let w = DateWindow::days(date(2024, 3, 1), date(2024, 3, 31));
        assert!(w.contains(date(2024, 3, 1)));
        assert!(w.contains(date(2024, 3, 31)));
        assert!(!w.contains(date(2024, 2, 29)));
        assert!(!w.contains(date(2024, 4, 1)));
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_period_label() {
        assert_eq!(DateWindow::unbounded().period_label(), "All time");
        assert_eq!(
            DateWindow::days(date(2024, 3, 1), date(2024, 3, 31)).period_label(),
            "2024-03-01 to 2024-03-31"
        );
        let open_start = DateWindow { from: None, to: Some(eod(2024, 3, 10)) };
        assert_eq!(open_start.period_label(), "start to 2024-03-10");
        let open_end = DateWindow { from: Some(at(2024, 3, 1, 0, 0)), to: None };
        assert_eq!(open_end.period_label(), "2024-03-01 to end");
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("daily".parse::<Preset>().unwrap(), Preset::Daily);
        assert_eq!("Mingguan".parse::<Preset>().unwrap(), Preset::Weekly);
        assert_eq!("bulanan".parse::<Preset>().unwrap(), Preset::Monthly);
        assert_eq!("tahunan".parse::<Preset>().unwrap(), Preset::Yearly);
        assert_eq!("alltime".parse::<Preset>().unwrap(), Preset::AllTime);
        assert_eq!("all-time".parse::<Preset>().unwrap(), Preset::AllTime);
        assert_eq!("custom".parse::<Preset>().unwrap(), Preset::Custom);
        assert!("fortnightly".parse::<Preset>().is_err());

        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_preset_serde_names() {
        assert_eq!(serde_json::to_string(&Preset::AllTime).unwrap(), "\"all-time\"");
        let p: Preset = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(p, Preset::Weekly);
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(parse_calendar_date("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(parse_calendar_date("  2024-03-05\n"), Some(date(2024, 3, 5)));
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("05/03/2024"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
    }
}
