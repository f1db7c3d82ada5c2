//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing thousands of sale prices as f64:                               │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Rollup revenue must equal KPI revenue EXACTLY, otherwise the           │
//! │  per-channel table and the summary block disagree on the same report.   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (1/100 of the currency unit)         │
//! │    Sums are exact, the only rounding happens in:                        │
//! │    • ingestion (float price → minor units)                              │
//! │    • average order value                                                │
//! │    • display (integer-rounded currency)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rekap_core::money::Money;
//!
//! let price = Money::from_major(100_000); // Rp 100.000
//! let total = price + Money::from_major(50_000);
//! assert_eq!(total.round_to_major(), 150_000);
//!
//! // Malformed prices coming from the data layer never panic
//! assert_eq!(Money::from_f64_lenient(f64::NAN), Money::zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::format::CurrencyFormat;

/// Minor units per major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (1/100 of the currency unit).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  SaleRecord.price ──┬──► ReportKpis.total_revenue ──► average_order    │
/// │                     │                                                   │
/// │                     └──► AggregationRow.revenue (per channel/product)   │
/// │                                                                         │
/// │  Every figure printed on the report flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use rekap_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(75_000).minor(), 7_500_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Converts a floating point price into Money.
    ///
    /// ## Lenient by Design of the Data Layer
    /// The remote API sends prices as JSON numbers. Anything that is not a
    /// finite number becomes zero, the same as a missing price.
    pub fn from_f64_lenient(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }

        let minor = (value * MINOR_PER_MAJOR as f64).round();
        if minor >= i64::MAX as f64 {
            Money(i64::MAX)
        } else if minor <= i64::MIN as f64 {
            Money(i64::MIN)
        } else {
            Money(minor as i64)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the value rounded to whole currency units (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use rekap_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(12_350).round_to_major(), 124);
    /// assert_eq!(Money::from_minor(12_349).round_to_major(), 123);
    /// assert_eq!(Money::from_minor(-150).round_to_major(), -2);
    /// ```
    pub const fn round_to_major(&self) -> i64 {
        round_div(self.0, MINOR_PER_MAJOR)
    }

    /// Returns the value as a float (for JSON consumers and charts only).
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two values, clamping at the i64 range instead of overflowing.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Divides a total evenly across `count` items.
    ///
    /// ## Rules
    /// - `count == 0` returns zero (never divides by zero)
    /// - Rounds half away from zero to the minor unit
    ///
    /// ## Example
    /// ```rust
    /// use rekap_core::money::Money;
    ///
    /// let total = Money::from_major(150_000);
    /// assert_eq!(total.average_over(2), Money::from_major(75_000));
    /// assert_eq!(total.average_over(0), Money::zero());
    /// assert_eq!(Money::from_minor(1000).average_over(3).minor(), 333);
    /// ```
    pub const fn average_over(&self, count: u64) -> Money {
        if count == 0 {
            return Money::zero();
        }
        if count > i64::MAX as u64 {
            return Money::zero();
        }
        Money(round_div(self.0, count as i64))
    }

    /// Formats using the given currency settings.
    pub fn display_with(&self, currency: &CurrencyFormat) -> String {
        currency.format(*self)
    }
}

/// Integer division rounding half away from zero. `divisor` must be positive.
const fn round_div(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    let remainder = (value % divisor).abs();
    if remainder >= divisor - remainder {
        if value < 0 {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default currency settings (Rupiah, no fractional part).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format(*self))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition saturates, report totals never wrap around.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_and_minor() {
        let money = Money::from_major(100_000);
        assert_eq!(money.minor(), 10_000_000);
        assert_eq!(money.round_to_major(), 100_000);
        assert_eq!(Money::from_minor(1099).minor(), 1099);
    }

    #[test]
    fn test_from_f64_lenient() {
        assert_eq!(Money::from_f64_lenient(100_000.0), Money::from_major(100_000));
        assert_eq!(Money::from_f64_lenient(10.996).minor(), 1100);
        assert_eq!(Money::from_f64_lenient(f64::NAN), Money::zero());
        assert_eq!(Money::from_f64_lenient(f64::INFINITY), Money::zero());
        assert_eq!(Money::from_f64_lenient(1e300).minor(), i64::MAX);
    }

    #[test]
    fn test_addition_saturates() {
        let big = Money::from_minor(i64::MAX - 1);
        assert_eq!((big + Money::from_minor(10)).minor(), i64::MAX);

        let mut acc = Money::zero();
        acc += Money::from_major(5);
        acc += Money::from_major(7);
        assert_eq!(acc, Money::from_major(12));
    }

    #[test]
    fn test_sum() {
        let prices = vec![
            Money::from_major(100_000),
            Money::from_major(50_000),
            Money::from_major(75_000),
        ];
        let total: Money = prices.iter().sum();
        assert_eq!(total, Money::from_major(225_000));

        let empty: Vec<Money> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_average_over() {
        assert_eq!(Money::from_major(150_000).average_over(2), Money::from_major(75_000));
        assert_eq!(Money::from_major(150_000).average_over(0), Money::zero());
        // 1000 / 3 = 333.33 -> 333
        assert_eq!(Money::from_minor(1000).average_over(3).minor(), 333);
        // 1000 / 6 = 166.67 -> 167
        assert_eq!(Money::from_minor(1000).average_over(6).minor(), 167);
    }

    #[test]
    fn test_round_to_major_half_away_from_zero() {
        assert_eq!(Money::from_minor(50).round_to_major(), 1);
        assert_eq!(Money::from_minor(49).round_to_major(), 0);
        assert_eq!(Money::from_minor(-50).round_to_major(), -1);
        assert_eq!(Money::from_minor(-49).round_to_major(), 0);
    }

    #[test]
    fn test_display_uses_default_currency() {
        assert_eq!(Money::from_major(150_000).to_string(), "Rp 150.000");
        assert_eq!(Money::zero().to_string(), "Rp 0");
    }

    #[test]
    fn test_serde_is_transparent_minor_units() {
        let json = serde_json::to_string(&Money::from_minor(1234)).unwrap();
        assert_eq!(json, "1234");
        let back: Money = serde_json::from_str("1234").unwrap();
        assert_eq!(back.minor(), 1234);
    }
}
