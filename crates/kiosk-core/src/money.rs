//! # Money Module
//!
//! Provides the `Money` type and the kiosk's currency display format.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rupiah has no minor unit in practice, so every price is a whole       │
//! │  number of the smallest unit:                                          │
//! │                                                                         │
//! │    Paket Rendang      35000      → "Rp 35.000"                         │
//! │    Es Teh Manis        5000      → "Rp 5.000"                          │
//! │                                                                         │
//! │  Totals are sums of integer products. No floats anywhere.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::{CurrencyFormat, Money};
//!
//! let price = Money::from_minor(35_000);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.minor(), 70_000);
//!
//! let fmt = CurrencyFormat::default();
//! assert_eq!(fmt.format(line_total), "Rp 70.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: leaves room for refunds and discounts even though the
///   kiosk only ever adds
/// - **Single field tuple struct**: serializes as a bare integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity, saturating at the `i64`
    /// bounds.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let es_jeruk = Money::from_minor(8_000);
    /// assert_eq!(es_jeruk.multiply_quantity(3).minor(), 24_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

/// Display uses the default kiosk format (`Rp 35.000`).
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

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// How amounts are rendered for the customer.
///
/// ## Format
/// ```text
/// prefix + digits grouped by three with `thousands_separator`
///
///        0  →  "Rp 0"
///      500  →  "Rp 500"
///    35000  →  "Rp 35.000"
///  1234567  →  "Rp 1.234.567"
///   -15000  →  "-Rp 15.000"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Text placed before the digits, including any trailing space.
    pub prefix: String,

    /// Separator between groups of three digits.
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    /// Indonesian Rupiah: `Rp ` prefix, `.` separator.
    fn default() -> Self {
        CurrencyFormat {
            prefix: "Rp ".to_string(),
            thousands_separator: '.',
        }
    }
}

impl CurrencyFormat {
    pub fn new(prefix: impl Into<String>, thousands_separator: char) -> Self {
        CurrencyFormat {
            prefix: prefix.into(),
            thousands_separator,
        }
    }

    /// Formats an amount for display.
    pub fn format(&self, amount: Money) -> String {
        let digits = amount.minor().unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.prefix, grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(35_000);
        assert_eq!(money.minor(), 35_000);
        assert!(money.is_positive());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(35_000);
        let b = Money::from_minor(5_000);

        assert_eq!((a + b).minor(), 40_000);
        assert_eq!((a * 2).minor(), 70_000);

        let mut total = Money::zero();
        total += a;
        total += b;
        assert_eq!(total.minor(), 40_000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_minor(10_000_000_000);
        assert_eq!(huge.multiply_quantity(u32::MAX).minor(), i64::MAX);

        let mut total = Money::from_minor(i64::MAX);
        total += Money::from_minor(1);
        assert_eq!(total.minor(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [3_000, 5_000, 12_000]
            .into_iter()
            .map(Money::from_minor)
            .sum();
        assert_eq!(total.minor(), 20_000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_format_rupiah() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Money::from_minor(35_000)), "Rp 35.000");
        assert_eq!(fmt.format(Money::from_minor(0)), "Rp 0");
        assert_eq!(fmt.format(Money::from_minor(500)), "Rp 500");
        assert_eq!(fmt.format(Money::from_minor(100_000)), "Rp 100.000");
        assert_eq!(fmt.format(Money::from_minor(1_234_567)), "Rp 1.234.567");
    }

    #[test]
    fn test_format_negative() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Money::from_minor(-15_000)), "-Rp 15.000");
    }

    #[test]
    fn test_format_custom_separator() {
        let fmt = CurrencyFormat::new("IDR ", ',');
        assert_eq!(fmt.format(Money::from_minor(70_000)), "IDR 70,000");
    }

    #[test]
    fn test_display_uses_default_format() {
        assert_eq!(Money::from_minor(5_000).to_string(), "Rp 5.000");
    }
}
