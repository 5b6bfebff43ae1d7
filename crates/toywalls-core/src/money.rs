//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The hosted backend stores unit prices as floats, and a naive port     │
//! │  would sum them as floats too:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the boundary, then integer cents.       │
//! │    99.5 → 9950 cents; all accumulation is exact i64 arithmetic.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Localization
//! Toys Walls operates in Colombia. Display formatting follows es-CO
//! conventions: `.` groups thousands, `,` is the decimal point, `$` prefix.
//! `$1.234.567,89` is one million two hundred thirty-four thousand...

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Boundary conversion**: Backend floats enter through
///   [`Money::from_backend_amount`] exactly once; everything after is integral
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a backend float amount (major units) into Money.
    ///
    /// The backend stores `unit_price` as a nullable REAL. Non-finite values
    /// (the Rust-side face of "non-numeric") coerce to zero, matching the
    /// best-effort policy of the reporting pipeline.
    ///
    /// ## Example
    /// ```rust
    /// use toywalls_core::Money;
    ///
    /// assert_eq!(Money::from_backend_amount(99.5).cents(), 9950);
    /// assert_eq!(Money::from_backend_amount(f64::NAN).cents(), 0);
    /// ```
    pub fn from_backend_amount(amount: f64) -> Self {
        if amount.is_finite() {
            Money((amount * 100.0).round() as i64)
        } else {
            Money(0)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units as a float, for chart values.
    ///
    /// This is the ONLY place Money turns back into a float, and it is
    /// display-bound: chart libraries want plain numbers on the value axis.
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats the value per Colombian-Spanish conventions.
    ///
    /// Thousands grouped with `.`, decimals after `,`, always two decimal
    /// places, `$` prefix, leading `-` for negatives.
    ///
    /// ## Example
    /// ```rust
    /// use toywalls_core::Money;
    ///
    /// assert_eq!(Money::from_cents(123456789).format_es_co(), "$1.234.567,89");
    /// assert_eq!(Money::from_cents(2500).format_es_co(), "$25,00");
    /// ```
    pub fn format_es_co(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = (self.0 / 100).abs();
        let minor = (self.0 % 100).abs();

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("{sign}${grouped},{minor:02}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display delegates to the es-CO format; that is the one the product shows.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_es_co())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
    }

    #[test]
    fn test_from_backend_amount() {
        assert_eq!(Money::from_backend_amount(99.5).cents(), 9950);
        assert_eq!(Money::from_backend_amount(10.0).cents(), 1000);
        assert_eq!(Money::from_backend_amount(0.0).cents(), 0);
        // Coercion policy: non-finite prices count as zero, never an error
        assert_eq!(Money::from_backend_amount(f64::NAN).cents(), 0);
        assert_eq!(Money::from_backend_amount(f64::INFINITY).cents(), 0);
    }

    #[test]
    fn test_es_co_formatting() {
        assert_eq!(Money::from_cents(0).format_es_co(), "$0,00");
        assert_eq!(Money::from_cents(2500).format_es_co(), "$25,00");
        assert_eq!(Money::from_cents(9950).format_es_co(), "$99,50");
        assert_eq!(Money::from_cents(123456).format_es_co(), "$1.234,56");
        assert_eq!(Money::from_cents(123456789).format_es_co(), "$1.234.567,89");
        assert_eq!(Money::from_cents(-550).format_es_co(), "-$5,50");
        // Exact group boundaries
        assert_eq!(Money::from_cents(100000).format_es_co(), "$1.000,00");
        assert_eq!(Money::from_cents(100000000).format_es_co(), "$1.000.000,00");
    }

    #[test]
    fn test_display_matches_locale() {
        assert_eq!(format!("{}", Money::from_cents(123456)), "$1.234,56");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1000, 250, 5]
            .iter()
            .map(|c| Money::from_cents(*c))
            .sum();
        assert_eq!(total.cents(), 1255);
    }
}
