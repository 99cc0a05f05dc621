//! # Money Module
//!
//! Provides the `Money` type for monetary values in Vietnamese đồng.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  VND has no minor unit in practice, so one `Money` unit is one đồng.    │
//! │                                                                         │
//! │  Menu price ──► CartLine.unit_price ──► line total ──► subtotal        │
//! │                                                        │                │
//! │                                   delivery fee ◄───────┤                │
//! │                                                        ▼                │
//! │                                                      total             │
//! │                                                                         │
//! │  Every step is integer arithmetic; nothing ever touches a float.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bunbo_core::money::Money;
//!
//! let price = Money::new(65_000);
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.amount(), 195_000);
//! assert_eq!(line_total.to_string(), "195.000 ₫");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (đồng).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction stays total, e.g. "amount left until free shipping"
/// - **Single field tuple struct**: serializes as a bare JSON number, which is
///   exactly what the `price` field of the cart snapshot holds
/// - **Saturating arithmetic**: sums and products clamp at the `i64` bounds
///   instead of panicking or wrapping
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from an amount in đồng.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the amount in đồng.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bunbo_core::money::Money;
    ///
    /// let unit_price = Money::new(12_000);
    /// assert_eq!(unit_price.multiply_quantity(4).amount(), 48_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with `.` thousands separators (vi-VN grouping),
    /// without a currency symbol.
    ///
    /// ```rust
    /// use bunbo_core::money::Money;
    ///
    /// assert_eq!(Money::new(1_250_000).grouped(), "1.250.000");
    /// assert_eq!(Money::new(-15_000).grouped(), "-15.000");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount the way the storefront prints prices: `65.000 ₫`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₫", self.grouped())
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
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
    fn test_new_and_amount() {
        let money = Money::new(65_000);
        assert_eq!(money.amount(), 65_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(215_000).to_string(), "215.000 ₫");
        assert_eq!(Money::new(999).to_string(), "999 ₫");
        assert_eq!(Money::new(1_000).to_string(), "1.000 ₫");
        assert_eq!(Money::new(0).to_string(), "0 ₫");
        assert_eq!(Money::new(-15_000).to_string(), "-15.000 ₫");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(200_000);
        let b = Money::new(15_000);

        assert_eq!((a + b).amount(), 215_000);
        assert_eq!((a - b).amount(), 185_000);
        assert_eq!((b * 3).amount(), 45_000);

        let mut c = a;
        c += b;
        c -= Money::new(5_000);
        assert_eq!(c.amount(), 210_000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::new(10), Money::new(20), Money::new(30)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::new(60));

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::new(i64::MAX / 2);

        assert_eq!(huge.multiply_quantity(99).amount(), i64::MAX);
        assert_eq!((huge * 3).amount(), i64::MAX);
        assert_eq!((huge + huge + huge).amount(), i64::MAX);
        assert_eq!((Money::new(i64::MIN) - Money::new(1)).amount(), i64::MIN);

        let total: Money = std::iter::repeat(huge).take(5).sum();
        assert_eq!(total.amount(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::new(1).is_positive());
        assert!(Money::new(-1).is_negative());
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::new(45_000)).unwrap();
        assert_eq!(json, "45000");

        let back: Money = serde_json::from_str("45000").unwrap();
        assert_eq!(back, Money::new(45_000));
    }
}
