//! # Money Module
//!
//! Integer-cent money and basis-point tax rates.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A latte at $3.50 and a muffin at $3.25, summed as floats, can drift:   │
//! │    3.5 + 3.25 + 0.1 ... → 6.8500000000000005                           │
//! │                                                                         │
//! │  Held as cents they never do:                                           │
//! │    350 + 325 = 675                                                      │
//! │                                                                         │
//! │  Every price, cost, revenue and profit figure in the café model is a    │
//! │  Money value. Only the receipt and the UI turn cents into "$6.75".      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cafe_core::money::{Money, TaxRate};
//!
//! let espresso = Money::from_major_minor(3, 50);
//! let line = espresso.multiply_quantity(2);
//! assert_eq!(line.cents(), 700);
//!
//! let tax = line.calculate_tax(TaxRate::from_percentage(8.5));
//! assert_eq!(tax.cents(), 60); // 59.5 rounds half up
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed, because a sale's profit is negative whenever the recorded cost of
/// the goods exceeds what the table paid.
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
///
/// ```text
/// InventoryItem.price ──► OrderItem.price (snapshot) ──► Sale.total_revenue
/// InventoryItem.cost  ─────────────────────────────────► Sale.total_cost
///                                                        Sale.profit = rev − cost
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use cafe_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(8, 50).cents(), 850);
    /// assert_eq!(Money::from_major_minor(-11, 0).cents(), -1100);
    /// ```
    ///
    /// For negative amounts only `major` carries the sign:
    /// `from_major_minor(-2, 25)` is -$2.25.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Unit price × quantity, saturating at the `i64` bounds.
    ///
    /// Used for order line totals and for the cost side of a cleared table.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Tax owed on this amount at `rate`, rounded half up to the cent.
    ///
    /// ## Implementation
    /// `(cents × bps + 5000) / 10000` in i128 so large tabs cannot overflow.
    ///
    /// ```text
    /// Subtotal $10.00 at 8.50%  →  85.0 cents        →  $0.85
    /// Subtotal  $7.00 at 8.50%  →  59.5 cents        →  $0.60
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Formats with a caller-chosen currency symbol (`€3.50`, `-£11.00`).
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Sales tax rate in basis points (1 bps = 0.01%).
///
/// The café bills at 8.5%, i.e. `TaxRate::from_bps(850)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Converts a human percentage (`8.5`) to basis points (`850`).
    ///
    /// Negative or non-finite input collapses to zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return TaxRate(0);
        }
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a percentage, for display and for the bill contract.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
