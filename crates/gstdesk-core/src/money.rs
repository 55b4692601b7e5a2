//! # Money Module
//!
//! Provides the `Money` type for rupee amounts on GST documents.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    3 × 99.99 + 50 = 349.96999999999997  ❌ round-off shows 0.03000…03   │
//! │                                                                         │
//! │  GST documents need:                                                    │
//! │    • per-row values kept at FULL precision until the grand total       │
//! │    • CGST and SGST exactly equal                                        │
//! │    • only the grand total rounded to a whole rupee                     │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    3 × 99.99 + 50 = 349.97 exactly, round-off = 0.03 exactly           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gstdesk_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_decimal(Decimal::new(9999, 2)); // ₹99.99
//! let line = price.multiply_quantity(Decimal::from(3)).unwrap();
//! assert_eq!(line.to_string(), "299.97");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in rupees, held at full decimal precision.
///
/// ## Design Decisions
/// - **Signed**: negative inputs are passed through, never clamped
/// - **Never rounded implicitly**: only [`Money::round_to_unit`] and
///   [`fmt::Display`] round, and Display never feeds back into arithmetic
/// - **Checked in the engine**: the operators panic on overflow like
///   `Decimal`'s; document math uses the `checked_*` forms, which return
///   `None` past ±7.9 × 10²⁸
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.unit_price ──► RowResult.taxable_value ──► cgst / sgst        │
/// │                                     │                                   │
/// │                                     ▼                                   │
/// │                    DocumentTotals.raw_grand_total ──► round_off         │
/// │                                     │                                   │
/// │                                     ▼                                   │
/// │                           DocumentTotals.final_total                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Creates a Money value from a decimal rupee amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use gstdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(236).to_string(), "236.00");
    /// ```
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a (possibly fractional) quantity.
    ///
    /// ## Example
    /// ```rust
    /// use gstdesk_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let unit_price = Money::from_rupees(100);
    /// assert_eq!(unit_price.multiply_quantity(Decimal::from(2)), Some(Money::from_rupees(200)));
    /// assert_eq!(Money::from_decimal(Decimal::MAX).multiply_quantity(Decimal::TWO), None);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Returns `rate` percent of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use gstdesk_core::money::Money;
    /// use gstdesk_core::types::TaxRate;
    ///
    /// let taxable = Money::from_rupees(200);
    /// let cgst = taxable.percent_of(TaxRate::from_percent(18).half());
    /// assert_eq!(cgst, Some(Money::from_rupees(18)));
    /// ```
    #[inline]
    pub fn percent_of(&self, rate: TaxRate) -> Option<Money> {
        rate.percent()
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|fraction| self.0.checked_mul(fraction))
            .map(Money)
    }

    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Left-to-right sum, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use gstdesk_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let rows = [Money::from_rupees(200), Money::from_rupees(36)];
    /// assert_eq!(Money::checked_sum(rows), Some(Money::from_rupees(236)));
    ///
    /// let huge = Money::from_decimal(Decimal::MAX);
    /// assert_eq!(Money::checked_sum([huge, huge]), None);
    /// ```
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Rounds to the nearest whole rupee, halves away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use gstdesk_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let raw = Money::from_decimal(Decimal::new(34997, 2)); // 349.97
    /// assert_eq!(raw.round_to_unit(), Money::from_rupees(350));
    /// ```
    pub fn round_to_unit(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with two decimals, the way every document
/// column prints it. Presentation only: the stored value keeps full precision.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.2}", shown)
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
