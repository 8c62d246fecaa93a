//! Exact money type stored as an integer count of cents.
//!
//! Uses `rust_decimal` to parse the `D.CC` text format so no floating-point
//! value ever enters the pipeline.

use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// Cents in one dollar.
pub const CENTS_PER_DOLLAR: u32 = 100;

/// Value of the smallest denomination, in cents. Every price and every
/// amount of change is a multiple of this.
pub const SMALLEST_UNIT: u32 = 5;

/// Ways a money or price string can be rejected.
///
/// The messages are user-facing: they appear verbatim in prompt re-asks and
/// in per-record load errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Not a non-negative number with exactly two decimal places
    #[error("Price needs to be in format #.00 (# is a positive integer)")]
    Format,

    /// A cents part of 100 or more
    #[error("Cents part must be below 100")]
    CentsRange,

    /// Prices must charge something
    #[error("Price cannot be free")]
    Free,

    /// Prices must be payable in coins
    #[error("Price cents must be divisible by 5")]
    NotDenominationMultiple,
}

/// A non-negative amount of money, exact to the cent.
///
/// # Examples
///
/// ```
/// use vending_engine::Money;
///
/// let price: Money = "2.50".parse().unwrap();
/// assert_eq!(price.cents(), 250);
/// assert_eq!(price.to_string(), "$2.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(u32);

impl Money {
    /// Zero value.
    pub const ZERO: Self = Money(0);

    /// Creates a `Money` from a raw cent count.
    pub fn from_cents(cents: u32) -> Self {
        Money(cents)
    }

    /// Creates a `Money` from a dollars/cents split.
    ///
    /// Fails when `cents` is not a valid cents part (`>= 100`).
    pub fn from_parts(dollars: u32, cents: u32) -> Result<Self, MoneyError> {
        if cents >= CENTS_PER_DOLLAR {
            return Err(MoneyError::CentsRange);
        }
        Ok(Money(dollars * CENTS_PER_DOLLAR + cents))
    }

    /// Total value in cents.
    pub fn cents(&self) -> u32 {
        self.0
    }

    /// The whole-dollar part.
    pub fn dollars(&self) -> u32 {
        self.0 / CENTS_PER_DOLLAR
    }

    /// The cents part, always below 100.
    pub fn cents_part(&self) -> u32 {
        self.0 % CENTS_PER_DOLLAR
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtraction that fails instead of wrapping below zero.
    pub fn checked_sub(&self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Parses a catalog price: a valid `D.CC` amount that is strictly
    /// positive and a multiple of the smallest denomination.
    pub fn parse_price(s: &str) -> Result<Self, MoneyError> {
        let money: Money = s.parse()?;
        if money.is_zero() {
            return Err(MoneyError::Free);
        }
        if money.cents() % SMALLEST_UNIT != 0 {
            return Err(MoneyError::NotDenominationMultiple);
        }
        Ok(money)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Accepts exactly the persisted format: a non-negative number with two
    /// decimal places, e.g. `3.50`. `3.5`, `3`, `-1.00`, and `3.505` are all
    /// rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| MoneyError::Format)?;
        if decimal.is_sign_negative() || decimal.scale() != 2 {
            return Err(MoneyError::Format);
        }
        // Scale is exactly 2, so the mantissa is the value in cents.
        let cents = u32::try_from(decimal.mantissa()).map_err(|_| MoneyError::Format)?;
        Ok(Money(cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.dollars(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
