//! Monetary amount type for payment segments.
//!
//! Wraps `rust_decimal` so amounts are exact in dollars and are rounded to
//! cents once, at the moment they are encoded into a record.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A payment amount in major currency units (dollars).
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use eft_generator::Amount;
///
/// let amount = Amount::from_str("1234.565").unwrap();
/// assert_eq!(amount.to_minor_units(), Some(123_457));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Deserialize)]
#[serde(transparent)]
pub struct Amount(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Amount {
    /// Amounts must be strictly below this many dollars.
    pub const LIMIT_DOLLARS: i64 = 100_000_000;

    /// Largest value the 10-digit cents field can hold.
    pub const MAX_MINOR_UNITS: u64 = 9_999_999_999;

    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Builds an amount from a whole number of cents.
    pub fn from_minor_units(cents: i64) -> Self {
        Amount(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Converts to cents, rounding half away from zero.
    ///
    /// Returns `None` for negative amounts or values too large for `u64`.
    pub fn to_minor_units(&self) -> Option<u64> {
        (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
    }

    /// Returns `true` if the amount can be written to a detail record:
    /// below [`Amount::LIMIT_DOLLARS`], and between one cent and
    /// [`Amount::MAX_MINOR_UNITS`] once rounded to cents.
    pub fn is_in_range(&self) -> bool {
        self.is_positive()
            && self.0 < Decimal::from(Self::LIMIT_DOLLARS)
            && self
                .to_minor_units()
                .is_some_and(|cents| (1..=Self::MAX_MINOR_UNITS).contains(&cents))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
