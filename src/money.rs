//! Euro amounts held as integer cents.
//!
//! Prices arrive as decimal text (from collection files or from Scryfall) and are
//! converted to cents exactly once. Every line total and collection total after
//! that is integer arithmetic, so repeated write/read cycles of a collection file
//! always reproduce the same figures.

use std::fmt;

/// Largest unit price accepted from text, in cents
const MAX_UNIT_CENTS: f64 = u64::MAX as f64;

/// A non-negative amount of money in cents.
///
/// Unit prices never exceed `u64::MAX` cents, so a unit price times any `u64`
/// quantity is exact in the `u128` representation. Sums are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u128);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: u64) -> Self {
        Money(cents as u128)
    }

    #[inline]
    pub const fn cents(&self) -> u128 {
        self.0
    }

    /// Parses decimal text such as `"19.99"`, `"5"` or `"0.5"` into cents.
    ///
    /// The value is scaled by 100 and rounded to the nearest cent. Returns `None`
    /// for anything that is not a finite, non-negative number, or that does not
    /// fit a `u64` count of cents.
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let value: f64 = text.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents >= MAX_UNIT_CENTS {
            return None;
        }
        Some(Money::from_cents(cents as u64))
    }

    /// Price of `quantity` copies at this unit price, `None` on overflow
    pub fn checked_times(self, quantity: u64) -> Option<Self> {
        self.0.checked_mul(u128::from(quantity)).map(Money)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    /// Always exactly two decimals, e.g. `59.97`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{}.{:02}", self.0 / 100, self.0 % 100);
        f.pad(&text)
    }
}
