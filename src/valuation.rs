//! Per-record and collection value arithmetic
//!
//! Unpriced records never contribute to a total. A card whose lookup failed is
//! excluded from the sum rather than counted as 0.00.

use crate::collection::{CardRecord, Collection};
use crate::error::{CheckerError, Result};
use crate::money::Money;

/// Value of all copies of a record, or `None` when the record has no price
pub fn line_total(record: &CardRecord) -> Result<Option<Money>> {
    match record.price.amount() {
        None => Ok(None),
        Some(amount) => amount
            .checked_times(record.quantity)
            .map(Some)
            .ok_or_else(|| CheckerError::AmountOverflow(record.name.clone())),
    }
}

/// Sum of line totals over priced records only
pub fn collection_total(collection: &Collection) -> Result<Money> {
    Ok(Valuation::of(collection)?.total)
}

/// Aggregate figures for one collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Valuation {
    pub total: Money,
    pub priced: usize,
    pub unpriced: usize,
    pub copies: u128,
}

impl Valuation {
    pub fn of(collection: &Collection) -> Result<Self> {
        let mut valuation = Valuation::default();
        for record in collection {
            valuation.copies += u128::from(record.quantity);
            match line_total(record)? {
                Some(value) => {
                    valuation.priced += 1;
                    valuation.total = valuation
                        .total
                        .checked_add(value)
                        .ok_or_else(|| CheckerError::AmountOverflow(record.name.clone()))?;
                }
                None => valuation.unpriced += 1,
            }
        }
        Ok(valuation)
    }

    pub fn cards(&self) -> usize {
        self.priced + self.unpriced
    }
}
