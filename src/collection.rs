//! Collection data model: card records and their price state

use crate::money::Money;

/// Token written for records whose price could not be determined
pub const SENTINEL: &str = "N/A";

/// Price state of a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Price {
    /// A real market price per copy (may be zero)
    Priced(Money),
    /// No numeric price available.
    ///
    /// `passthrough` keeps the raw token read from a previously priced file so
    /// it is written back unchanged.
    Unpriced { passthrough: Option<String> },
}

impl Price {
    /// Unpriced with no carried token
    pub fn unpriced() -> Self {
        Price::Unpriced { passthrough: None }
    }

    /// Interprets the price column of a priced collection file
    pub fn from_field(field: &str) -> Self {
        match Money::parse_decimal(field) {
            Some(amount) => Price::Priced(amount),
            None => Price::Unpriced {
                passthrough: Some(field.to_string()),
            },
        }
    }

    pub fn amount(&self) -> Option<Money> {
        match self {
            Price::Priced(amount) => Some(*amount),
            Price::Unpriced { .. } => None,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, Price::Priced(_))
    }

    /// Text shown in place of a number for unpriced records
    pub fn sentinel(&self) -> Option<&str> {
        match self {
            Price::Priced(_) => None,
            Price::Unpriced { passthrough } => Some(passthrough.as_deref().unwrap_or(SENTINEL)),
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::unpriced()
    }
}

/// One entry in a collection file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Exact card name, used verbatim for the Scryfall lookup
    pub name: String,
    pub quantity: u64,
    pub price: Price,
}

impl CardRecord {
    pub fn new(name: impl Into<String>, quantity: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price: Price::unpriced(),
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }
}

/// Records parsed from one input file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    records: Vec<CardRecord>,
}

impl Collection {
    pub fn new(records: Vec<CardRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardRecord> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<CardRecord>> for Collection {
    fn from(records: Vec<CardRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a CardRecord;
    type IntoIter = std::slice::Iter<'a, CardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
