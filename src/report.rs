//! Console output for priced collections

use crate::collection::{CardRecord, Collection};
use crate::error::Result;
use crate::money::Money;
use crate::valuation::{line_total, Valuation};

const CURRENCY: &str = "€";

/// Bare cell text for an amount, or the record's sentinel when it has no price
fn cell(record: &CardRecord, amount: Option<Money>) -> String {
    match amount {
        Some(amount) => amount.to_string(),
        None => record.price.sentinel().unwrap_or_default().to_string(),
    }
}

struct Row {
    name: String,
    quantity: String,
    price: String,
    total: String,
    priced: bool,
}

impl Row {
    /// Amount cells carry the currency sign, sentinels are shown as they are
    fn amount(&self, text: &str) -> String {
        if self.priced {
            format!("{text}{CURRENCY}")
        } else {
            text.to_string()
        }
    }
}

/// Widest cell of a column, at least `min` characters
fn column_width(rows: &[Row], min: usize, pick: fn(&Row) -> &str) -> usize {
    rows.iter()
        .map(|row| pick(row).chars().count())
        .fold(min, usize::max)
}

/// Renders the per-card table:
///
/// ```text
/// Card name     |Qty|Price |Total
/// --------------+---+------+------
/// Lightning Bolt|  4| 1.50€| 6.00€
/// --------------+---+------+------
/// ```
///
/// Amount columns are one character wider than their widest bare cell, which
/// leaves room for the currency sign.
pub fn format_collection_table(collection: &Collection) -> Result<String> {
    let mut rows = Vec::with_capacity(collection.len());
    for record in collection {
        rows.push(Row {
            name: record.name.clone(),
            quantity: record.quantity.to_string(),
            price: cell(record, record.price.amount()),
            total: cell(record, line_total(record)?),
            priced: record.price.is_priced(),
        });
    }

    let name_w = column_width(&rows, 9, |r| r.name.as_str());
    let qty_w = column_width(&rows, 3, |r| r.quantity.as_str());
    let price_w = column_width(&rows, 5, |r| r.price.as_str()) + 1;
    let total_w = column_width(&rows, 5, |r| r.total.as_str()) + 1;

    let separator = format!(
        "{}+{}+{}+{}\n",
        "-".repeat(name_w),
        "-".repeat(qty_w),
        "-".repeat(price_w),
        "-".repeat(total_w)
    );

    let mut output = format!(
        "{:<name_w$}|{:<qty_w$}|{:<price_w$}|{:<total_w$}\n",
        "Card name", "Qty", "Price", "Total"
    );
    output.push_str(&separator);
    for row in &rows {
        output.push_str(&format!(
            "{:<name_w$}|{:>qty_w$}|{:>price_w$}|{:>total_w$}\n",
            row.name,
            row.quantity,
            row.amount(&row.price),
            row.amount(&row.total)
        ));
    }
    output.push_str(&separator);
    Ok(output)
}

/// Record and copy counts, e.g. `4 cards (11 copies), 1 unpriced`
pub fn format_counts(valuation: &Valuation) -> String {
    format!(
        "{} cards ({} copies), {} unpriced",
        valuation.cards(),
        valuation.copies,
        valuation.unpriced
    )
}

pub fn format_total(total: Money) -> String {
    format!("Collection total: {total}{CURRENCY}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Price;

    #[test]
    fn renders_priced_and_unpriced_rows() {
        let collection = Collection::new(vec![
            CardRecord::new("Lightning Bolt", 4).with_price(Price::Priced(Money::from_cents(150))),
            CardRecord::new("Nonexistent Card", 1),
        ]);

        let table = format_collection_table(&collection).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Card name       |Qty|Price |Total ");
        assert_eq!(lines[1], "----------------+---+------+------");
        assert_eq!(lines[2], "Lightning Bolt  |  4| 1.50€| 6.00€");
        assert_eq!(lines[3], "Nonexistent Card|  1|   N/A|   N/A");
        assert_eq!(lines[4], lines[1]);
    }

    #[test]
    fn columns_grow_with_content() {
        let collection = Collection::new(vec![
            CardRecord::new("Black Lotus", 1000).with_price(Price::Priced(Money::from_cents(2_500_000))),
        ]);

        let table = format_collection_table(&collection).unwrap();
        let row = table.lines().nth(2).unwrap();
        assert_eq!(row, "Black Lotus|1000|25000.00€|25000000.00€");
    }

    #[test]
    fn long_sentinel_keeps_currency_slack() {
        let collection = Collection::new(vec![
            CardRecord::new("Sol Ring", 1).with_price(Price::Priced(Money::from_cents(250))),
            CardRecord::new("Old Card", 2).with_price(Price::from_field("unknown")),
        ]);

        let table = format_collection_table(&collection).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Card name|Qty|Price   |Total   ");
        assert_eq!(lines[1], "---------+---+--------+--------");
        assert_eq!(lines[2], "Sol Ring |  1|   2.50€|   2.50€");
        assert_eq!(lines[3], "Old Card |  2| unknown| unknown");
    }

    #[test]
    fn empty_collection_has_header_only() {
        let table = format_collection_table(&Collection::default()).unwrap();
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn counts_line() {
        let valuation = Valuation {
            total: Money::from_cents(7997),
            priced: 3,
            unpriced: 1,
            copies: 11,
        };
        assert_eq!(format_counts(&valuation), "4 cards (11 copies), 1 unpriced");
    }

    #[test]
    fn total_line() {
        assert_eq!(format_total(Money::from_cents(2000)), "Collection total: 20.00€");
    }
}
