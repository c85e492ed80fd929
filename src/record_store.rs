//! Reading and writing collection files
//!
//! Unpriced files hold one `name;quantity` record per line. Priced files add the
//! price per copy and the line total: `name;quantity;price;total`. A record whose
//! price could not be determined carries a sentinel token (normally `N/A`) in both
//! price columns, and that token survives later read/write cycles unchanged.
//!
//! Parsing is all-or-nothing: the first malformed line rejects the whole file.

use crate::collection::{CardRecord, Collection, Price};
use crate::error::{CheckerError, Result};
use crate::valuation::line_total;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix inserted into derived output file names
pub const OUTPUT_SUFFIX: &str = " (1)";

/// Field layout shared by the reader and the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    pub delimiter: char,
}

impl RecordFormat {
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self::new(';')
    }
}

/// Reads a `name;quantity` collection file
pub fn parse_unpriced(path: &Path, format: &RecordFormat) -> Result<Collection> {
    let content = read_source(path)?;
    parse_unpriced_str(&content, format)
}

/// Reads a `name;quantity;price[;total]` collection file
pub fn parse_priced(path: &Path, format: &RecordFormat) -> Result<Collection> {
    let content = read_source(path)?;
    parse_priced_str(&content, format)
}

pub fn parse_unpriced_str(content: &str, format: &RecordFormat) -> Result<Collection> {
    parse_lines(content, format, 2, |name, quantity, _| {
        Ok(CardRecord::new(name, quantity))
    })
}

pub fn parse_priced_str(content: &str, format: &RecordFormat) -> Result<Collection> {
    parse_lines(content, format, 3, |name, quantity, fields| {
        Ok(CardRecord::new(name, quantity).with_price(Price::from_field(fields[2])))
    })
}

fn read_source(path: &Path) -> Result<String> {
    log::debug!("Reading collection from {}", path.display());
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CheckerError::NotFound(path.to_path_buf()),
        _ => CheckerError::Io(e),
    })
}

fn parse_lines<F>(
    content: &str,
    format: &RecordFormat,
    min_fields: usize,
    build: F,
) -> Result<Collection>
where
    F: Fn(&str, u64, &[&str]) -> Result<CardRecord>,
{
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        let fields: Vec<&str> = line.split(format.delimiter).collect();

        let malformed = || CheckerError::MalformedLine {
            line: index + 1,
            raw: line.to_string(),
        };

        if fields.len() < min_fields || fields[0].is_empty() {
            return Err(malformed());
        }
        let quantity = match parse_quantity(fields[1]) {
            Quantity::Count(quantity) => quantity,
            Quantity::OutOfRange => {
                return Err(CheckerError::QuantityOutOfRange {
                    line: index + 1,
                    raw: line.to_string(),
                })
            }
            Quantity::Invalid => return Err(malformed()),
        };

        records.push(build(fields[0], quantity, &fields)?);
    }

    log::debug!("Parsed {} records", records.len());
    Ok(Collection::new(records))
}

enum Quantity {
    Count(u64),
    OutOfRange,
    Invalid,
}

/// Quantity must be plain ASCII digits; signs are not accepted
fn parse_quantity(field: &str) -> Quantity {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Quantity::Invalid;
    }
    // digits only, so the only possible failure is overflow
    field.parse().map_or(Quantity::OutOfRange, Quantity::Count)
}

/// Renders a collection in the priced file layout
pub fn serialize(collection: &Collection, format: &RecordFormat) -> Result<String> {
    let d = format.delimiter;
    let mut output = String::new();

    for record in collection {
        let line = match (&record.price, line_total(record)?) {
            (Price::Priced(price), Some(total)) => {
                format!("{}{d}{}{d}{}{d}{}\n", record.name, record.quantity, price, total)
            }
            (price, _) => {
                let token = price.sentinel().unwrap_or_default();
                format!("{}{d}{}{d}{}{d}{}\n", record.name, record.quantity, token, token)
            }
        };
        output.push_str(&line);
    }

    Ok(output)
}

/// Writes a collection to a path that must not exist yet.
///
/// The text goes to a temporary file next to `path` first and is moved into
/// place without replacing anything, so a failed write never leaves a partial
/// output behind.
pub fn write_new(path: &Path, collection: &Collection, format: &RecordFormat) -> Result<()> {
    let text = serialize(collection, format)?;

    if path.exists() {
        return Err(CheckerError::AlreadyExists(path.to_path_buf()));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(text.as_bytes())?;
    staged.persist_noclobber(path).map_err(|e| match e.error.kind() {
        io::ErrorKind::AlreadyExists => CheckerError::AlreadyExists(path.to_path_buf()),
        _ => CheckerError::Io(e.error),
    })?;

    log::info!("Wrote {} records to {}", collection.len(), path.display());
    Ok(())
}

/// Replaces the contents of `path` with the priced collection
pub fn write_collection(path: &Path, collection: &Collection, format: &RecordFormat) -> Result<()> {
    let text = serialize(collection, format)?;
    fs::write(path, text)?;
    log::info!("Updated {} with {} records", path.display(), collection.len());
    Ok(())
}

/// Output file name for an input path: `collection.csv` -> `collection (1).csv`
pub fn derive_output_name(input: &Path) -> String {
    let basename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string_lossy().into_owned());

    let mut segments: Vec<String> = basename.split('.').map(str::to_string).collect();
    if segments.len() < 2 {
        return format!("{basename}{OUTPUT_SUFFIX}");
    }
    let stem = segments.len() - 2;
    segments[stem].push_str(OUTPUT_SUFFIX);
    segments.join(".")
}

/// Where the priced copy of `input` is written
pub fn derive_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(derive_output_name(input))
}

#[cfg(test)]
#[path = "record_store_tests.rs"]
mod tests;
