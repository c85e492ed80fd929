//! Card Price Checker - MTG collection valuation
//!
//! Reads plain-text card lists (`name;quantity`), prices every card through the
//! Scryfall API, writes priced lists back to disk and reports the collection value.

pub mod collection;
pub mod config;
pub mod error;
pub mod money;
pub mod record_store;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod scryfall;
pub mod valuation;

pub use collection::{CardRecord, Collection, Price};
pub use config::{Actions, CheckerConfig, PacingMode};
pub use error::{CheckerError, Result};
pub use money::Money;
pub use record_store::RecordFormat;
pub use resolver::{
    FixedDelay, LookupOutcome, MinInterval, Pacing, PriceLookup, PriceResolver, ResolveSummary,
    RetryPolicy,
};
pub use runner::{process_file, run, FileOutcome, RunReport};
pub use scryfall::ScryfallClient;
pub use valuation::{collection_total, line_total, Valuation};
