//! Card Price Checker
//!
//! Prices MTG collection files through Scryfall and prints their total value.

use card_price_checker::{
    run, Actions, CheckerConfig, PacingMode, PriceResolver, RecordFormat, RetryPolicy,
    ScryfallClient,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// MTG card price checker
#[derive(Parser, Debug)]
#[command(name = "card_price_checker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Collection files with one "<card name>;<quantity>" per line
    files: Vec<PathBuf>,

    /// Update the files, puts card prices in the given files
    #[arg(short, long, default_value_t = false)]
    update_files: bool,

    /// Output new files containing card names, quantities and prices
    #[arg(short, long, default_value_t = false)]
    output_files: bool,

    /// Don't check prices online, only report the prices stored in the files
    #[arg(short, long, default_value_t = false)]
    print_only: bool,

    /// Print the prices of all cards in the collection
    #[arg(short = 'a', long, default_value_t = false)]
    all_cards: bool,

    /// Directory for files written with --output-files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Delay between Scryfall requests in milliseconds
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// Only wait for the part of the delay not already spent since the last request
    #[arg(long, default_value_t = false)]
    min_interval: bool,

    /// Retries for failed requests (network errors, HTTP 429 and 5xx)
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Wait before each retry in milliseconds
    #[arg(long, default_value_t = 1000)]
    retry_backoff_ms: u64,

    /// Scryfall API base URL
    #[arg(long, default_value = "https://api.scryfall.com")]
    api_url: String,

    /// Field delimiter used in collection files
    #[arg(long, default_value_t = ';')]
    delimiter: char,
}

impl Args {
    fn into_config(self) -> (Vec<PathBuf>, CheckerConfig) {
        let config = CheckerConfig {
            format: RecordFormat::new(self.delimiter),
            request_delay: Duration::from_millis(self.delay_ms),
            pacing: if self.min_interval {
                PacingMode::MinInterval
            } else {
                PacingMode::Fixed
            },
            retry: RetryPolicy {
                max_retries: self.retries,
                backoff: Duration::from_millis(self.retry_backoff_ms),
            },
            api_url: self.api_url,
            output_dir: self.output_dir,
            actions: Actions {
                print_only: self.print_only,
                update_files: self.update_files,
                output_files: self.output_files,
                print_all: self.all_cards,
            },
        };
        (self.files, config)
    }
}

fn main() {
    // Initialize logging. Set RUST_LOG to control the level, e.g. RUST_LOG=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (files, config) = Args::parse().into_config();

    let client = match ScryfallClient::with_base_url(config.api_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create Scryfall client: {}", e);
            std::process::exit(1);
        }
    };
    let mut resolver = PriceResolver::new(client)
        .with_boxed_pacing(config.build_pacing())
        .with_retry(config.retry);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run(&files, &config, &mut resolver, &mut out) {
        Ok(report) if report.is_success() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            log::error!("Application error: {}", e);
            std::process::exit(1);
        }
    }
}
