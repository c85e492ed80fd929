//! Run configuration shared by the library and the CLI

use crate::record_store::RecordFormat;
use crate::resolver::{FixedDelay, MinInterval, Pacing, RetryPolicy, DEFAULT_REQUEST_DELAY};
use crate::scryfall::SCRYFALL_API_URL;
use std::path::PathBuf;
use std::time::Duration;

/// How lookups are spaced out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingMode {
    /// Sleep the full delay before every request
    Fixed,
    /// Sleep only the part of the delay not already spent since the last request
    MinInterval,
}

/// What to do with each collection file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    /// Read stored prices instead of querying Scryfall
    pub print_only: bool,
    /// Rewrite the input file with prices
    pub update_files: bool,
    /// Write a priced copy into the output directory
    pub output_files: bool,
    /// Print the per-card table
    pub print_all: bool,
}

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub format: RecordFormat,
    pub request_delay: Duration,
    pub pacing: PacingMode,
    pub retry: RetryPolicy,
    pub api_url: String,
    pub output_dir: PathBuf,
    pub actions: Actions,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            format: RecordFormat::default(),
            request_delay: DEFAULT_REQUEST_DELAY,
            pacing: PacingMode::Fixed,
            retry: RetryPolicy::none(),
            api_url: SCRYFALL_API_URL.to_string(),
            output_dir: PathBuf::from("."),
            actions: Actions::default(),
        }
    }
}

impl CheckerConfig {
    /// Builds the pacing policy selected by this configuration
    pub fn build_pacing(&self) -> Box<dyn Pacing> {
        match self.pacing {
            PacingMode::Fixed => Box::new(FixedDelay::new(self.request_delay)),
            PacingMode::MinInterval => Box::new(MinInterval::new(self.request_delay)),
        }
    }
}
