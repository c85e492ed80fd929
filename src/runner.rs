//! Per-file pipeline: read, price, write, report
//!
//! Every file is handled on its own. A missing or malformed file is reported and
//! skipped; the remaining files are still processed.

use crate::collection::Collection;
use crate::config::CheckerConfig;
use crate::error::{CheckerError, Result};
use crate::record_store::{
    derive_output_path, parse_priced, parse_unpriced, write_collection, write_new,
};
use crate::report::{format_collection_table, format_counts, format_total};
use crate::resolver::{PriceLookup, PriceResolver, ResolveSummary};
use crate::valuation::Valuation;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of processing a single collection file
#[derive(Debug)]
pub struct FileOutcome {
    pub collection: Collection,
    /// `None` in print-only mode
    pub summary: Option<ResolveSummary>,
    pub valuation: Valuation,
    pub updated: bool,
    pub output: Option<PathBuf>,
    /// Output that was skipped, e.g. because the file already existed
    pub output_error: Option<CheckerError>,
}

/// Result of a whole run over several files
#[derive(Debug, Default)]
pub struct RunReport {
    pub processed: Vec<(PathBuf, Valuation)>,
    pub failed: Vec<(PathBuf, CheckerError)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the configured actions for one file
pub fn process_file<L: PriceLookup>(
    path: &Path,
    config: &CheckerConfig,
    resolver: &mut PriceResolver<L>,
    out: &mut dyn Write,
) -> Result<FileOutcome> {
    let actions = config.actions;
    writeln!(out, "Getting data from {}", path.display())?;

    let (collection, summary) = if actions.print_only {
        (parse_priced(path, &config.format)?, None)
    } else {
        let mut collection = parse_unpriced(path, &config.format)?;
        writeln!(out, "Checking card prices")?;
        let summary = resolver.resolve_collection(&mut collection)?;
        for name in &summary.not_found {
            writeln!(out, "{}, skipping", CheckerError::CardNotFound(name.clone()))?;
        }
        (collection, Some(summary))
    };

    let mut updated = false;
    if actions.update_files {
        writeln!(out, "Updating {}", path.display())?;
        write_collection(path, &collection, &config.format)?;
        updated = true;
    }

    let mut output = None;
    let mut output_error = None;
    if actions.output_files {
        let target = derive_output_path(path, &config.output_dir);
        writeln!(out, "Outputting to {}", target.display())?;
        match write_new(&target, &collection, &config.format) {
            Ok(()) => output = Some(target),
            Err(e @ CheckerError::AlreadyExists(_)) => {
                log::debug!("Output not written: {}", e);
                writeln!(out, "{}\nSkipping", e)?;
                output_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    writeln!(out, "Done")?;

    if actions.print_all {
        writeln!(out, "All cards:")?;
        write!(out, "{}", format_collection_table(&collection)?)?;
    }

    let valuation = Valuation::of(&collection)?;
    writeln!(out, "{}", format_counts(&valuation))?;
    writeln!(out, "{}\n", format_total(valuation.total))?;

    Ok(FileOutcome {
        collection,
        summary,
        valuation,
        updated,
        output,
        output_error,
    })
}

/// Processes every file in order, reporting and skipping files that fail
pub fn run<L: PriceLookup>(
    files: &[PathBuf],
    config: &CheckerConfig,
    resolver: &mut PriceResolver<L>,
    out: &mut dyn Write,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    for path in files {
        match process_file(path, config, resolver, out) {
            Ok(outcome) => report.processed.push((path.clone(), outcome.valuation)),
            Err(e) => {
                log::debug!("Failed to process {}: {}", path.display(), e);
                writeln!(out, "{}\nSkipping\n", e)?;
                report.failed.push((path.clone(), e));
            }
        }
    }

    log::info!(
        "Processed {} file(s), {} skipped",
        report.processed.len(),
        report.failed.len()
    );
    Ok(report)
}
