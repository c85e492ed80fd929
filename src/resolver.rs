//! Price resolution for whole collections
//!
//! Each record costs exactly one lookup (plus configured retries). Lookups run
//! one after another and every call first waits on the pacing policy, which keeps
//! the request rate under the limit Scryfall asks clients to respect
//! (https://scryfall.com/docs/api).

use crate::collection::{Collection, Price};
use crate::error::Result;
use crate::money::Money;
use std::thread;
use std::time::{Duration, Instant};

/// Default spacing between two Scryfall requests
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(200);

/// Result of asking the pricing service about one card name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The card exists; `eur` is `None` when the service lists no price
    Found { eur: Option<Money> },
    NotFound,
}

/// Capability to look up a card's price by exact name
pub trait PriceLookup {
    fn lookup(&mut self, name: &str) -> Result<LookupOutcome>;
}

/// Spacing policy applied before every lookup call
pub trait Pacing {
    fn wait(&mut self);
}

/// Sleeps for the same delay before every call
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}

impl Pacing for FixedDelay {
    fn wait(&mut self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Sleeps only for whatever is left of the interval since the previous call
#[derive(Debug, Clone)]
pub struct MinInterval {
    interval: Duration,
    last_call: Option<Instant>,
}

impl MinInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: None,
        }
    }
}

impl Pacing for MinInterval {
    fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_call = Some(Instant::now());
    }
}

/// How often a lookup is repeated after a transient failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::from_secs(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// What happened while pricing one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub looked_up: usize,
    pub priced: usize,
    /// Names the service did not know, in file order
    pub not_found: Vec<String>,
}

/// Drives lookups for a collection
pub struct PriceResolver<L> {
    lookup: L,
    pacing: Box<dyn Pacing>,
    retry: RetryPolicy,
}

impl<L: PriceLookup> PriceResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            pacing: Box::new(FixedDelay::default()),
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_pacing(mut self, pacing: impl Pacing + 'static) -> Self {
        self.pacing = Box::new(pacing);
        self
    }

    pub fn with_boxed_pacing(mut self, pacing: Box<dyn Pacing>) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Prices a single card.
    ///
    /// A card the service does not know becomes unpriced; a card without a
    /// listed price is priced at zero. Other failures are returned.
    pub fn resolve(&mut self, name: &str) -> Result<Price> {
        let mut attempt = 0;
        loop {
            self.pacing.wait();
            log::debug!("Looking up price for {}", name);

            match self.lookup.lookup(name) {
                Ok(LookupOutcome::Found { eur }) => {
                    return Ok(Price::Priced(eur.unwrap_or(Money::ZERO)));
                }
                Ok(LookupOutcome::NotFound) => {
                    log::debug!("No card named {}, leaving it unpriced", name);
                    return Ok(Price::unpriced());
                }
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "Lookup for {} failed ({}), retry {}/{}",
                        name,
                        e,
                        attempt,
                        self.retry.max_retries
                    );
                    thread::sleep(self.retry.backoff);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Prices every record in file order, one lookup at a time
    pub fn resolve_collection(&mut self, collection: &mut Collection) -> Result<ResolveSummary> {
        let mut summary = ResolveSummary::default();

        for record in collection.iter_mut() {
            let price = self.resolve(&record.name)?;
            summary.looked_up += 1;
            if price.is_priced() {
                summary.priced += 1;
            } else {
                summary.not_found.push(record.name.clone());
            }
            record.price = price;
        }

        log::info!(
            "Priced {} of {} cards ({} not found)",
            summary.priced,
            summary.looked_up,
            summary.not_found.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
