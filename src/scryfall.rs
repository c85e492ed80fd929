//! Scryfall API client for card prices
//!
//! Uses blocking reqwest; lookups are strictly sequential anyway.

use crate::error::{CheckerError, Result};
use crate::money::Money;
use crate::resolver::{LookupOutcome, PriceLookup};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

pub const SCRYFALL_API_URL: &str = "https://api.scryfall.com";

const USER_AGENT: &str = "D2D-Automations-PriceChecker/1.0";

/// Scryfall card response (only the fields we price from)
#[derive(Debug, Deserialize, Clone)]
pub struct ScryfallCard {
    pub name: String,
    #[serde(default)]
    pub prices: ScryfallPrices,
}

/// Price block of a card; other currencies in the payload are ignored
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScryfallPrices {
    pub eur: Option<String>,
}

impl ScryfallCard {
    /// Cardmarket EUR price, `None` if Scryfall lists none
    pub fn eur_price(&self) -> Result<Option<Money>> {
        match self.prices.eur.as_deref() {
            None => Ok(None),
            Some(raw) => Money::parse_decimal(raw)
                .map(Some)
                .ok_or_else(|| CheckerError::InvalidPrice {
                    name: self.name.clone(),
                    raw: raw.to_string(),
                }),
        }
    }
}

/// Blocking client for the `/cards/named` endpoint
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    http: Client,
    base_url: String,
}

impl ScryfallClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(SCRYFALL_API_URL)
    }

    /// Client against another host, e.g. a mock server in tests
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a card by exact name; `Ok(None)` when Scryfall does not know it
    pub fn fetch_named(&self, name: &str) -> Result<Option<ScryfallCard>> {
        let url = format!(
            "{}/cards/named?exact={}",
            self.base_url,
            urlencoding::encode(name)
        );

        log::debug!("Fetching card from Scryfall: {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()?;

        match response.status() {
            status if status.is_success() => {
                // decoded separately so a bad body is a parse error, not a transport one
                let body = response.text()?;
                Ok(Some(serde_json::from_str::<ScryfallCard>(&body)?))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(CheckerError::HttpStatus(status)),
        }
    }
}

impl PriceLookup for ScryfallClient {
    fn lookup(&mut self, name: &str) -> Result<LookupOutcome> {
        match self.fetch_named(name)? {
            Some(card) => Ok(LookupOutcome::Found {
                eur: card.eur_price()?,
            }),
            None => Ok(LookupOutcome::NotFound),
        }
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
