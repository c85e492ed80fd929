//! Tests for the Scryfall API client.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::resolver::{FixedDelay, PriceResolver, RetryPolicy};
use std::time::Duration;

fn card_json(name: &str, eur: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "object": "card",
        "id": "test-uuid-123",
        "name": name,
        "set": "lea",
        "prices": { "eur": eur, "eur_foil": null, "usd": "2.00", "usd_foil": null }
    })
}

fn not_found_json() -> serde_json::Value {
    serde_json::json!({
        "object": "error",
        "status": 404,
        "code": "not_found",
        "details": "No cards found matching the given name"
    })
}

/// Runs a lookup against the mock server on a blocking thread
async fn lookup_on(server: &MockServer, name: &'static str) -> Result<LookupOutcome> {
    let base_url = server.uri();
    tokio::task::spawn_blocking(move || {
        let mut client = ScryfallClient::with_base_url(base_url)?;
        client.lookup(name)
    })
    .await
    .unwrap()
}

// ── deserialization ──────────────────────────────────────────────────

#[test]
fn eur_price_parses_decimal_string() {
    let card: ScryfallCard = serde_json::from_value(card_json("Bolt", Some("1.50"))).unwrap();
    assert_eq!(card.eur_price().unwrap(), Some(Money::from_cents(150)));
}

#[test]
fn eur_price_null_is_none() {
    let card: ScryfallCard = serde_json::from_value(card_json("Bolt", None)).unwrap();
    assert_eq!(card.eur_price().unwrap(), None);
}

#[test]
fn missing_prices_object_is_none() {
    let card: ScryfallCard = serde_json::from_str(r#"{ "name": "Test Card" }"#).unwrap();
    assert_eq!(card.eur_price().unwrap(), None);
}

#[test]
fn garbage_price_is_invalid() {
    let card: ScryfallCard = serde_json::from_value(card_json("Bolt", Some("cheap"))).unwrap();
    assert!(matches!(
        card.eur_price(),
        Err(CheckerError::InvalidPrice { .. })
    ));
}

#[test]
fn base_url_trailing_slash_is_dropped() {
    let client = ScryfallClient::with_base_url("http://localhost:1234/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:1234");
}

// ── lookup ───────────────────────────────────────────────────────────

#[tokio::test]
async fn lookup_found_card() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Lightning Bolt"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(card_json("Lightning Bolt", Some("1.25"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = lookup_on(&mock_server, "Lightning Bolt").await.unwrap();
    assert_eq!(
        outcome,
        LookupOutcome::Found {
            eur: Some(Money::from_cents(125))
        }
    );
}

#[tokio::test]
async fn lookup_encodes_special_characters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .and(query_param("exact", "Fire // Ice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("Fire // Ice", Some("0.30"))))
        .mount(&mock_server)
        .await;

    let outcome = lookup_on(&mock_server, "Fire // Ice").await.unwrap();
    assert_eq!(
        outcome,
        LookupOutcome::Found {
            eur: Some(Money::from_cents(30))
        }
    );
}

#[tokio::test]
async fn lookup_card_without_eur_price() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("Plains", None)))
        .mount(&mock_server)
        .await;

    let outcome = lookup_on(&mock_server, "Plains").await.unwrap();
    assert_eq!(outcome, LookupOutcome::Found { eur: None });
}

#[tokio::test]
async fn lookup_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_json()))
        .mount(&mock_server)
        .await;

    let outcome = lookup_on(&mock_server, "Nonexistent Card").await.unwrap();
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn lookup_server_error_is_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    match lookup_on(&mock_server, "Sol Ring").await {
        Err(CheckerError::HttpStatus(status)) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        }
        other => panic!("Expected CheckerError::HttpStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn lookup_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = lookup_on(&mock_server, "Sol Ring").await;
    match result {
        Err(e @ CheckerError::Parse(_)) => assert!(!e.is_transient()),
        other => panic!("Expected CheckerError::Parse, got: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/named"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = ScryfallClient::with_base_url(base_url)?;
        PriceResolver::new(client)
            .with_pacing(FixedDelay::new(Duration::ZERO))
            .with_retry(RetryPolicy {
                max_retries: 3,
                backoff: Duration::ZERO,
            })
            .resolve("Sol Ring")
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(CheckerError::Parse(_))));
}

// Integration test (requires network access)
#[test]
#[ignore] // Run with: cargo test -- --ignored
fn lookup_live_scryfall() {
    let mut client = ScryfallClient::new().unwrap();
    let outcome = client.lookup("Lightning Bolt").unwrap();
    assert!(matches!(outcome, LookupOutcome::Found { .. }));
}
