//! Scenario: live quote normalization and mock fallback against a simulated GoldAPI.
//!
//! Every test stands up an in-process `httpmock` server in place of
//! GoldAPI.io and drives `PriceFetcher` end to end. No external network.
//!
//! # Coverage
//! 1. 2xx payload → `live_data` quote with deterministic field mapping
//! 2. Credential header and URL path are sent as expected
//! 3. No credential → `mock_data`, zero upstream hits
//! 4. Non-2xx → transport failure → `mock_data` with HTTP error text
//! 5. 2xx with `error` field → upstream failure → `mock_data` with that text
//! 6. Malformed body → decode failure → `mock_data`
//! 7. Timeout → transport failure → `mock_data`
//! 8. Connection refused → transport failure → `mock_data`
//! 9. Every known metal yields `live_data` or `mock_data`

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use mv_md::{
    BasePrices, FetcherConfig, Metal, MockGenerator, PriceFetcher, QuoteStatus, SeededRandom,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const KEY: &str = "goldapi-test-key";

fn seeded_mock() -> MockGenerator {
    MockGenerator::new(BasePrices::default(), Arc::new(SeededRandom::new(1)))
}

fn fetcher_for(server: &MockServer, timeout: Duration) -> PriceFetcher {
    let cfg = FetcherConfig {
        api_key: Some(KEY.to_string()),
        base_url: server.base_url(),
        timeout,
    };
    PriceFetcher::new(cfg, seeded_mock())
}

// ---------------------------------------------------------------------------
// 1 + 2. Live path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn live_payload_is_normalized_field_by_field() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/XAU/USD")
                .header("x-access-token", KEY);
            then.status(200).json_body(json!({
                "timestamp": 1714564800,
                "metal": "XAU",
                "currency": "USD",
                "price": 2331.455,
                "prev_close_price": 2300.1,
                "ch": 31.355,
                "chp": 1.3632,
                "high_price": 2340,
                "low_price": "2295.5",
                "open_price": 2301.0
            }));
        })
        .await;

    let fetcher = fetcher_for(&server, Duration::from_secs(5));
    let q = fetcher.fetch("XAU", "USD").await;

    upstream.assert_async().await;
    assert_eq!(q.status, QuoteStatus::LiveData);
    assert_eq!(q.data_source, "GoldAPI.io");
    assert_eq!(q.symbol, "XAU");
    assert_eq!(q.name, "Gold");
    assert_eq!(q.currency, "USD");
    // Upstream precision passes through unrounded.
    assert_eq!(q.price, 2331.455);
    assert_eq!(q.prev_close_price, 2300.1);
    assert_eq!(q.ch, 31.355);
    assert_eq!(q.change_pct, 1.3632);
    assert_eq!(q.high, 2340.0);
    assert_eq!(q.low, 2295.5);
    assert_eq!(q.open, 2301.0);
    assert_eq!(q.timestamp, "2024-05-01T12:00:00.000Z");
    assert!(q.error.is_none());
}

#[tokio::test]
async fn live_payload_with_missing_fields_defaults_to_zero() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/XAG/EUR");
            then.status(200).json_body(json!({ "price": 26.1 }));
        })
        .await;

    let q = fetcher_for(&server, Duration::from_secs(5))
        .fetch("XAG", "EUR")
        .await;

    assert_eq!(q.status, QuoteStatus::LiveData);
    assert_eq!(q.price, 26.1);
    assert_eq!(q.prev_close_price, 0.0);
    assert_eq!(q.ch, 0.0);
    assert_eq!(q.high, 0.0);
    assert!(!q.timestamp.is_empty());
}

// ---------------------------------------------------------------------------
// 3. No credential
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_credential_never_touches_upstream() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({ "price": 1.0 }));
        })
        .await;

    for key in [None, Some(""), Some("your_api_key_here")] {
        let cfg = FetcherConfig {
            api_key: key.map(str::to_string),
            base_url: server.base_url(),
            timeout: Duration::from_secs(5),
        };
        let fetcher = PriceFetcher::new(cfg, seeded_mock());
        let q = fetcher.fetch("XAU", "USD").await;

        assert_eq!(q.status, QuoteStatus::MockData);
        assert_eq!(q.data_source, "Mock Generator");
        assert_eq!(q.error.as_deref(), Some("API key not configured."));
    }

    assert_eq!(upstream.hits_async().await, 0);
}

// ---------------------------------------------------------------------------
// 4. Non-2xx
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_2xx_falls_back_with_http_error_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/XPT/USD");
            then.status(403)
                .json_body(json!({ "error": "No API Key provided" }));
        })
        .await;

    let fetcher = fetcher_for(&server, Duration::from_secs(5));

    let err = fetcher.fetch_live("XPT", "USD").await.unwrap_err();
    assert_eq!(err.kind(), "transport");
    assert!(err.message().contains("403"), "got: {err}");

    let q = fetcher.fetch("XPT", "USD").await;
    assert_eq!(q.status, QuoteStatus::MockData);
    assert_eq!(q.name, "Platinum");
    assert!(q.error.as_deref().unwrap_or_default().contains("403"));
}

// ---------------------------------------------------------------------------
// 5. Upstream-reported error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_error_field_falls_back_with_that_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/XAU/ZZZ");
            then.status(200)
                .json_body(json!({ "error": "Invalid Currency" }));
        })
        .await;

    let fetcher = fetcher_for(&server, Duration::from_secs(5));

    let err = fetcher.fetch_live("XAU", "ZZZ").await.unwrap_err();
    assert_eq!(err.kind(), "upstream");

    let q = fetcher.fetch("XAU", "ZZZ").await;
    assert_eq!(q.status, QuoteStatus::MockData);
    assert_eq!(q.currency, "ZZZ");
    assert_eq!(q.error.as_deref(), Some("Invalid Currency"));
}

// ---------------------------------------------------------------------------
// 6. Malformed body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_falls_back_as_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/XPD/USD");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let fetcher = fetcher_for(&server, Duration::from_secs(5));

    let err = fetcher.fetch_live("XPD", "USD").await.unwrap_err();
    assert_eq!(err.kind(), "decode");

    let q = fetcher.fetch("XPD", "USD").await;
    assert_eq!(q.status, QuoteStatus::MockData);
    assert!(q.error.is_some());
}

// ---------------------------------------------------------------------------
// 7 + 8. Transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slow_upstream_times_out_into_mock() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/XCU/USD");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({ "price": 4.3 }));
        })
        .await;

    let fetcher = fetcher_for(&server, Duration::from_millis(200));

    let err = fetcher.fetch_live("XCU", "USD").await.unwrap_err();
    assert_eq!(err.kind(), "transport");

    let q = fetcher.fetch("XCU", "USD").await;
    assert_eq!(q.status, QuoteStatus::MockData);
    assert_eq!(q.name, "Copper");
}

#[tokio::test]
async fn refused_connection_falls_back_to_mock() {
    let cfg = FetcherConfig {
        api_key: Some(KEY.to_string()),
        // Port 1 is reserved and never listening in test environments.
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: Duration::from_secs(2),
    };
    let fetcher = PriceFetcher::new(cfg, seeded_mock());

    let err = fetcher.fetch_live("XAU", "USD").await.unwrap_err();
    assert_eq!(err.kind(), "transport");

    let q = fetcher.fetch("XAU", "USD").await;
    assert_eq!(q.status, QuoteStatus::MockData);
    assert!(q.error.is_some());
}

// ---------------------------------------------------------------------------
// 9. Status is always one of the two values
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_metal_yields_live_or_mock() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/XAU/USD");
            then.status(200).json_body(json!({ "price": 2300.0 }));
        })
        .await;
    // Anything else is a 404 from httpmock.

    let fetcher = fetcher_for(&server, Duration::from_secs(5));
    for m in Metal::ALL {
        let q = fetcher.fetch(m.code(), "USD").await;
        assert!(matches!(
            q.status,
            QuoteStatus::LiveData | QuoteStatus::MockData
        ));
        if m == Metal::Gold {
            assert_eq!(q.status, QuoteStatus::LiveData);
        } else {
            assert_eq!(q.status, QuoteStatus::MockData);
        }
    }
}
