use std::time::Duration;

use chrono::NaiveDate;
use eodhd_options::{EodhdError, EodhdOptions, OptionType, OptionsQuery};
use httpmock::prelude::*;
use serde_json::json;

mod helpers;
use helpers::{KEY, temp_store};

const EOD_PATH: &str = "/api/mp/unicornbay/options/eod";
const REALTIME_PATH: &str = "/api/real-time";

fn client(server: &MockServer) -> (tempfile::TempDir, EodhdOptions) {
    let (dir, store) = temp_store();
    let client = EodhdOptions::builder()
        .api_key(KEY)
        .credential_store(store)
        .options_url(server.url(EOD_PATH))
        .realtime_url(server.url(REALTIME_PATH))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    (dir, client)
}

fn item(contract: &str, strike: f64) -> serde_json::Value {
    json!({
        "id": contract,
        "type": "options-eod",
        "attributes": {"contract": contract, "strike": strike, "type": "call"}
    })
}

#[test]
fn listing_request_carries_filters_and_token() {
    let server = MockServer::start();
    let listing = server.mock(|when, then| {
        when.method(GET)
            .path(EOD_PATH)
            .query_param("filter[underlying_symbol]", "AAPL")
            .query_param("filter[exp_date_from]", "2024-03-15")
            .query_param("filter[exp_date_to]", "2024-06-21")
            .query_param("filter[strike_from]", "0")
            .query_param("filter[strike_to]", "200")
            .query_param("filter[type]", "call")
            .query_param("sort", "exp_date")
            .query_param("page[limit]", "1000")
            .query_param("page[offset]", "0")
            .query_param("api_token", KEY);
        then.status(200).json_body(json!({
            "meta": {"total": 2},
            "data": [item("AAPL240315C00150000", 150.0), item("AAPL240315C00155000", 155.0)]
        }));
    });

    let (_d, client) = client(&server);
    let q = OptionsQuery::builder("AAPL")
        .expires_from(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        .expires_to("June 21, 2024")
        .strike_from(0.0)
        .strike_to(200.0)
        .option_type(OptionType::Call)
        .build()
        .unwrap();
    let rows = client.options(&q).unwrap();

    listing.assert();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.records()[1].f64_field("strike"), Some(155.0));
}

#[test]
fn second_page_is_requested_at_offset_1000() {
    let server = MockServer::start();
    let full: Vec<_> = (0..1000_u32)
        .map(|i| item(&format!("C{i}"), f64::from(i)))
        .collect();
    let first = server.mock(|when, then| {
        when.method(GET).path(EOD_PATH).query_param("page[offset]", "0");
        then.status(200).json_body(json!({ "data": full }));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path(EOD_PATH).query_param("page[offset]", "1000");
        then.status(200).json_body(json!({ "data": [item("LAST", 1.0)] }));
    });

    let (_d, client) = client(&server);
    let rows = client.options(&OptionsQuery::new("AAPL").unwrap()).unwrap();
    first.assert();
    second.assert();
    assert_eq!(rows.len(), 1001);
}

#[test]
fn non_success_status_carries_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EOD_PATH);
        then.status(401).body("Unauthenticated");
    });
    let (_d, client) = client(&server);
    let err = client.options(&OptionsQuery::new("AAPL").unwrap()).unwrap_err();
    match err {
        EodhdError::Http { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthenticated");
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[test]
fn chain_uses_sibling_endpoint_and_passes_data_through() {
    let server = MockServer::start();
    let chain = server.mock(|when, then| {
        when.method(GET)
            .path("/api/mp/unicornbay/options/chain")
            .query_param("symbol", "AAPL")
            .query_param("api_token", KEY);
        then.status(200).json_body(json!({
            "data": [
                {"contract": "AAPL240315C00150000", "strike": 150},
                {"contract": "AAPL240315P00150000", "strike": 150}
            ]
        }));
    });
    let (_d, client) = client(&server);
    let rows = client.option_chain("AAPL").unwrap();
    chain.assert();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.records()[1].str_field("contract"), Some("AAPL240315P00150000"));
}

#[test]
fn contract_details_upper_cases_type() {
    let server = MockServer::start();
    let details = server.mock(|when, then| {
        when.method(GET)
            .path("/api/mp/unicornbay/options/details")
            .query_param("symbol", "AAPL")
            .query_param("expiration", "2024-03-15")
            .query_param("strike", "150")
            .query_param("type", "CALL")
            .query_param("api_token", KEY);
        then.status(200)
            .json_body(json!({"symbol": "AAPL", "type": "CALL", "bid": 1.2}));
    });
    let (_d, client) = client(&server);
    let payload = client
        .contract_details("AAPL", "03/15/2024", 150.0, "call".parse().unwrap())
        .unwrap();
    details.assert();
    assert_eq!(payload["bid"], json!(1.2));
}

#[test]
fn current_price_reads_close() {
    let server = MockServer::start();
    let quote = server.mock(|when, then| {
        when.method(GET)
            .path("/api/real-time/AAPL.US")
            .query_param("fmt", "json")
            .query_param("api_token", KEY);
        then.status(200)
            .json_body(json!({"code": "AAPL.US", "close": 227.52}));
    });
    let (_d, client) = client(&server);
    let px = client.current_price("AAPL.US").unwrap();
    quote.assert();
    assert!((px - 227.52).abs() < 1e-9);
}

#[test]
fn current_price_accepts_numeric_strings_and_rejects_na() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/real-time/STR");
        then.status(200).json_body(json!({"close": "101.5"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/real-time/HALT");
        then.status(200).json_body(json!({"close": "NA"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/real-time/NOCLOSE");
        then.status(200).json_body(json!({"code": "NOCLOSE"}));
    });
    let (_d, client) = client(&server);
    assert!((client.current_price("STR").unwrap() - 101.5).abs() < 1e-9);
    assert!(matches!(client.current_price("HALT"), Err(EodhdError::Data(_))));
    assert!(matches!(client.current_price("NOCLOSE"), Err(EodhdError::Data(_))));
}

#[test]
fn empty_ticker_is_rejected_before_any_request() {
    // No mocks are registered: a request that slipped through would come back 404.
    let server = MockServer::start();
    let (_d, client) = client(&server);
    assert!(matches!(client.current_price(" "), Err(EodhdError::InvalidArg(_))));
    assert!(matches!(client.option_chain(""), Err(EodhdError::InvalidArg(_))));
    assert!(matches!(
        client.contract_details("", "2024-03-15", 1.0, OptionType::Put),
        Err(EodhdError::InvalidArg(_))
    ));
}

#[test]
fn slow_server_hits_the_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EOD_PATH);
        then.status(200)
            .delay(Duration::from_millis(1500))
            .json_body(json!({"data": []}));
    });
    let (_dir, store) = temp_store();
    let client = EodhdOptions::builder()
        .api_key(KEY)
        .credential_store(store)
        .options_url(server.url(EOD_PATH))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let err = client.options(&OptionsQuery::new("AAPL").unwrap()).unwrap_err();
    assert!(matches!(err, EodhdError::Transport(_)), "{err:?}");
}
