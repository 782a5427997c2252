//! eodhd-mock
//!
//! In-memory [`EodhdTransport`] implementations for tests and CI-safe demos.
//!
//! - [`MockTransport`] serves deterministic fixtures for every endpoint.
//! - [`ScriptedTransport`] replays pages and responses set up by a test.
//!
//! Both record every request they receive.

use std::sync::{Mutex, PoisonError};

use eodhd_core::query::params;
use eodhd_core::{Endpoint, EodhdError, EodhdTransport, GetRequest, PAGE_SIZE};
use serde_json::Value;

mod dynamic;
mod fixtures;

pub use dynamic::{MockBehavior, ScriptedTransport};

/// `n` listing items for `underlying` starting at index `start`, wrapped in the
/// API's `data`/`attributes` envelope.
#[must_use]
pub fn options_page(underlying: &str, start: usize, n: usize) -> Value {
    fixtures::options::page(underlying, start, n)
}

/// Mock transport for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Listing sizes: `AAPL` 2 345, `MSFT` 640, `SPY` 12 500 (beyond the offset
/// ceiling), anything else empty. The ticker `FAIL` answers HTTP 500, and a
/// missing `api_token` answers HTTP 401.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<GetRequest>>,
}

impl MockTransport {
    /// Fresh transport with an empty request log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<GetRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn maybe_fail(symbol: &str, endpoint: Endpoint) -> Result<(), EodhdError> {
        if symbol == "FAIL" {
            return Err(EodhdError::http(
                500,
                format!("forced failure: {}", endpoint.label()),
            ));
        }
        Ok(())
    }

    fn not_found(what: &str) -> EodhdError {
        EodhdError::http(404, format!("{what} not found"))
    }
}

fn num_param(req: &GetRequest, name: &str, default: usize) -> usize {
    req.param(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl EodhdTransport for MockTransport {
    fn get_json(&self, req: &GetRequest) -> Result<Value, EodhdError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req.clone());

        if req.param(params::API_TOKEN).is_none_or(str::is_empty) {
            return Err(EodhdError::http(401, "Unauthenticated"));
        }

        match req.endpoint {
            Endpoint::OptionsEod => {
                let underlying = req.param(params::UNDERLYING).unwrap_or_default();
                Self::maybe_fail(underlying, req.endpoint)?;
                let offset = num_param(req, params::PAGE_OFFSET, 0);
                let limit = num_param(req, params::PAGE_LIMIT, PAGE_SIZE as usize);
                Ok(fixtures::options::listing_page(underlying, offset, limit))
            }
            Endpoint::Chain => {
                let symbol = req.param("symbol").unwrap_or_default();
                Self::maybe_fail(symbol, req.endpoint)?;
                fixtures::options::chain(symbol)
                    .ok_or_else(|| Self::not_found(&format!("chain for {symbol}")))
            }
            Endpoint::Details => {
                let symbol = req.param("symbol").unwrap_or_default();
                Self::maybe_fail(symbol, req.endpoint)?;
                Ok(fixtures::options::details(
                    symbol,
                    req.param("expiration").unwrap_or_default(),
                    req.param("strike").unwrap_or_default(),
                    req.param("type").unwrap_or_default(),
                ))
            }
            Endpoint::RealTime => {
                let ticker = req.url.rsplit('/').next().unwrap_or_default();
                Self::maybe_fail(ticker, req.endpoint)?;
                fixtures::quotes::realtime(ticker)
                    .ok_or_else(|| Self::not_found(&format!("ticker {ticker}")))
            }
        }
    }
}
