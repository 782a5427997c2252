//! eodhd-options
//!
//! Blocking client for the EODHD options API. Resolves an API key (explicit or
//! from the per-user [`CredentialStore`]), pages through the options listing up
//! to the API's offset ceiling, and returns flattened [`RecordSet`]s. Also
//! exposes the option chain, single-contract details, and the underlying's
//! real-time price.
//!
//! ```rust,ignore
//! use eodhd_options::{EodhdOptions, OptionType, OptionsQuery};
//!
//! let client = EodhdOptions::new(Some("your-api-key"))?;
//! let query = OptionsQuery::builder("AAPL")
//!     .expires_from("2025-01-01")
//!     .option_type(OptionType::Call)
//!     .limit(500)
//!     .build()?;
//! let rows = client.options(&query)?;
//! println!("{} contracts", rows.len());
//! ```
#![warn(missing_docs)]

/// Production HTTP transport backed by `reqwest`.
pub mod adapter;
mod builder;
/// Per-user API key storage.
pub mod credentials;
mod paginate;

use std::fmt;
use std::sync::Arc;

use eodhd_core::query::{format_strike, params};
use serde_json::Value;
use url::Url;

pub use adapter::RealAdapter;
pub use builder::EodhdOptionsBuilder;
pub use credentials::CredentialStore;
pub use eodhd_core::{
    ClientConfig, Endpoint, EodhdError, EodhdTransport, Flattening, GetRequest,
    IntoExpirationDate, MAX_OFFSET, OptionRecord, OptionType, OptionsQuery, OptionsQueryBuilder,
    PAGE_SIZE, RecordSet,
};
#[cfg(feature = "dataframe")]
pub use eodhd_core::ToDataFrame;
pub use paginate::FetchProgress;

/// Resolved endpoint URLs.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    options: Url,
    chain: Url,
    details: Url,
    realtime: Url,
}

impl Endpoints {
    pub(crate) fn from_config(cfg: &ClientConfig) -> Result<Self, EodhdError> {
        let parse = |label: &str, s: &str| {
            Url::parse(s).map_err(|e| EodhdError::config(format!("invalid {label} url {s:?}: {e}")))
        };
        let options = parse("options", &cfg.options_url)?;
        // Sibling endpoints replace the last path segment: .../options/eod -> .../options/chain
        let join = |seg: &str| {
            options
                .join(seg)
                .map_err(|e| EodhdError::config(format!("cannot derive {seg} url: {e}")))
        };
        let chain = join("chain")?;
        let details = join("details")?;
        let realtime = parse("realtime", &cfg.realtime_url)?;
        if realtime.cannot_be_a_base() {
            return Err(EodhdError::config(format!(
                "realtime url {:?} cannot take a path",
                cfg.realtime_url
            )));
        }
        Ok(Self {
            options,
            chain,
            details,
            realtime,
        })
    }

    fn url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::OptionsEod => &self.options,
            Endpoint::Chain => &self.chain,
            Endpoint::Details => &self.details,
            Endpoint::RealTime => &self.realtime,
        }
    }
}

/// Client for the EODHD options API.
///
/// Cheap to share by reference; every call is a blocking round-trip (or a
/// sequence of them for [`options`](Self::options)).
pub struct EodhdOptions {
    api_key: String,
    endpoints: Endpoints,
    transport: Arc<dyn EodhdTransport>,
}

impl fmt::Debug for EodhdOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EodhdOptions")
            .field("api_key", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

fn require_ticker(ticker: &str) -> Result<&str, EodhdError> {
    let t = ticker.trim();
    if t.is_empty() {
        return Err(EodhdError::invalid_arg("ticker must not be empty"));
    }
    Ok(t)
}

impl EodhdOptions {
    /// Build a client with the default credential store and configuration.
    ///
    /// A non-empty `api_key` is used and saved for later runs; otherwise the
    /// stored key is loaded.
    ///
    /// # Errors
    /// `Config` if no key is given and none is stored; `Io` if the key cannot
    /// be saved; `Transport` if the HTTP client cannot be built.
    pub fn new(api_key: Option<&str>) -> Result<Self, EodhdError> {
        let mut b = Self::builder();
        if let Some(k) = api_key {
            b = b.api_key(k);
        }
        b.build()
    }

    /// Start a builder for custom stores, endpoints, timeouts, or transports.
    #[must_use]
    pub fn builder() -> EodhdOptionsBuilder {
        EodhdOptionsBuilder::new()
    }

    /// Save `api_key` to the default credential store for future clients.
    ///
    /// # Errors
    /// See [`CredentialStore::open_default`] and [`CredentialStore::save`].
    pub fn save_api_key(api_key: &str) -> Result<(), EodhdError> {
        CredentialStore::open_default()?.save(api_key)
    }

    /// Save `api_key` to `store`.
    ///
    /// # Errors
    /// See [`CredentialStore::save`].
    pub fn save_api_key_to(store: &CredentialStore, api_key: &str) -> Result<(), EodhdError> {
        store.save(api_key)
    }

    pub(crate) fn from_parts(
        api_key: String,
        endpoints: Endpoints,
        transport: Arc<dyn EodhdTransport>,
    ) -> Self {
        Self {
            api_key,
            endpoints,
            transport,
        }
    }

    fn get(
        &self,
        endpoint: Endpoint,
        url: Url,
        mut params: Vec<(String, String)>,
    ) -> Result<Value, EodhdError> {
        params.push((params::API_TOKEN.to_string(), self.api_key.clone()));
        let req = GetRequest {
            endpoint,
            url: url.into(),
            params,
        };
        self.transport.get_json(&req)
    }

    /// Fetch every option record matching `query`, in server order.
    ///
    /// Pages of [`PAGE_SIZE`] are requested until the listing is exhausted,
    /// the query limit is reached, or the offset passes [`MAX_OFFSET`]. A page
    /// without a `data` array ends the fetch with whatever was collected.
    ///
    /// # Errors
    /// `Http` or `Transport` if any page request fails.
    pub fn options(&self, query: &OptionsQuery) -> Result<RecordSet, EodhdError> {
        self.options_with_progress(query, |_| {})
    }

    /// Like [`options`](Self::options), calling `on_page` after each page.
    ///
    /// # Errors
    /// `Http` or `Transport` if any page request fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "eodhd_options::client",
            skip(self, query, on_page),
            fields(ticker = %query.ticker(), limit = ?query.limit()),
        )
    )]
    pub fn options_with_progress<F>(
        &self,
        query: &OptionsQuery,
        on_page: F,
    ) -> Result<RecordSet, EodhdError>
    where
        F: FnMut(FetchProgress),
    {
        let url = self.endpoints.url(Endpoint::OptionsEod);
        paginate::paginate(
            query,
            |offset| self.get(Endpoint::OptionsEod, url.clone(), query.page_params(offset)),
            on_page,
        )
    }

    /// Fetch the current option chain for `ticker`.
    ///
    /// The payload's `data` field (or the whole payload when absent) is
    /// returned as-is, one row per element.
    ///
    /// # Errors
    /// `InvalidArg` for an empty ticker; `Http` or `Transport` on request failure.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "eodhd_options::client", skip(self))
    )]
    pub fn option_chain(&self, ticker: &str) -> Result<RecordSet, EodhdError> {
        let ticker = require_ticker(ticker)?;
        let payload = self.get(
            Endpoint::Chain,
            self.endpoints.url(Endpoint::Chain).clone(),
            vec![("symbol".to_string(), ticker.to_string())],
        )?;
        Ok(Flattening::PassThrough
            .apply(payload)
            .map(RecordSet::from)
            .unwrap_or_default())
    }

    /// Fetch details for one contract, returned verbatim.
    ///
    /// The option type is sent upper-case (`CALL`/`PUT`) on this endpoint.
    ///
    /// # Errors
    /// `InvalidArg` for an empty ticker, unparseable expiration, or a negative
    /// or non-finite strike; `Http` or `Transport` on request failure.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "eodhd_options::client", skip(self, expiration))
    )]
    pub fn contract_details(
        &self,
        ticker: &str,
        expiration: impl IntoExpirationDate,
        strike: f64,
        option_type: OptionType,
    ) -> Result<Value, EodhdError> {
        let ticker = require_ticker(ticker)?;
        let expiration = expiration.into_expiration_date()?;
        if !strike.is_finite() || strike < 0.0 {
            return Err(EodhdError::invalid_arg(format!(
                "strike must be a finite, non-negative number, got {strike}"
            )));
        }
        self.get(
            Endpoint::Details,
            self.endpoints.url(Endpoint::Details).clone(),
            vec![
                ("symbol".to_string(), ticker.to_string()),
                (
                    "expiration".to_string(),
                    eodhd_core::format_date(expiration),
                ),
                ("strike".to_string(), format_strike(strike)),
                ("type".to_string(), option_type.as_contract().to_string()),
            ],
        )
    }

    /// Latest close of the underlying from the real-time endpoint.
    ///
    /// # Errors
    /// `InvalidArg` for an empty ticker; `Http` or `Transport` on request
    /// failure; `Data` if `close` is missing or not numeric.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "eodhd_options::client", skip(self))
    )]
    pub fn current_price(&self, ticker: &str) -> Result<f64, EodhdError> {
        let ticker = require_ticker(ticker)?;
        let mut url = self.endpoints.url(Endpoint::RealTime).clone();
        url.path_segments_mut()
            .map_err(|()| EodhdError::config("realtime url cannot take a path"))?
            .pop_if_empty()
            .push(ticker);
        let payload = self.get(
            Endpoint::RealTime,
            url,
            vec![("fmt".to_string(), "json".to_string())],
        )?;
        payload
            .get("close")
            .and_then(eodhd_core::value_as_f64)
            .ok_or_else(|| {
                EodhdError::data(format!(
                    "real-time quote for {ticker} has no numeric close: {}",
                    payload.get("close").map_or_else(|| "missing".to_string(), Value::to_string)
                ))
            })
    }
}
