use std::time::Duration;

use eodhd_core::{EodhdError, EodhdTransport, GetRequest};
use serde_json::Value;

/// Production transport backed by a blocking `reqwest` client.
///
/// One client is kept for the lifetime of the adapter so connections are reused
/// across pages.
#[derive(Debug, Clone)]
pub struct RealAdapter {
    http: reqwest::blocking::Client,
}

impl RealAdapter {
    /// Build with a fresh HTTP client using `timeout` for every request.
    ///
    /// # Errors
    /// Returns `Transport` if the HTTP client cannot be constructed (e.g. TLS
    /// backend initialization failure).
    pub fn new(timeout: Duration) -> Result<Self, EodhdError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("eodhd-options/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EodhdError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wrap an existing blocking client.
    #[must_use]
    pub const fn with_client(http: reqwest::blocking::Client) -> Self {
        Self { http }
    }
}

impl EodhdTransport for RealAdapter {
    fn get_json(&self, req: &GetRequest) -> Result<Value, EodhdError> {
        let resp = self
            .http
            .get(&req.url)
            .query(&req.params)
            .send()
            .map_err(|e| EodhdError::Transport(strip_url(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "eodhd_options::http",
                endpoint = req.endpoint.label(),
                status = status.as_u16(),
                "request failed"
            );
            return Err(EodhdError::http(status.as_u16(), body));
        }

        resp.json::<Value>()
            .map_err(|e| EodhdError::Transport(strip_url(&e)))
    }
}

// reqwest includes the full URL in its messages, which carries `api_token`.
fn strip_url(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(url) = e.url() {
        msg = msg.replace(url.as_str(), url.path());
    }
    msg
}
