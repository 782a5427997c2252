//! Client configuration shared by the transport and the client builder.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default options EOD endpoint.
pub const DEFAULT_OPTIONS_URL: &str = "https://eodhd.com/api/mp/unicornbay/options/eod";

/// Default real-time price endpoint; the ticker is appended as a path segment.
pub const DEFAULT_REALTIME_URL: &str = "https://eodhd.com/api/real-time";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint and transport settings for an `EodhdOptions` client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Options EOD endpoint. The chain and details endpoints are derived from it
    /// by replacing the last path segment.
    pub options_url: String,
    /// Real-time price endpoint (the ticker is appended as a path segment).
    pub realtime_url: String,
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            options_url: DEFAULT_OPTIONS_URL.to_string(),
            realtime_url: DEFAULT_REALTIME_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
