//! The HTTP seam between the client and the network.

use serde_json::Value;

use crate::EodhdError;

/// Logical endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Paginated options listing (EOD data).
    OptionsEod,
    /// Option chain snapshot for a symbol.
    Chain,
    /// Details for a single contract.
    Details,
    /// Real-time quote for an underlying.
    RealTime,
}

impl Endpoint {
    /// Short label used in logs and errors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OptionsEod => "options/eod",
            Self::Chain => "options/chain",
            Self::Details => "options/details",
            Self::RealTime => "real-time",
        }
    }
}

/// A single authenticated GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// Endpoint this request belongs to.
    pub endpoint: Endpoint,
    /// Absolute URL.
    pub url: String,
    /// Query parameters in insertion order, including `api_token`.
    pub params: Vec<(String, String)>,
}

impl GetRequest {
    /// Look up the first value for a query parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport abstraction (so we can inject mocks in tests).
///
/// Implementations perform one blocking GET and decode the body as JSON.
pub trait EodhdTransport: Send + Sync {
    /// Execute the request.
    ///
    /// # Errors
    /// `Http` for non-success statuses, `Transport` for network or decoding
    /// failures.
    fn get_json(&self, req: &GetRequest) -> Result<Value, EodhdError>;
}
