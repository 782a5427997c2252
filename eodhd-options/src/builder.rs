use std::sync::Arc;
use std::time::Duration;

use eodhd_core::{ClientConfig, EodhdError, EodhdTransport};

use crate::{CredentialStore, EodhdOptions, Endpoints, RealAdapter};

/// Builder for [`EodhdOptions`].
///
/// Defaults: the platform credential store, the public EODHD endpoints, a 30s
/// request timeout, and a `reqwest` transport.
#[derive(Default)]
pub struct EodhdOptionsBuilder {
    api_key: Option<String>,
    store: Option<CredentialStore>,
    config: ClientConfig,
    transport: Option<Arc<dyn EodhdTransport>>,
}

impl EodhdOptionsBuilder {
    /// Returns a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this key and save it to the credential store on `build`.
    ///
    /// An empty key is ignored and the stored key is used instead.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Read and write the key through `store` instead of the platform default.
    #[must_use]
    pub fn credential_store(mut self, store: CredentialStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the whole endpoint/timeout configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Per-request timeout for the default transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Override the options EOD endpoint (chain/details are derived from it).
    #[must_use]
    pub fn options_url(mut self, url: impl Into<String>) -> Self {
        self.config.options_url = url.into();
        self
    }

    /// Override the real-time price endpoint.
    #[must_use]
    pub fn realtime_url(mut self, url: impl Into<String>) -> Self {
        self.config.realtime_url = url.into();
        self
    }

    /// Expert-only: route requests through a custom transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn EodhdTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Resolve the API key and build the client.
    ///
    /// # Errors
    /// `Config` if no key is available or an endpoint URL is invalid; `Io` if
    /// the store cannot be opened or the explicit key cannot be saved;
    /// `Transport` if the default HTTP client cannot be built.
    pub fn build(self) -> Result<EodhdOptions, EodhdError> {
        let store = match self.store {
            Some(s) => s,
            None => CredentialStore::open_default()?,
        };
        let api_key = resolve_api_key(self.api_key, &store)?;
        let endpoints = Endpoints::from_config(&self.config)?;
        let transport: Arc<dyn EodhdTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(RealAdapter::new(self.config.timeout)?),
        };
        Ok(EodhdOptions::from_parts(api_key, endpoints, transport))
    }
}

fn resolve_api_key(explicit: Option<String>, store: &CredentialStore) -> Result<String, EodhdError> {
    match explicit.filter(|k| !k.is_empty()) {
        Some(key) => {
            store.save(&key)?;
            Ok(key)
        }
        None => store.load().ok_or_else(EodhdError::missing_api_key),
    }
}
