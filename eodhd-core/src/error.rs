use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the eodhd workspace.
///
/// Covers credential resolution, argument validation, HTTP status failures,
/// transport failures, malformed payloads, and config file I/O.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EodhdError {
    /// No usable configuration (e.g. no API key could be resolved).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The server answered with a non-success status.
    #[error("http status {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the server (may be empty).
        body: String,
    },

    /// Connection, timeout, or body decoding failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Reading or writing the config directory/file failed.
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Remediation text for a client constructed without any resolvable key.
pub(crate) const MISSING_KEY_HINT: &str = "no API key provided and none found in config; \
     pass an API key explicitly or save one first with `EodhdOptions::save_api_key()`";

impl EodhdError {
    /// Helper: build a `Config` error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Helper: the `Config` error raised when no API key is available.
    #[must_use]
    pub fn missing_api_key() -> Self {
        Self::Config(MISSING_KEY_HINT.to_string())
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Helper: build an `Http` error from a status and body.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Helper: wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the HTTP status if this is an `Http` error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for 4xx responses, which usually point at a bad token or
    /// malformed filter rather than a server fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }
}
