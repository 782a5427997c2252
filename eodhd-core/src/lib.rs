//! eodhd-core
//!
//! Types and helpers shared by the EODHD options client.
//!
//! - `error`: the workspace error type.
//! - `config`: endpoint URLs and timeouts.
//! - `query`: the validated options filter and its query-parameter encoding.
//! - `date`: normalization of date-like inputs to `YYYY-MM-DD`.
//! - `record`: flat option records and the per-endpoint flattening strategies.
//! - `transport`: the blocking HTTP seam implemented by real and mock transports.
#![warn(missing_docs)]

mod error;

/// Client configuration.
pub mod config;
/// Date normalization.
pub mod date;
/// Options filters and query parameters.
pub mod query;
/// Records and flattening.
pub mod record;
/// HTTP transport seam.
pub mod transport;

/// Polars conversion (requires the `dataframe` feature).
#[cfg(feature = "dataframe")]
pub mod dataframe;

pub use config::ClientConfig;
pub use date::{IntoExpirationDate, format_date, parse_date};
pub use error::EodhdError;
pub use query::{MAX_OFFSET, OptionType, OptionsQuery, OptionsQueryBuilder, PAGE_SIZE};
pub use record::{Flattening, OptionRecord, RecordSet, value_as_f64};
pub use transport::{Endpoint, EodhdTransport, GetRequest};

#[cfg(feature = "dataframe")]
pub use dataframe::ToDataFrame;
