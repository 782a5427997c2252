//! Typed filters for the options endpoints and their query-parameter encoding.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{IntoExpirationDate, format_date};
use crate::EodhdError;

/// Fixed number of records requested per page.
pub const PAGE_SIZE: u32 = 1000;

/// Largest `page[offset]` the API will serve.
pub const MAX_OFFSET: u32 = 10_000;

/// Default sort field for option listings.
pub const DEFAULT_SORT: &str = "exp_date";

/// Query parameter names used by the options EOD endpoint.
pub mod params {
    /// Underlying ticker filter.
    pub const UNDERLYING: &str = "filter[underlying_symbol]";
    /// Expiration lower bound (inclusive).
    pub const EXP_DATE_FROM: &str = "filter[exp_date_from]";
    /// Expiration upper bound (inclusive).
    pub const EXP_DATE_TO: &str = "filter[exp_date_to]";
    /// Strike lower bound.
    pub const STRIKE_FROM: &str = "filter[strike_from]";
    /// Strike upper bound.
    pub const STRIKE_TO: &str = "filter[strike_to]";
    /// Contract type filter.
    pub const TYPE: &str = "filter[type]";
    /// Sort field.
    pub const SORT: &str = "sort";
    /// Page size.
    pub const PAGE_LIMIT: &str = "page[limit]";
    /// Page offset.
    pub const PAGE_OFFSET: &str = "page[offset]";
    /// Authentication token, added to every request.
    pub const API_TOKEN: &str = "api_token";
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call contract.
    Call,
    /// Put contract.
    Put,
}

impl OptionType {
    /// Lower-case form used by the options listing filter (`call`/`put`).
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }

    /// Upper-case form used by the contract details endpoint (`CALL`/`PUT`).
    #[must_use]
    pub const fn as_contract(self) -> &'static str {
        match self {
            Self::Call => "CALL",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

impl FromStr for OptionType {
    type Err = EodhdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            other => Err(EodhdError::invalid_arg(format!(
                "option type must be 'call' or 'put', got {other:?}"
            ))),
        }
    }
}

/// Render a strike the way the API accepts it (`150`, `152.5`).
#[must_use]
pub fn format_strike(strike: f64) -> String {
    format!("{strike}")
}

fn validate_strike(label: &str, strike: f64) -> Result<f64, EodhdError> {
    if !strike.is_finite() || strike < 0.0 {
        return Err(EodhdError::invalid_arg(format!(
            "{label} must be a finite, non-negative number, got {strike}"
        )));
    }
    Ok(strike)
}

/// Validated filter for the paginated options listing.
///
/// Every optional field tracks whether it was provided, so boundary values
/// such as a strike of `0.0` are still sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsQuery {
    ticker: String,
    expires_from: Option<NaiveDate>,
    expires_to: Option<NaiveDate>,
    strike_from: Option<f64>,
    strike_to: Option<f64>,
    option_type: Option<OptionType>,
    sort: String,
    limit: Option<usize>,
}

impl OptionsQuery {
    /// Start building a query for an underlying ticker.
    pub fn builder(ticker: impl Into<String>) -> OptionsQueryBuilder {
        OptionsQueryBuilder::new(ticker)
    }

    /// Shorthand for a query with only the ticker set.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the ticker is empty.
    pub fn new(ticker: impl Into<String>) -> Result<Self, EodhdError> {
        Self::builder(ticker).build()
    }

    /// Underlying ticker.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Inclusive lower bound on expiration.
    #[must_use]
    pub const fn expires_from(&self) -> Option<NaiveDate> {
        self.expires_from
    }

    /// Inclusive upper bound on expiration.
    #[must_use]
    pub const fn expires_to(&self) -> Option<NaiveDate> {
        self.expires_to
    }

    /// Lower strike bound.
    #[must_use]
    pub const fn strike_from(&self) -> Option<f64> {
        self.strike_from
    }

    /// Upper strike bound.
    #[must_use]
    pub const fn strike_to(&self) -> Option<f64> {
        self.strike_to
    }

    /// Contract type filter.
    #[must_use]
    pub const fn option_type(&self) -> Option<OptionType> {
        self.option_type
    }

    /// Server-side sort field.
    #[must_use]
    pub fn sort(&self) -> &str {
        &self.sort
    }

    /// Maximum number of records to return overall.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Filter parameters shared by every page, without `page[offset]` or `api_token`.
    #[must_use]
    pub fn base_params(&self) -> Vec<(String, String)> {
        let mut out = vec![
            (params::UNDERLYING.to_string(), self.ticker.clone()),
            (params::SORT.to_string(), self.sort.clone()),
            (params::PAGE_LIMIT.to_string(), PAGE_SIZE.to_string()),
        ];
        if let Some(d) = self.expires_from {
            out.push((params::EXP_DATE_FROM.to_string(), format_date(d)));
        }
        if let Some(d) = self.expires_to {
            out.push((params::EXP_DATE_TO.to_string(), format_date(d)));
        }
        if let Some(s) = self.strike_from {
            out.push((params::STRIKE_FROM.to_string(), format_strike(s)));
        }
        if let Some(s) = self.strike_to {
            out.push((params::STRIKE_TO.to_string(), format_strike(s)));
        }
        if let Some(t) = self.option_type {
            out.push((params::TYPE.to_string(), t.as_filter().to_string()));
        }
        out
    }

    /// Parameters for the page starting at `offset`.
    #[must_use]
    pub fn page_params(&self, offset: u32) -> Vec<(String, String)> {
        let mut out = self.base_params();
        out.push((params::PAGE_OFFSET.to_string(), offset.to_string()));
        out
    }
}

/// Builder for [`OptionsQuery`].
///
/// Date setters accept anything implementing [`IntoExpirationDate`]; parse
/// failures are held until [`build`](Self::build) so calls can be chained.
#[derive(Debug)]
pub struct OptionsQueryBuilder {
    ticker: String,
    expires_from: Option<Result<NaiveDate, EodhdError>>,
    expires_to: Option<Result<NaiveDate, EodhdError>>,
    strike_from: Option<f64>,
    strike_to: Option<f64>,
    option_type: Option<OptionType>,
    sort: String,
    limit: Option<usize>,
}

impl OptionsQueryBuilder {
    fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            expires_from: None,
            expires_to: None,
            strike_from: None,
            strike_to: None,
            option_type: None,
            sort: DEFAULT_SORT.to_string(),
            limit: None,
        }
    }

    /// Only contracts expiring on or after this date.
    #[must_use]
    pub fn expires_from(mut self, date: impl IntoExpirationDate) -> Self {
        self.expires_from = Some(date.into_expiration_date());
        self
    }

    /// Only contracts expiring on or before this date.
    #[must_use]
    pub fn expires_to(mut self, date: impl IntoExpirationDate) -> Self {
        self.expires_to = Some(date.into_expiration_date());
        self
    }

    /// Minimum strike price.
    #[must_use]
    pub const fn strike_from(mut self, strike: f64) -> Self {
        self.strike_from = Some(strike);
        self
    }

    /// Maximum strike price.
    #[must_use]
    pub const fn strike_to(mut self, strike: f64) -> Self {
        self.strike_to = Some(strike);
        self
    }

    /// Restrict to calls or puts.
    #[must_use]
    pub const fn option_type(mut self, kind: OptionType) -> Self {
        self.option_type = Some(kind);
        self
    }

    /// Server-side sort field (defaults to `exp_date`).
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = field.into();
        self
    }

    /// Cap the total number of records returned.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Validate and build the query.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty ticker or sort field, an unparseable
    /// date, a negative or non-finite strike, inverted date or strike bounds,
    /// or a zero limit.
    pub fn build(self) -> Result<OptionsQuery, EodhdError> {
        let ticker = self.ticker.trim().to_string();
        if ticker.is_empty() {
            return Err(EodhdError::invalid_arg("ticker must not be empty"));
        }
        let sort = self.sort.trim().to_string();
        if sort.is_empty() {
            return Err(EodhdError::invalid_arg("sort field must not be empty"));
        }

        let expires_from = self.expires_from.transpose()?;
        let expires_to = self.expires_to.transpose()?;
        if let (Some(from), Some(to)) = (expires_from, expires_to) {
            if from > to {
                return Err(EodhdError::invalid_arg(format!(
                    "expiration range is inverted: {} > {}",
                    format_date(from),
                    format_date(to)
                )));
            }
        }

        let strike_from = self
            .strike_from
            .map(|s| validate_strike("strike_from", s))
            .transpose()?;
        let strike_to = self
            .strike_to
            .map(|s| validate_strike("strike_to", s))
            .transpose()?;
        if let (Some(lo), Some(hi)) = (strike_from, strike_to) {
            if lo > hi {
                return Err(EodhdError::invalid_arg(format!(
                    "strike range is inverted: {lo} > {hi}"
                )));
            }
        }

        if self.limit == Some(0) {
            return Err(EodhdError::invalid_arg("limit must be greater than zero"));
        }

        Ok(OptionsQuery {
            ticker,
            expires_from,
            expires_to,
            strike_from,
            strike_to,
            option_type: self.option_type,
            sort,
            limit: self.limit,
        })
    }
}
