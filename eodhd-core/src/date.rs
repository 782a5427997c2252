//! Normalization of date-like inputs to the `YYYY-MM-DD` form the API expects.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::EodhdError;

/// Calendar-date formats tried in order for string inputs.
///
/// `%B`/`%A` parse both full and abbreviated names, case-insensitively.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
    "%A, %d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Conversion of date-like values into the calendar date used for expiration filters.
///
/// Implemented for chrono dates and datetimes (which keep their own calendar
/// day) and for strings in ISO, slash-separated, compact, and human-readable
/// month-name forms.
pub trait IntoExpirationDate {
    /// Resolve to a calendar date.
    ///
    /// # Errors
    /// Returns `InvalidArg` when a string cannot be interpreted as a date.
    fn into_expiration_date(self) -> Result<NaiveDate, EodhdError>;
}

impl IntoExpirationDate for NaiveDate {
    fn into_expiration_date(self) -> Result<NaiveDate, EodhdError> {
        Ok(self)
    }
}

impl IntoExpirationDate for NaiveDateTime {
    fn into_expiration_date(self) -> Result<NaiveDate, EodhdError> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> IntoExpirationDate for DateTime<Tz> {
    fn into_expiration_date(self) -> Result<NaiveDate, EodhdError> {
        Ok(self.date_naive())
    }
}

impl IntoExpirationDate for &str {
    fn into_expiration_date(self) -> Result<NaiveDate, EodhdError> {
        parse_date(self)
    }
}

impl IntoExpirationDate for String {
    fn into_expiration_date(self) -> Result<NaiveDate, EodhdError> {
        parse_date(&self)
    }
}

impl IntoExpirationDate for &String {
    fn into_expiration_date(self) -> Result<NaiveDate, EodhdError> {
        parse_date(self)
    }
}

/// Parse a free-form date string.
///
/// # Errors
/// Returns `InvalidArg` if none of the supported layouts match.
pub fn parse_date(input: &str) -> Result<NaiveDate, EodhdError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(EodhdError::invalid_arg("date string is empty"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    // YYYYMMDD; %Y is greedy so this layout is split by hand.
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let (y, rest) = s.split_at(4);
        let (m, d) = rest.split_at(2);
        let ymd = (y.parse::<i32>(), m.parse::<u32>(), d.parse::<u32>());
        if let (Ok(y), Ok(m), Ok(d)) = ymd {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Ok(date);
            }
        }
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Ok(date);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| EodhdError::invalid_arg(format!("unrecognized date: {input:?}")))
}

/// Render a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_digits_are_validated() {
        assert_eq!(
            parse_date("20240315").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(parse_date("20241345").is_err());
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(parse_date("   "), Err(EodhdError::InvalidArg(_))));
    }
}
