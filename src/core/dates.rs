//! Birth date parsing and age derivation
//!
//! Dates are stored as ISO 8601 text (`YYYY-MM-DD`). Two parsing strategies
//! exist so their cost can be compared: the general chrono format parser and
//! a fixed-format splitter that reads the three integers directly.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::core::errors::ValidationError;

/// Format used for birth dates on disk and on the command line
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// How a stored birth date string is turned into a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DateStrategy {
    /// `NaiveDate::parse_from_str` with [`ISO_DATE_FORMAT`]
    Parser,
    /// Split on `-` and parse year, month and day as integers
    FastSplit,
}

impl DateStrategy {
    pub const ALL: [DateStrategy; 2] = [DateStrategy::Parser, DateStrategy::FastSplit];

    /// Parse `text` into a calendar date using this strategy
    pub fn parse(self, text: &str) -> Result<NaiveDate, ValidationError> {
        match self {
            DateStrategy::Parser => parse_with_format(text),
            DateStrategy::FastSplit => parse_by_split(text),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DateStrategy::Parser => "parser",
            DateStrategy::FastSplit => "fast-split",
        }
    }
}

fn parse_with_format(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))
}

fn parse_by_split(text: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(text.to_string());

    let mut parts = text.split('-');
    let (year, month, day) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d), None) => (y, m, d),
        _ => return Err(invalid()),
    };

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Age in whole years on `today` for someone born on `birth`.
///
/// The year difference is reduced by one until the birthday (by month and
/// day) has been reached in the current year.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Render a date in the stored ISO form
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_strategies_agree_on_valid_dates() {
        for text in ["1990-05-15", "2000-02-29", "1956-12-31", "2008-01-01"] {
            let parsed = DateStrategy::Parser.parse(text).unwrap();
            let split = DateStrategy::FastSplit.parse(text).unwrap();
            assert_eq!(parsed, split, "strategies disagree on {}", text);
        }
    }

    #[test]
    fn test_strategies_reject_invalid_dates() {
        for text in ["1990-02-30", "2001-02-29", "1990-13-01", "not-a-date", "1990/05/15", ""] {
            for strategy in DateStrategy::ALL {
                assert_eq!(
                    strategy.parse(text),
                    Err(ValidationError::InvalidDate(text.to_string())),
                    "{} accepted {}",
                    strategy.name(),
                    text
                );
            }
        }
    }

    #[test]
    fn test_split_rejects_extra_components() {
        assert!(DateStrategy::FastSplit.parse("1990-05-15-01").is_err());
    }

    #[test]
    fn test_age_on_anniversary() {
        let today = date(2026, 10, 18);
        assert_eq!(age_on(date(1996, 10, 18), today), 30);
        assert_eq!(age_on(date(1996, 10, 19), today), 29);
        assert_eq!(age_on(date(1996, 10, 17), today), 30);
    }

    #[test]
    fn test_age_before_birthday_month() {
        let today = date(2026, 3, 1);
        assert_eq!(age_on(date(1990, 5, 15), today), 35);
        assert_eq!(age_on(date(1990, 1, 15), today), 36);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        let birth = date(2000, 2, 29);
        assert_eq!(age_on(birth, date(2025, 2, 28)), 24);
        assert_eq!(age_on(birth, date(2025, 3, 1)), 25);
        assert_eq!(age_on(birth, date(2028, 2, 29)), 28);
    }

    #[test]
    fn test_format_iso_pads_components() {
        assert_eq!(format_iso(date(1985, 1, 1)), "1985-01-01");
    }
}
