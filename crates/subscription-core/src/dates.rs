// ABOUTME: Month-year calendar value with MM-YYYY text form and timestamp conversion
// ABOUTME: Replaces zero-value date sentinels with Option<MonthYear> at every boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Month-Year Dates
//!
//! Subscriptions are tracked with month precision only. [`MonthYear`] is the
//! single representation used by the JSON layer (`"01-2024"`), the query
//! builder (ordering), and the storage layer (first instant of the month).
//!
//! "Not provided" is always `Option::None`; there is no reserved value.

use crate::constants::limits;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Reasons a `MM-YYYY` string is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthYearError {
    /// Input is not exactly `MM-YYYY`
    #[error("expected MM-YYYY, got '{0}'")]
    InvalidFormat(String),
    /// Month component outside 01-12
    #[error("month {0:02} is out of range 01-12")]
    MonthOutOfRange(u32),
    /// Timestamp could not be represented (year outside 0000-9999)
    #[error("year {0} is out of range 0000-9999")]
    YearOutOfRange(i32),
}

/// A calendar month: year plus month, no day or time of day
///
/// Ordering is chronological (year first, then month), so range checks are
/// plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    /// Build from components
    ///
    /// # Errors
    ///
    /// Returns an error if `month` is not 1-12 or `year` is not 0-9999
    pub fn new(year: i32, month: u32) -> Result<Self, MonthYearError> {
        if !(1..=12).contains(&month) {
            return Err(MonthYearError::MonthOutOfRange(month));
        }
        if !(limits::MIN_YEAR..=limits::MAX_YEAR).contains(&year) {
            return Err(MonthYearError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// Parse strict `MM-YYYY` text
    ///
    /// # Errors
    ///
    /// Returns [`MonthYearError`] for anything other than two digits, a dash,
    /// and four digits with the month in 01-12
    pub fn parse(text: &str) -> Result<Self, MonthYearError> {
        let bytes = text.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[2] == b'-'
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[3..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(MonthYearError::InvalidFormat(text.to_owned()));
        }

        let month = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
        let year = bytes[3..]
            .iter()
            .fold(0_i32, |acc, digit| acc * 10 + i32::from(digit - b'0'));

        Self::new(year, month)
    }

    /// Calendar year
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1-12
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month in UTC, used on write paths
    #[must_use]
    pub fn to_timestamp(&self) -> DateTime<Utc> {
        // Components were validated on construction, so the first day always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map_or(DateTime::<Utc>::MIN_UTC, |naive| {
                Utc.from_utc_datetime(&naive)
            })
    }

    /// Truncate a stored timestamp to its month, used on read paths
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp's year cannot be written as four digits
    pub fn from_timestamp(timestamp: DateTime<Utc>) -> Result<Self, MonthYearError> {
        Self::new(timestamp.year(), timestamp.month())
    }
}

impl Display for MonthYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl FromStr for MonthYear {
    type Err = MonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct MonthYearVisitor;

impl Visitor<'_> for MonthYearVisitor {
    type Value = MonthYear;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("a month-year string in MM-YYYY format")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        MonthYear::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(MonthYearVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_month_year() {
        let date = MonthYear::parse("07-2024").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 7);
        assert_eq!(date.to_string(), "07-2024");
    }

    #[test]
    fn test_parse_display_round_trip() {
        for text in ["01-0000", "01-2024", "09-1999", "12-9999"] {
            let parsed: MonthYear = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for text in [
            "", "1-2024", "001-2024", "01-24", "01/2024", "2024-01", "01-2024 ", " 01-2024",
            "ab-2024", "01-20x4", "+1-2024", "01-02024", "null",
        ] {
            assert!(
                matches!(MonthYear::parse(text), Err(MonthYearError::InvalidFormat(_))),
                "expected format error for {text:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_month_out_of_range() {
        assert_eq!(
            MonthYear::parse("00-2024"),
            Err(MonthYearError::MonthOutOfRange(0))
        );
        assert_eq!(
            MonthYear::parse("13-2024"),
            Err(MonthYearError::MonthOutOfRange(13))
        );
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec_2023 = MonthYear::parse("12-2023").unwrap();
        let jan_2024 = MonthYear::parse("01-2024").unwrap();
        let feb_2024 = MonthYear::parse("02-2024").unwrap();
        assert!(dec_2023 < jan_2024);
        assert!(jan_2024 < feb_2024);
    }

    #[test]
    fn test_timestamp_conversion_truncates_to_month() {
        let date = MonthYear::parse("03-2024").unwrap();
        let timestamp = date.to_timestamp();
        assert_eq!(timestamp.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let mid_month = Utc.with_ymd_and_hms(2024, 3, 17, 15, 42, 9).unwrap();
        assert_eq!(MonthYear::from_timestamp(mid_month).unwrap(), date);
    }

    #[test]
    fn test_json_serialization() {
        let date = MonthYear::new(2024, 1).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"01-2024\"");

        let parsed: MonthYear = serde_json::from_str("\"12-2024\"").unwrap();
        assert_eq!(parsed, MonthYear::new(2024, 12).unwrap());

        assert!(serde_json::from_str::<MonthYear>("\"2024-12\"").is_err());
        assert!(serde_json::from_str::<MonthYear>("122024").is_err());
    }

    #[test]
    fn test_null_is_distinct_from_any_date() {
        let absent: Option<MonthYear> = serde_json::from_str("null").unwrap();
        assert!(absent.is_none());

        let earliest: Option<MonthYear> = serde_json::from_str("\"01-0001\"").unwrap();
        assert_eq!(earliest, Some(MonthYear::new(1, 1).unwrap()));
    }
}
