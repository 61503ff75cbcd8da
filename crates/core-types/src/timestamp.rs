//! Parsing of the naive timestamps used throughout the feeds (`2017-10-02 10:56:33`).

use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses a feed timestamp. A bare date is taken as midnight.
pub fn parse(raw: &str) -> Result<NaiveDateTime, CoreError> {
    let value = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CoreError::InvalidInput("timestamp".to_string(), raw.to_string()))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

/// Empty cells become `None`; anything else must parse.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_feed_formats() {
        let ts = parse("2017-10-02 10:56:33").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2017, 10, 2));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (10, 56, 33));

        let midnight = parse("2018-01-15").unwrap();
        assert_eq!(midnight.hour(), 0);

        assert!(parse("2018-13-01 00:00:00").is_err());
        assert!(parse("yesterday").is_err());
    }
}
