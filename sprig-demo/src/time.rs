//! Conversions between local wall-clock times and Unix timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use sprig::CliError;
use std::str::FromStr;
use thiserror::Error;

/// Accepted time layouts, tried in order.
const TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Layout printed for converted timestamps.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Invalid time format: '{0}'")]
    InvalidTime(String),

    #[error("Invalid timestamp format: '{0}'")]
    InvalidTimestamp(String),

    #[error("Unsupported timestamp: '{0}' (expected 10 digits for seconds or 13 for milliseconds)")]
    UnsupportedTimestamp(String),

    #[error("Invalid timestamp unit '{0}', expected <s|ms>")]
    InvalidUnit(String),
}

impl From<TimeError> for CliError {
    fn from(e: TimeError) -> Self {
        CliError::user(e.to_string())
    }
}

/// Timestamp resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Seconds,
    Millis,
}

impl FromStr for Unit {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "s" => Ok(Unit::Seconds),
            "ms" => Ok(Unit::Millis),
            other => Err(TimeError::InvalidUnit(other.to_string())),
        }
    }
}

/// Parse a local wall-clock time. A bare date means midnight.
pub fn parse_local(input: &str) -> Result<NaiveDateTime, TimeError> {
    let input = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimeError::InvalidTime(input.to_string()))
}

/// Local time to Unix timestamp.
pub fn to_timestamp(input: &str, unit: Unit) -> Result<i64, TimeError> {
    let naive = parse_local(input)?;
    // Ambiguous times (DST fold) resolve to the earlier instant
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimeError::InvalidTime(input.trim().to_string()))?;

    Ok(match unit {
        Unit::Seconds => local.timestamp(),
        Unit::Millis => local.timestamp_millis(),
    })
}

/// Unix timestamp to local time; the unit follows the digit count.
pub fn from_timestamp(input: &str) -> Result<DateTime<Local>, TimeError> {
    let input = input.trim();
    let ts: i64 = input
        .parse()
        .map_err(|_| TimeError::InvalidTimestamp(input.to_string()))?;

    let unsupported = || TimeError::UnsupportedTimestamp(input.to_string());
    let utc = match ts.to_string().len() {
        10 => DateTime::from_timestamp(ts, 0),
        13 => DateTime::from_timestamp_millis(ts),
        _ => None,
    }
    .ok_or_else(unsupported)?;

    Ok(utc.with_timezone(&Local))
}

pub fn format_local(time: &DateTime<Local>) -> String {
    time.format(OUTPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_str() {
        assert_eq!("s".parse::<Unit>(), Ok(Unit::Seconds));
        assert_eq!("ms".parse::<Unit>(), Ok(Unit::Millis));
        assert_eq!(
            "min".parse::<Unit>(),
            Err(TimeError::InvalidUnit("min".to_string()))
        );
    }

    #[test]
    fn test_parse_accepted_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        for input in [
            "2024-01-02 03:04:05",
            "2024-01-02T03:04:05",
            "2024/01/02 03:04:05",
            " 2024-01-02 03:04:05 ",
        ] {
            assert_eq!(parse_local(input), Ok(expected), "{input}");
        }

        let minutes = parse_local("2024-01-02 03:04").unwrap();
        assert_eq!(minutes.format(OUTPUT_FORMAT).to_string(), "2024-01-02 03:04:00");

        let date = parse_local("2024-01-02").unwrap();
        assert_eq!(date.format(OUTPUT_FORMAT).to_string(), "2024-01-02 00:00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_local("yesterday"),
            Err(TimeError::InvalidTime("yesterday".to_string()))
        );
        assert!(parse_local("2024-13-01 00:00:00").is_err());
    }

    #[test]
    fn test_seconds_and_millis_agree() {
        let seconds = to_timestamp("2024-01-01 00:00:00", Unit::Seconds).unwrap();
        let millis = to_timestamp("2024-01-01 00:00:00", Unit::Millis).unwrap();
        assert_eq!(millis, seconds * 1000);
    }

    #[test]
    fn test_conversion_is_reversible() {
        let seconds = to_timestamp("2024-01-01 12:30:00", Unit::Seconds).unwrap();
        let time = from_timestamp(&seconds.to_string()).unwrap();
        assert_eq!(format_local(&time), "2024-01-01 12:30:00");

        let millis = to_timestamp("2024-01-01 12:30:00", Unit::Millis).unwrap();
        let time = from_timestamp(&millis.to_string()).unwrap();
        assert_eq!(format_local(&time), "2024-01-01 12:30:00");
    }

    #[test]
    fn test_timestamp_errors() {
        assert_eq!(
            from_timestamp("abc").unwrap_err(),
            TimeError::InvalidTimestamp("abc".to_string())
        );
        assert_eq!(
            from_timestamp("12345").unwrap_err(),
            TimeError::UnsupportedTimestamp("12345".to_string())
        );
        assert!(matches!(
            from_timestamp("17040672000"),
            Err(TimeError::UnsupportedTimestamp(_))
        ));
    }

    #[test]
    fn test_time_error_is_user_error() {
        let err: CliError = TimeError::InvalidTime("x".to_string()).into();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Error: Invalid time format: 'x'");
    }
}
