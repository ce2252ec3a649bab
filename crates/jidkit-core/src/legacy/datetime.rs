#![allow(deprecated)]

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use regex::{Captures, Regex};
use thiserror::Error;

const DATE: &str = r"([0-9]{4})-([0-9]{2})-([0-9]{2})";
const TIME: &str = r"([0-9]{2}):([0-9]{2}):([0-9]{2})(\.[0-9]+)?";
const TIME_ZONE: &str = r"(Z|[+-][0-9]{2}:[0-9]{2})";

static DATE_TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^{DATE}T{TIME}{TIME_ZONE}$")));
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^{DATE}$")));
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^{TIME}{TIME_ZONE}?$")));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("can't parse datetime, date or time: {0}")]
    Unparseable(String),
    #[error("timestamp out of range: {0}")]
    OutOfRange(String),
}

#[deprecated(since = "0.2.0", note = "parse with chrono and keep the original offset")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    Time { time: NaiveTime, offset: FixedOffset },
}

/// XEP-0082 date, time and datetime profiles plus the XEP-0091 legacy
/// delayed-delivery stamp. All formatting happens in UTC.
#[deprecated(since = "0.2.0", note = "format with chrono's RFC 3339 helpers")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeFormatter;

impl DateTimeFormatter {
    pub const fn new() -> Self {
        Self
    }

    pub fn format_date(&self, value: &DateTime<Utc>) -> String {
        value.format("%Y-%m-%d").to_string()
    }

    pub fn format_date_time(&self, value: &DateTime<Utc>) -> String {
        value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    pub fn format_time(&self, value: &DateTime<Utc>) -> String {
        value.format("%H:%M:%SZ").to_string()
    }

    pub fn format_with_ms(&self, value: &DateTime<Utc>) -> String {
        value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    pub fn format_legacy_delayed_delivery(&self, value: &DateTime<Utc>) -> String {
        value.format("%Y%m%dT%H:%M:%S").to_string()
    }

    /// Parses a datetime, a date, or a time, tried in that order.
    /// Empty input yields `Ok(None)`.
    pub fn parse(&self, value: &str) -> Result<Option<ParsedTimestamp>, TimestampError> {
        if value.is_empty() {
            return Ok(None);
        }

        if let Some(caps) = DATE_TIME_PATTERN.captures(value) {
            let date = date_from(&caps, 1, value)?;
            let time = time_from(&caps, 4, value)?;
            let offset = offset_from(caps.get(8).map(|m| m.as_str()), value)?;
            let stamp = date
                .and_time(time)
                .and_local_timezone(offset)
                .single()
                .ok_or_else(|| TimestampError::OutOfRange(value.to_string()))?;
            return Ok(Some(ParsedTimestamp::DateTime(stamp)));
        }

        if let Some(caps) = DATE_PATTERN.captures(value) {
            return Ok(Some(ParsedTimestamp::Date(date_from(&caps, 1, value)?)));
        }

        if let Some(caps) = TIME_PATTERN.captures(value) {
            let time = time_from(&caps, 1, value)?;
            let offset = offset_from(caps.get(5).map(|m| m.as_str()), value)?;
            return Ok(Some(ParsedTimestamp::Time { time, offset }));
        }

        Err(TimestampError::Unparseable(value.to_string()))
    }
}

// Patterns are assembled from the constants above only.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("timestamp pattern is valid")
}

fn number(caps: &Captures<'_>, index: usize, value: &str) -> Result<u32, TimestampError> {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| TimestampError::Unparseable(value.to_string()))
}

fn date_from(caps: &Captures<'_>, first: usize, value: &str) -> Result<NaiveDate, TimestampError> {
    let year = number(caps, first, value)?;
    let month = number(caps, first + 1, value)?;
    let day = number(caps, first + 2, value)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| TimestampError::OutOfRange(value.to_string()))
}

fn time_from(caps: &Captures<'_>, first: usize, value: &str) -> Result<NaiveTime, TimestampError> {
    let hour = number(caps, first, value)?;
    let minute = number(caps, first + 1, value)?;
    let second = number(caps, first + 2, value)?;
    let millis = caps
        .get(first + 3)
        .map(|m| fraction_to_millis(&m.as_str()[1..]))
        .unwrap_or(0);
    NaiveTime::from_hms_milli_opt(hour, minute, second, millis)
        .ok_or_else(|| TimestampError::OutOfRange(value.to_string()))
}

fn fraction_to_millis(digits: &str) -> u32 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'))
}

fn offset_from(zone: Option<&str>, value: &str) -> Result<FixedOffset, TimestampError> {
    let utc = FixedOffset::east_opt(0).ok_or_else(|| TimestampError::OutOfRange(value.to_string()));
    let Some(zone) = zone.filter(|zone| *zone != "Z") else {
        return utc;
    };

    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let (hours, minutes) = zone[1..]
        .split_once(':')
        .ok_or_else(|| TimestampError::Unparseable(value.to_string()))?;
    let hours: i32 = hours
        .parse()
        .map_err(|_| TimestampError::Unparseable(value.to_string()))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| TimestampError::Unparseable(value.to_string()))?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| TimestampError::OutOfRange(value.to_string()))
}
