use crate::filter::error::TimeBoundError;
use crate::record::{Node, Path, Record, Scalar};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_TIMESTAMP_FIELD: &str = "timestamp";

/// Epoch values below this are taken to be seconds, not milliseconds.
pub const SECONDS_THRESHOLD: f64 = 1e11;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn normalize_epoch_millis(raw: f64) -> f64 {
    if raw < SECONDS_THRESHOLD {
        raw * 1000.0
    } else {
        raw
    }
}

/// Inclusive window; an unset bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Parse both bounds; blank strings leave the bound open.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, TimeBoundError> {
        let parse = |raw: Option<&str>| {
            raw.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(parse_bound)
                .transpose()
        };
        Ok(Self {
            start: parse(start)?,
            end: parse(end)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains_millis(&self, ts: f64) -> bool {
        if let Some(start) = self.start {
            if ts < start.timestamp_millis() as f64 {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts > end.timestamp_millis() as f64 {
                return false;
            }
        }
        true
    }
}

/// Accepts RFC 3339, naive date-times (read as UTC), bare dates and integer
/// epoch milliseconds.
pub fn parse_bound(raw: &str) -> Result<DateTime<Utc>, TimeBoundError> {
    let s = raw.trim();
    let invalid = || TimeBoundError {
        value: raw.to_string(),
    };

    if let Ok(ms) = s.parse::<i64>() {
        return DateTime::from_timestamp_millis(ms).ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)
}

/// The record's timestamp in epoch milliseconds, or `None` when it is missing,
/// `null` or cannot be read as a number or RFC 3339 instant.
pub fn record_timestamp_millis(record: &Node, field: &Path) -> Option<f64> {
    match record.get(field)? {
        Node::Leaf(Scalar::Number(n)) => n.as_f64().map(normalize_epoch_millis),
        Node::Leaf(Scalar::String(s)) => match crate::record::parse_number(s) {
            Some(n) => Some(normalize_epoch_millis(n)),
            None => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.timestamp_millis() as f64),
        },
        _ => None,
    }
}

/// Window on the default `timestamp` field.
pub fn apply_time_window(records: &[Record], range: &TimeRange) -> Vec<Record> {
    apply_time_window_on(records, range, &Path::parse(DEFAULT_TIMESTAMP_FIELD))
}

pub fn apply_time_window_on(records: &[Record], range: &TimeRange, field: &Path) -> Vec<Record> {
    if range.is_unbounded() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| match record_timestamp_millis(r, field) {
            Some(ts) => range.contains_millis(ts),
            None => true,
        })
        .map(Arc::clone)
        .collect()
}
