//! 日期时间解析工具
//!
//! The service reports dates as plain text: billing dates as `YYYY-MM-DD`,
//! poll timestamps as `YYYY-MM-DD HH:MM:SS` (server local time) and some
//! registries pass RFC3339 through unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `YYYY-MM-DD` date. Empty input yields `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime(raw).map(|dt| dt.date()))
}

/// Parse a timestamp as `YYYY-MM-DD HH:MM:SS` or RFC3339.
///
/// RFC3339 values keep their wall-clock time; the offset is dropped because
/// the plain form carries none either.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}
