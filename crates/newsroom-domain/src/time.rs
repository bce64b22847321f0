//! Timestamp helpers
//!
//! Stored expiry values and the `now` handed to the expiry query share one
//! serialization: fixed-width UTC `YYYY-MM-DDTHH:MM:SSZ`, so comparing the
//! strings orders them in time.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Serialization used for storage comparisons
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Current UTC time
pub fn utcnow() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp in the storage serialization
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use newsroom_domain::time::format_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2013, 2, 20, 12, 30, 0).unwrap();
/// assert_eq!(format_timestamp(&ts), "2013-02-20T12:30:00Z");
/// ```
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(STORAGE_FORMAT).to_string()
}

/// Parse a timestamp in the storage serialization
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(s, STORAGE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("Invalid timestamp '{}': {}", s, e))
}

/// Expiry timestamp `minutes` from now (negative values lie in the past)
pub fn expiry_date(minutes: i64) -> DateTime<Utc> {
    utcnow() + Duration::minutes(minutes)
}
