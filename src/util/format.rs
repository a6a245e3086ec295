//! Human-readable sizes and dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::env::UiEnv;

const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

pub const INVALID_DATE: &str = "Invalid Date";

/// Offset-less date-times, read as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Format a byte count with 1024-based units, rounded to two decimals.
///
/// Trailing zeros are dropped (`1536` → `"1.5 KB"`, `1024` → `"1 KB"`).
/// Counts past the terabyte range stay in TB.
pub fn format_byte_count(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit + 1 < BYTE_UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let scaled = bytes as f64 / divisor as f64;
    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", BYTE_UNITS[unit])
}

/// Render a date string the way `env` displays dates.
pub fn format_date<E: UiEnv>(env: &E, raw: &str) -> String {
    env.format_date(raw)
}

/// Parse a date string and render it as `M/D/YYYY, h:mm:ss AM`.
///
/// Accepts RFC 3339, RFC 2822, ISO-8601 date-times without an offset and
/// bare `YYYY-MM-DD` dates. Offsets are converted and the result is shown in
/// UTC; the browser environment renders in the user's locale instead.
pub fn format_date_time(raw: &str) -> String {
    parse_date_time(raw.trim()).map_or_else(
        || INVALID_DATE.to_owned(),
        |dt| dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
    )
}

fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
