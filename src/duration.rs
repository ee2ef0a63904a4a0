//! Human-readable rendering of elapsed intervals.

use chrono::{DateTime, Utc};

const UNITS: [(&str, i64); 5] = [
    ("day", 86_400_000),
    ("hour", 3_600_000),
    ("minute", 60_000),
    ("second", 1_000),
    ("millisecond", 1),
];

/// Whole milliseconds from `begin` to `end`, never negative.
pub fn elapsed_ms(begin: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    end.signed_duration_since(begin).num_milliseconds().max(0) as u64
}

/// Render the interval between two timestamps, e.g. `"1 minute, 4 milliseconds"`.
///
/// Zero components are skipped. The interval is taken as an absolute value.
pub fn duration_to_string(begin: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let ms = end.signed_duration_since(begin).num_milliseconds().unsigned_abs();
    format_ms(ms)
}

/// Render a millisecond count the same way as [`duration_to_string`].
pub fn format_ms(ms: u64) -> String {
    if ms == 0 {
        return "0 milliseconds".to_string();
    }

    let mut remaining = ms;
    let mut parts = Vec::new();
    for (unit, size) in UNITS {
        let size = size as u64;
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", count, unit, plural));
        }
    }
    parts.join(", ")
}
