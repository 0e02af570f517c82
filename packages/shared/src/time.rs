use chrono::{DateTime, FixedOffset, Offset, Utc};

/// JST is UTC+9
const JST_OFFSET_SECONDS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    Utc::now().with_timezone(&jst()).timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as an RFC 3339 string in JST.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn timestamp_to_jst_rfc3339(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&jst()).to_rfc3339())
}

/// Parse either Unix milliseconds (`1700000000000`) or an RFC 3339 string
/// (`2024-01-01T09:00:00+09:00`) into Unix milliseconds.
pub fn parse_timestamp(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(millis) = input.parse::<i64>() {
        return Some(millis);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
