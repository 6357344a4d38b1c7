use chrono::{DateTime, Utc};

pub const ELLIPSIS: &str = "...";

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// "N days ago" style label for the distance between `date` and `now`.
///
/// Day counts round up, so anything under a day in the past or future reads
/// as "1 day ago" and an identical instant reads as "0 days ago".
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (now - date).num_milliseconds().unsigned_abs();
    let days = millis.div_ceil(MILLIS_PER_DAY);

    if days == 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days.div_ceil(7))
    } else if days < 365 {
        format!("{} months ago", days.div_ceil(30))
    } else {
        format!("{} years ago", days.div_ceil(365))
    }
}

/// Cut `text` to `limit` characters, appending an ellipsis only when something was cut.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}
