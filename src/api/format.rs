//! Presentation helpers for public payloads.

use chrono::{DateTime, Utc};

const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time in whole minutes, never less than 1 for
/// non-empty text.
pub fn read_time_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0;
    }
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

/// Compact date used in post listings, e.g. "04 Mar 2024"
pub fn format_date_compact(date: DateTime<Utc>) -> String {
    date.format("%d %b %Y").to_string()
}

/// Year-only rendering used for experience ranges, e.g. "2020"
pub fn format_year(date: DateTime<Utc>) -> String {
    date.format("%Y").to_string()
}
