//! Plain-text rendering of history entries for terminal output

use chrono::{DateTime, Datelike, Utc};

use crate::models::HistoryEntry;
use crate::utils::terminal::{preview_line, strip_ansi_codes};

/// Characters of prompt shown in a history listing row
const PROMPT_PREVIEW_CHARS: usize = 60;

/// Characters of the id shown in listings; enough to use as a selector
pub const SHORT_ID_LEN: usize = 8;

/// Tiered timestamp: relative under a week ("2h ago"), absolute beyond
/// ("Jan 15", or "Dec 3, 2024" for other years)
pub fn format_timestamp(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(*timestamp).num_seconds();

    if seconds < 7 * 24 * 60 * 60 {
        format_relative(seconds)
    } else if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}

pub fn short_id(entry: &HistoryEntry) -> String {
    entry.id.simple().to_string()[..SHORT_ID_LEN].to_string()
}

/// One listing row; `position` is 1-based within the view being listed
pub fn entry_row(position: usize, entry: &HistoryEntry, now: &DateTime<Utc>) -> String {
    let star = if entry.favorite { '★' } else { ' ' };
    format!(
        "{:>3}. {} {}  {:<10}  {:<10}  {}",
        position,
        star,
        short_id(entry),
        strip_ansi_codes(entry.language.as_str()),
        format_timestamp(&entry.timestamp, now),
        preview_line(&entry.prompt, PROMPT_PREVIEW_CHARS)
    )
}
