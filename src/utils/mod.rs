//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;
pub mod retry;

use chrono::NaiveDate;

/// Date format the roster API uses for `;date=` selectors
pub const LINEUP_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a lineup date the way the roster API expects it
pub fn format_lineup_date(date: NaiveDate) -> String {
    date.format(LINEUP_DATE_FORMAT).to_string()
}

/// Today's date in the local timezone
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Truncate text to a maximum length for log output
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let mut end = max_len.saturating_sub(3);
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
