//! Date and ordinal formatting for narratives.
//!
//! Output is always English, independent of the host locale.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// English ordinal suffix for a day of month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day) {
        (1, d) if d != 11 => "st",
        (2, d) if d != 12 => "nd",
        (3, d) if d != 13 => "rd",
        _ => "th",
    }
}

/// Day of month with its ordinal suffix, e.g. `21st`.
pub fn ordinal(day: u32) -> String {
    format!("{day}{}", ordinal_suffix(day))
}

/// Parse a stored date value.
///
/// Form dates are `YYYY-MM-DD`; dates copied from resident records may carry a time part,
/// which is dropped without any timezone conversion.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// `March 5, 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `March 2024`
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Full English month name.
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}
