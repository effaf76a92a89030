//! Shared display formatting helpers.
//!
//! Pure functions only; no ratatui styles or layout. Row fields are
//! formatted on the way to the screen, the stored rows stay untouched.

use chrono::{Datelike, Local, NaiveDate};

/// Year used for the derived-age column.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Displayed age for a stored birth year.
pub fn derived_age(birth_year: i32, current_year: i32) -> i32 {
    current_year - birth_year
}

/// Reformat a `MM/DD/YYYY` login date as e.g. `"December 29, 2023"`.
///
/// Unparseable input is shown as-is rather than dropped.
pub fn format_login_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        Ok(date) => date.format("%B %d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Thousands-separated integer, e.g. `1234567` → `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
