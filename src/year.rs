//! Footer copyright year.

#[cfg(test)]
#[path = "year_test.rs"]
mod year_test;

use chrono::Datelike;

/// Current calendar year in the visitor's local time zone.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[must_use]
pub fn year_text(year: i32) -> String {
    format!("{year:04}")
}
