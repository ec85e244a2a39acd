// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date formatting.
//!
//! All output uses English month names in the Gregorian calendar, independent
//! of the host locale, so popup and timeline text is stable everywhere.

use chrono::NaiveDate;

/// Format a date as "September 10, 2023".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date range as "September 10, 2023 – October 15, 2023".
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} – {}", format_long_date(start), format_long_date(end))
}

/// Timeline boundary label: "Aug" or, with the year suffix, "Aug '23".
pub fn month_label(date: NaiveDate, with_year: bool) -> String {
    if with_year {
        date.format("%b '%y").to_string()
    } else {
        date.format("%b").to_string()
    }
}
