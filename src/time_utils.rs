// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{Datelike, NaiveDate};

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a duration given in (fractional) minutes as `HH:MM:SS`.
///
/// Returns `None` for negative or non-finite input.
pub fn format_minutes(minutes: f64) -> Option<String> {
    if !minutes.is_finite() || minutes < 0.0 {
        return None;
    }

    let hours = (minutes / 60.0).floor() as u64;
    let mins = (minutes % 60.0).floor() as u64;
    let secs = ((minutes * 60.0) % 60.0).floor() as u64;

    Some(format!("{:02}:{:02}:{:02}", hours, mins, secs))
}

/// English ordinal for a day of month: 1st, 2nd, 3rd, 4th, 11th, 21st...
pub fn ordinal(number: u32) -> String {
    let suffix = match (number % 10, number % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", number, suffix)
}

/// Short chart label for a day, e.g. `Mon, 3rd`.
pub fn day_label(date: NaiveDate) -> String {
    format!("{}, {}", date.format("%a"), ordinal(date.day()))
}
