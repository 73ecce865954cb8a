//! Calendar arithmetic for accrual cycles
//!
//! Interest accrues daily against the length of the simulated year and
//! folds at the end of the simulated month, so both lengths are derived
//! from the clock's current date.

use chrono::{DateTime, Datelike, Utc};

/// True for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Number of days in the given year.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Days in the month the instant falls in.
pub fn days_in_current_month(now: DateTime<Utc>) -> u32 {
    days_in_month(now.year(), now.month())
}

/// Days in the year the instant falls in.
pub fn days_in_current_year(now: DateTime<Utc>) -> u32 {
    days_in_year(now.year())
}
