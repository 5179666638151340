//! Julian date encoding for CPA-005 date fields.
//!
//! Dates are written as `0YYDDD`: a constant leading zero, the two-digit year
//! and the three-digit day of the year (001-366).

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Display adapter that renders a date in the `0YYDDD` form.
///
/// Lets the formatter `write!` a date straight into a record without an
/// intermediate allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JulianDate(pub NaiveDate);

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0{:02}{:03}",
            self.0.year().rem_euclid(100),
            self.0.ordinal()
        )
    }
}

/// Encodes a calendar date as a 6-character CPA-005 Julian date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eft_generator::julian::to_julian_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
/// assert_eq!(to_julian_date(date), "024032");
/// ```
pub fn to_julian_date(date: NaiveDate) -> String {
    JulianDate(date).to_string()
}
