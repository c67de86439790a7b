use chrono::{Datelike as _, Days, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

/// The default period key: the calendar year of the date.
pub fn calendar_year(date: &NaiveDate) -> i32 {
    date.year()
}

/**
Returns the first and last day of a calendar year.

## Arguments
* `year` - The calendar year.

## Returns
`(January 1st, December 31st)` or `None` if the year is outside chrono's range.
 */
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((start, end))
}

pub fn day_before(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(1))
}

pub fn day_after(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(1))
}
