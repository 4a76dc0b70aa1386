//! Calendar-day handling.
//!
//! Period dates are treated as calendar days, never as instants: a stored value
//! such as `2024-12-31T23:00:00-03:00` is the 31st of December no matter which
//! timezone reads it. The special-date rule and the daily grouping both depend
//! on this.

use chrono::{Datelike, NaiveDate};

/// The (month, day) pairs that count as special dates in any year.
pub const SPECIAL_DATES: [(u32, u32); 4] = [(12, 24), (12, 25), (12, 31), (1, 1)];

/// Parses the calendar portion of a period date.
///
/// Accepts `YYYY-MM-DD` followed by an optional time or zone suffix (separated
/// by `T` or a space), which is discarded without any timezone adjustment.
/// Spreadsheet-style `DD/MM/YYYY` is accepted as well.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 12, 31);
/// assert_eq!(parse_calendar_date("2024-12-31"), expected);
/// assert_eq!(parse_calendar_date("2024-12-31T23:00:00-03:00"), expected);
/// assert_eq!(parse_calendar_date("2024-12-31 00:00:00+00"), expected);
/// assert_eq!(parse_calendar_date("31/12/2024"), expected);
/// assert_eq!(parse_calendar_date("Dec 31"), None);
/// ```
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let calendar_part = text.trim().split(['T', ' ']).next()?;

    NaiveDate::parse_from_str(calendar_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(calendar_part, "%d/%m/%Y"))
        .ok()
}

/// Returns true if the date falls on Dec 24, Dec 25, Dec 31 or Jan 1.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::is_special_date;
/// use chrono::NaiveDate;
///
/// assert!(is_special_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
/// assert!(is_special_date(NaiveDate::from_ymd_opt(2031, 1, 1).unwrap()));
/// assert!(!is_special_date(NaiveDate::from_ymd_opt(2024, 12, 26).unwrap()));
/// ```
pub fn is_special_date(date: NaiveDate) -> bool {
    SPECIAL_DATES.contains(&(date.month(), date.day()))
}
