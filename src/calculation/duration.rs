//! Duration text parsing.
//!
//! Spreadsheet exports carry durations as `HH:MM:SS` with an optional fractional
//! seconds part. Anything else is reported as unparsable and the scorer treats it
//! as a zero duration.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Longest accepted duration, in seconds (one million hours).
pub const MAX_DURATION_SECONDS: u64 = 3_600_000_000;

/// Most fractional-second digits accepted.
pub const MAX_FRACTION_DIGITS: usize = 9;

/// The outcome of reading an optional duration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationValue {
    /// The field parsed to this many seconds.
    Parsed(Decimal),
    /// The field was absent or blank.
    Missing,
    /// The field held text that is not `HH:MM:SS[.fraction]`.
    Malformed,
}

impl DurationValue {
    /// Reads an optional duration field.
    pub fn read(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            None | Some("") => DurationValue::Missing,
            Some(text) => match parse_duration_seconds(text) {
                Some(seconds) => DurationValue::Parsed(seconds),
                None => DurationValue::Malformed,
            },
        }
    }

    /// Returns the parsed seconds, or zero for missing and malformed values.
    pub fn seconds(self) -> Decimal {
        match self {
            DurationValue::Parsed(seconds) => seconds,
            DurationValue::Missing | DurationValue::Malformed => Decimal::ZERO,
        }
    }
}

/// Parses `HH:MM:SS[.fraction]` into a number of seconds.
///
/// Hours may exceed 24 and components are not range-checked; the only
/// requirement is three colon-separated unsigned numbers, the last of which may
/// carry a fraction of at most [`MAX_FRACTION_DIGITS`] digits. Totals above
/// [`MAX_DURATION_SECONDS`] are rejected.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::parse_duration_seconds;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_duration_seconds("08:00:00"), Some(Decimal::from(28_800)));
/// assert_eq!(parse_duration_seconds("00:00:01.5"), Some(Decimal::from_str("1.5").unwrap()));
/// assert_eq!(parse_duration_seconds("8h"), None);
/// ```
pub fn parse_duration_seconds(text: &str) -> Option<Decimal> {
    let mut parts = text.trim().split(':');
    let hours = parse_whole(parts.next()?)?;
    let minutes = parse_whole(parts.next()?)?;
    let seconds = parse_seconds(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    let whole = hours.checked_mul(3600)?.checked_add(minutes.checked_mul(60)?)?;
    let total = Decimal::from(whole).checked_add(seconds)?;
    (total <= Decimal::from(MAX_DURATION_SECONDS)).then_some(total)
}

fn parse_whole(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_seconds(part: &str) -> Option<Decimal> {
    let (whole, fraction) = match part.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (part, None),
    };
    parse_whole(whole)?;
    if let Some(fraction) = fraction {
        if fraction.is_empty()
            || fraction.len() > MAX_FRACTION_DIGITS
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
    }
    Decimal::from_str(part).ok()
}
