//! Date column headers: suffix normalization and strict `Month D, YYYY` parsing.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::error::{SpiralError, SpiralResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Strips a duplicate-column suffix such as `.1` from a raw header.
///
/// Everything from the first `.` onward is dropped.
#[must_use]
pub fn normalize_date_key(raw: &str) -> &str {
    raw.split_once('.').map_or(raw, |(key, _)| key)
}

/// Parses a normalized key in the exact form `September 1, 2025`.
///
/// The month must be the full English name, the day must have no leading
/// zero and the year must have four digits. Anything else, including dates
/// that do not exist on the calendar, is rejected.
pub fn parse_date_key(key: &str) -> SpiralResult<NaiveDate> {
    parse_strict(key).ok_or_else(|| SpiralError::InvalidDate {
        raw: key.to_owned(),
    })
}

fn parse_strict(key: &str) -> Option<NaiveDate> {
    let (month_name, rest) = key.split_once(' ')?;
    let (day_text, year_text) = rest.split_once(", ")?;

    let month = MONTH_NAMES
        .iter()
        .position(|name| *name == month_name)
        .and_then(|index| u32::try_from(index + 1).ok())?;

    let day_is_canonical = matches!(day_text.len(), 1 | 2)
        && day_text.bytes().all(|b| b.is_ascii_digit())
        && !day_text.starts_with('0');
    if !day_is_canonical {
        return None;
    }

    if year_text.len() != 4 || !year_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let day = day_text.parse().ok()?;
    let year = year_text.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Day of week with Monday as 0 and Sunday as 6.
#[must_use]
pub fn day_of_week(date: NaiveDate) -> u8 {
    // num_days_from_monday is always in 0..7
    date.weekday().num_days_from_monday() as u8
}

/// One raw date header resolved against the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    pub index: usize,
    pub raw: String,
    pub key: String,
    pub date: NaiveDate,
}

/// Resolves every header not named in `excluded` into a date column.
///
/// Headers whose normalized key does not parse are logged and skipped, so
/// their cells never reach an aggregate.
#[must_use]
pub fn resolve_date_columns(
    columns: &[String],
    excluded: &[String],
    table: &str,
) -> Vec<DateColumn> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, raw)| !excluded.iter().any(|name| name == *raw))
        .filter_map(|(index, raw)| {
            let key = normalize_date_key(raw);
            match parse_date_key(key) {
                Ok(date) => Some(DateColumn {
                    index,
                    raw: raw.clone(),
                    key: key.to_owned(),
                    date,
                }),
                Err(err) => {
                    warn!(table, column = %raw, error = %err, "skipping unparsable date column");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_stripped_from_first_dot() {
        assert_eq!(normalize_date_key("October 26, 2025.1"), "October 26, 2025");
        assert_eq!(normalize_date_key("October 26, 2025.1.2"), "October 26, 2025");
        assert_eq!(normalize_date_key("October 26, 2025"), "October 26, 2025");
    }

    #[test]
    fn strict_format_rejects_variants() {
        for bad in [
            "Oct 26, 2025",
            "October 06, 2025",
            "October 26 2025",
            "October  26, 2025",
            "october 26, 2025",
            "October 26, 25",
            "October 26, 2025 ",
            "February 30, 2025",
            "October 0, 2025",
            "",
        ] {
            assert!(parse_date_key(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn monday_is_zero() {
        let monday = NaiveDate::from_ymd_opt(2025, 9, 29).expect("date");
        let sunday = NaiveDate::from_ymd_opt(2025, 10, 5).expect("date");
        assert_eq!(day_of_week(monday), 0);
        assert_eq!(day_of_week(sunday), 6);
    }
}
