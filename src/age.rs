//! Birth-date parsing and whole-year arithmetic.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

use crate::error::{GuruError, GuruResult};

/// Parses a date-of-birth value into a calendar date.
///
/// Accepts RFC 3339 timestamps as returned by Wikidata
/// (`1953-05-06T00:00:00Z`), naive timestamps, and plain `YYYY-MM-DD`.
/// The calendar date is taken as written; no timezone shift is applied.
///
/// # Errors
///
/// Returns `GuruError::InvalidDate` if none of the formats match.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use wikiguru::age::parse_birth_date;
///
/// let date = parse_birth_date("1953-05-06T00:00:00Z").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(1953, 5, 6).unwrap());
/// ```
pub fn parse_birth_date(text: &str) -> GuruResult<NaiveDate> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| GuruError::invalid_date(text, e.to_string()))
}

/// Number of whole years from `birth` to `today`.
///
/// An anniversary that has not yet come round this year does not count.
/// A 29 February birth date reaches its anniversary on 28 February in
/// non-leap years.
///
/// # Errors
///
/// Returns `GuruError::InvalidDate` if `birth` is after `today`.
pub fn whole_years_between(birth: NaiveDate, today: NaiveDate) -> GuruResult<u32> {
    if birth > today {
        return Err(GuruError::invalid_date(
            birth.to_string(),
            format!("date is after {today}"),
        ));
    }

    // birth <= today, so the difference is non-negative.
    let mut years = u32::try_from(today.year() - birth.year()).unwrap_or(0);
    let anniversary = birth
        .checked_add_months(Months::new(years * 12))
        .ok_or_else(|| GuruError::invalid_date(birth.to_string(), "date out of range"))?;
    if anniversary > today {
        years -= 1;
    }
    Ok(years)
}
