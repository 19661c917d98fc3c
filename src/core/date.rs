//! Birth date parsing, validation and format conversion.
//!
//! Two textual encodings exist: the canonical `DD/MM/YYYY` form used by the
//! calculators, and the `YYYY-MM-DD` form coming from HTML date inputs.
//! Conversion helpers fail soft (empty string); the calculators fail hard
//! through [`split_date`].

use crate::utils::error::{NumeraError, Result};
use chrono::NaiveDate;
use regex::Regex;

const DATE_PATTERN: &str = r"^(\d{2})/(\d{2})/(\d{4})$";

fn date_regex() -> Regex {
    // The pattern is a constant, compilation cannot fail.
    Regex::new(DATE_PATTERN).unwrap()
}

/// True iff `s` matches `DD/MM/YYYY` and names a real calendar date.
/// Leap years are handled by actual date construction, not a lookup table.
/// Years below 0100 are rejected rather than reinterpreted.
pub fn is_valid_date(s: &str) -> bool {
    match split_date(s) {
        Ok((day, month, year)) => {
            year >= 100 && NaiveDate::from_ymd_opt(year as i32, month, day).is_some()
        }
        Err(_) => false,
    }
}

/// Converts `YYYY-MM-DD` to `DD/MM/YYYY`. Returns an empty string unless the
/// input splits into exactly three non-empty dash-separated parts.
pub fn html_to_format(s: &str) -> String {
    let parts: Vec<&str> = s.split('-').collect();
    match parts.as_slice() {
        [year, month, day] if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
            format!("{}/{}/{}", day, month, year)
        }
        _ => String::new(),
    }
}

/// Converts `DD/MM/YYYY` to `YYYY-MM-DD`. Pure reformatting: the pattern is
/// checked, calendar correctness is not. Returns an empty string on mismatch.
pub fn format_to_html(s: &str) -> String {
    match date_regex().captures(s) {
        Some(caps) => format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]),
        None => String::new(),
    }
}

/// Splits a `DD/MM/YYYY` string into (day, month, year) numeric fields.
/// Only the pattern is enforced here; callers needing calendar correctness
/// go through [`is_valid_date`] first.
pub(crate) fn split_date(s: &str) -> Result<(u32, u32, u32)> {
    let caps = date_regex()
        .captures(s)
        .ok_or_else(|| NumeraError::InvalidDate {
            value: s.to_string(),
        })?;

    // The regex guarantees each group is a short digit run.
    let day = caps[1].parse::<u32>().unwrap();
    let month = caps[2].parse::<u32>().unwrap();
    let year = caps[3].parse::<u32>().unwrap();

    Ok((day, month, year))
}
