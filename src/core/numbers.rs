//! Core derived numbers: life path, expression and intimate numbers.
//!
//! Callers are expected to have run [`is_valid_date`](crate::core::date::is_valid_date)
//! on user input first; a date that does not even match `DD/MM/YYYY` is a
//! hard [`NumeraError::InvalidDate`](crate::utils::error::NumeraError) here.

use crate::core::date::split_date;
use crate::core::name::{name_breakdown, name_value};
use crate::core::reduce::{digit_sum, reduce_final};
use crate::domain::model::{LifePathBreakdown, NameBreakdown};
use crate::utils::error::Result;

/// Life path number (1-9) from a `DD/MM/YYYY` birth date: reduced day +
/// reduced month + reduced year digit sum, the total reduced again.
pub fn life_path(birth_date: &str) -> Result<u32> {
    let (day, month, year) = split_date(birth_date)?;

    let reduced_day = reduce_final(day);
    let reduced_month = reduce_final(month);
    let reduced_year = reduce_final(digit_sum(year));

    Ok(reduce_final(reduced_day + reduced_month + reduced_year))
}

/// Life path computation with every intermediate value exposed, for
/// explanatory display and prompt construction.
pub fn life_path_breakdown(birth_date: &str) -> Result<LifePathBreakdown> {
    let (day, month, year) = split_date(birth_date)?;

    let year_digit_sum = digit_sum(year);
    let reduced_day = reduce_final(day);
    let reduced_month = reduce_final(month);
    let reduced_year = reduce_final(year_digit_sum);

    Ok(LifePathBreakdown {
        day,
        month,
        year,
        year_digit_sum,
        reduced_day,
        reduced_month,
        life_path: reduce_final(reduced_day + reduced_month + reduced_year),
    })
}

/// Expression number (1-9) from the full name.
pub fn expression_number(first_name: &str, last_name: &str) -> u32 {
    name_value(&format!("{} {}", first_name, last_name))
}

/// Per-letter breakdown behind [`expression_number`].
pub fn expression_breakdown(first_name: &str, last_name: &str) -> NameBreakdown {
    name_breakdown(&format!("{} {}", first_name, last_name))
}

/// Intimate number (1-9) from the first name alone.
pub fn intimate_number(first_name: &str) -> u32 {
    name_value(first_name)
}

/// Per-letter breakdown behind [`intimate_number`].
pub fn intimate_breakdown(first_name: &str) -> NameBreakdown {
    name_breakdown(first_name)
}
