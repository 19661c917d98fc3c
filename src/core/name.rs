//! Letter mapping and name valuation.
//!
//! Only ASCII letters carry a value; anything else (spaces, accents,
//! punctuation, digits) is stripped before summing.

use crate::core::reduce::reduce_final;
use crate::domain::model::{LetterDetail, NameBreakdown};

/// Positional value of a letter: A=1 .. Z=26, case-insensitive.
/// Characters outside A-Z map to 0.
pub fn letter_value(ch: char) -> u32 {
    let upper = ch.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        upper as u32 - 'A' as u32 + 1
    } else {
        0
    }
}

/// Numerological value of a full name, reduced to a single digit (1-9).
/// A name with no ASCII letters yields 0.
pub fn name_value(full_name: &str) -> u32 {
    let sum: u32 = full_name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(letter_value)
        .sum();

    reduce_final(sum)
}

/// Same computation as [`name_value`], keeping the per-letter values and the
/// raw sum for explanatory display.
pub fn name_breakdown(full_name: &str) -> NameBreakdown {
    let letters: Vec<LetterDetail> = full_name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|ch| LetterDetail {
            letter: ch.to_ascii_uppercase(),
            value: letter_value(ch),
        })
        .collect();

    let sum: u32 = letters.iter().map(|detail| detail.value).sum();

    NameBreakdown {
        letters,
        sum,
        final_number: reduce_final(sum),
    }
}
