//! Immutable value types exchanged between the calculators, the prompt
//! builders and the generation layer. Wire names are camelCase to match the
//! JSON payloads consumed downstream.

use serde::{Deserialize, Serialize};

/// A person as entered by the end user. Only the first name is mandatory;
/// compatibility studies tolerate a missing last name or birth date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Birth date in `DD/MM/YYYY` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl Person {
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: None,
            birth_date: None,
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    /// First + last name when the last name is present, first name alone
    /// otherwise. This is the string the expression number is computed from.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// One letter of a name with its positional value (A=1 .. Z=26).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterDetail {
    pub letter: char,
    pub value: u32,
}

/// Per-letter decomposition of a name valuation, for explanatory display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameBreakdown {
    pub letters: Vec<LetterDetail>,
    pub sum: u32,
    pub final_number: u32,
}

/// Intermediate values of a life path computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifePathBreakdown {
    pub day: u32,
    pub month: u32,
    pub year: u32,
    /// Unreduced digit sum of the year (e.g. 1990 -> 19).
    pub year_digit_sum: u32,
    pub reduced_day: u32,
    pub reduced_month: u32,
    pub life_path: u32,
}

/// The three core numbers of a full profile plus their breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub life_path: u32,
    pub expression: u32,
    pub intimate: u32,
    pub life_path_breakdown: LifePathBreakdown,
    pub expression_breakdown: NameBreakdown,
    pub intimate_breakdown: NameBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalYearDetails {
    pub year_digit_sum: u32,
    pub universal_year_reduced: u32,
}

/// Personal year for one reference year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalYear {
    pub life_path: u32,
    pub universal_year: u32,
    pub personal_year: u32,
    pub details: PersonalYearDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastYear {
    pub year: u32,
    pub personal_year: u32,
}

/// Personal years at +3, +6 and +9 from the reference year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub reference_year: u32,
    pub in_three_years: ForecastYear,
    pub in_six_years: ForecastYear,
    pub in_nine_years: ForecastYear,
}

/// The numbers computed for one party of a compatibility study. The life
/// path is `None` when the birth date was not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNumbers {
    pub life_path: Option<u32>,
    pub expression: u32,
    pub intimate: u32,
}

/// Absolute differences per axis plus the aggregate score. Lower is more
/// compatible; 0 means identical numbers on every compared axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityScores {
    pub life_path: Option<u32>,
    pub expression: u32,
    pub intimate: u32,
    pub global_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    pub person1: ProfileNumbers,
    pub person2: ProfileNumbers,
    pub scores: CompatibilityScores,
}

/// Time window for an optimal-dates study, bounds in `DD/MM/YYYY` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWindow {
    pub event: String,
    pub start: String,
    pub end: String,
}
