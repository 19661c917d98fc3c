//! Composite calculators built on the core derived numbers: personal year,
//! multi-year forecast and pairwise compatibility.

use crate::core::name::name_value;
use crate::core::numbers::life_path;
use crate::core::reduce::{digit_sum, reduce_final};
use crate::domain::model::{
    Compatibility, CompatibilityScores, Forecast, ForecastYear, Person, PersonalYear,
    PersonalYearDetails, ProfileNumbers,
};
use crate::utils::error::Result;

/// Personal year: life path + universal year (the reduced digit sum of the
/// target year), reduced again. Always lands in 1-9.
pub fn personal_year(birth_date: &str, year: u32) -> Result<PersonalYear> {
    let life_path = life_path(birth_date)?;

    let year_digit_sum = digit_sum(year);
    let universal_year = reduce_final(year_digit_sum);

    Ok(PersonalYear {
        life_path,
        universal_year,
        personal_year: reduce_final(life_path + universal_year),
        details: PersonalYearDetails {
            year_digit_sum,
            universal_year_reduced: universal_year,
        },
    })
}

/// Personal years at +3, +6 and +9 from the reference year.
pub fn forecast(birth_date: &str, reference_year: u32) -> Result<Forecast> {
    let at = |offset: u32| -> Result<ForecastYear> {
        let year = reference_year + offset;
        Ok(ForecastYear {
            year,
            personal_year: personal_year(birth_date, year)?.personal_year,
        })
    };

    Ok(Forecast {
        reference_year,
        in_three_years: at(3)?,
        in_six_years: at(6)?,
        in_nine_years: at(9)?,
    })
}

fn profile_numbers(person: &Person) -> Result<ProfileNumbers> {
    let life_path = match &person.birth_date {
        Some(date) => Some(life_path(date)?),
        None => None,
    };

    Ok(ProfileNumbers {
        life_path,
        expression: name_value(&person.full_name()),
        intimate: name_value(&person.first_name),
    })
}

/// Pairwise compatibility: per-person numbers, absolute differences per
/// axis, and the rounded mean of the available differences as the global
/// score. The life path axis drops out when either birth date is absent.
pub fn compatibility(person1: &Person, person2: &Person) -> Result<Compatibility> {
    let numbers1 = profile_numbers(person1)?;
    let numbers2 = profile_numbers(person2)?;

    let life_path_diff = match (numbers1.life_path, numbers2.life_path) {
        (Some(a), Some(b)) => Some(a.abs_diff(b)),
        _ => None,
    };
    let expression_diff = numbers1.expression.abs_diff(numbers2.expression);
    let intimate_diff = numbers1.intimate.abs_diff(numbers2.intimate);

    let mut diffs = vec![expression_diff, intimate_diff];
    if let Some(diff) = life_path_diff {
        diffs.push(diff);
    }
    let global_score =
        (diffs.iter().sum::<u32>() as f64 / diffs.len() as f64).round() as u32;

    Ok(Compatibility {
        person1: numbers1,
        person2: numbers2,
        scores: CompatibilityScores {
            life_path: life_path_diff,
            expression: expression_diff,
            intimate: intimate_diff,
            global_score,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personal_year_components() {
        let result = personal_year("15/03/1990", 2025).unwrap();
        // 2025 -> 9; life path 1; 1 + 9 = 10 -> 1
        assert_eq!(result.life_path, 1);
        assert_eq!(result.details.year_digit_sum, 9);
        assert_eq!(result.universal_year, 9);
        assert_eq!(result.details.universal_year_reduced, 9);
        assert_eq!(result.personal_year, 1);
    }

    #[test]
    fn test_personal_year_always_in_range() {
        for year in 1900..2100 {
            let result = personal_year("15/03/1990", year).unwrap();
            assert!(
                (1..=9).contains(&result.personal_year),
                "personal year for {} was {}",
                year,
                result.personal_year
            );
        }
    }

    #[test]
    fn test_personal_year_rejects_malformed_date() {
        assert!(personal_year("not-a-date", 2025).is_err());
    }

    #[test]
    fn test_forecast_offsets() {
        let forecast = forecast("15/03/1990", 2024).unwrap();
        assert_eq!(forecast.reference_year, 2024);
        assert_eq!(forecast.in_three_years.year, 2027);
        assert_eq!(forecast.in_six_years.year, 2030);
        assert_eq!(forecast.in_nine_years.year, 2033);

        for entry in [
            &forecast.in_three_years,
            &forecast.in_six_years,
            &forecast.in_nine_years,
        ] {
            assert_eq!(
                entry.personal_year,
                personal_year("15/03/1990", entry.year).unwrap().personal_year
            );
        }
    }

    #[test]
    fn test_compatibility_with_both_birth_dates() {
        let alice = Person::new("Alice").with_birth_date("01/01/2000");
        let bob = Person::new("Bob").with_birth_date("15/03/1990");

        let result = compatibility(&alice, &bob).unwrap();
        assert_eq!(result.person1.life_path, Some(4));
        assert_eq!(result.person2.life_path, Some(1));
        assert_eq!(result.scores.life_path, Some(3));
        // Alice -> 3, Bob -> 1 on both name axes
        assert_eq!(result.scores.expression, 2);
        assert_eq!(result.scores.intimate, 2);
        // mean of {2, 2, 3} = 2.33 -> 2
        assert_eq!(result.scores.global_score, 2);
    }

    #[test]
    fn test_compatibility_with_missing_birth_date() {
        let alice = Person::new("Alice").with_birth_date("01/01/2000");
        let bob = Person::new("Bob");

        let result = compatibility(&alice, &bob).unwrap();
        assert_eq!(result.person1.life_path, Some(4));
        assert_eq!(result.person2.life_path, None);
        assert_eq!(result.scores.life_path, None);
        // mean of {2, 2} only
        assert_eq!(result.scores.global_score, 2);
    }

    #[test]
    fn test_compatibility_uses_last_name_when_present() {
        let with_last = Person::new("Jean").with_last_name("Dupont");
        let without = Person::new("Jean");

        let a = compatibility(&with_last, &without).unwrap();
        assert_eq!(a.person1.expression, 3); // Jean Dupont
        assert_eq!(a.person2.expression, 3); // Jean alone: 30 -> 3
        assert_eq!(a.person1.intimate, a.person2.intimate);
    }

    #[test]
    fn test_compatibility_identical_people_scores_zero() {
        let person = Person::new("Jean")
            .with_last_name("Dupont")
            .with_birth_date("15/03/1990");

        let result = compatibility(&person, &person).unwrap();
        assert_eq!(result.scores.life_path, Some(0));
        assert_eq!(result.scores.expression, 0);
        assert_eq!(result.scores.intimate, 0);
        assert_eq!(result.scores.global_score, 0);
    }

    #[test]
    fn test_compatibility_fails_on_present_but_malformed_date() {
        let alice = Person::new("Alice").with_birth_date("2000-01-01");
        let bob = Person::new("Bob");
        assert!(compatibility(&alice, &bob).is_err());
    }

    #[test]
    fn test_global_score_rounding() {
        // Expression diff 2, intimate diff 2, life path diff 5:
        // mean 3.0 -> 3 when dates differ accordingly.
        let p1 = Person::new("Alice").with_birth_date("01/01/2000"); // lp 4
        let p2 = Person::new("Bob").with_birth_date("09/09/1998"); // 9+9+27->9 = 27 -> 9
        let result = compatibility(&p1, &p2).unwrap();
        assert_eq!(result.person2.life_path, Some(9));
        assert_eq!(result.scores.life_path, Some(5));
        assert_eq!(result.scores.global_score, 3);
    }
}
