//! Study orchestration: validate the request, check the usage limit,
//! compute the figures, build the prompt, call the generator and parse the
//! answer into a display-ready report.

use crate::core::date::{html_to_format, is_valid_date};
use crate::core::numbers::{
    expression_breakdown, intimate_breakdown, life_path, life_path_breakdown,
};
use crate::core::studies::{compatibility, forecast, personal_year};
use crate::domain::model::{
    Compatibility, EventWindow, Forecast, Person, PersonalYear, Profile,
};
use crate::domain::ports::AnalysisGenerator;
use crate::generation::analysis::{parse_analysis, Analysis};
use crate::generation::prompts;
use crate::utils::error::{NumeraError, Result};
use crate::utils::rate_limit::{RateLimitDecision, RateLimiter};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_YEAR: u32 = 1900;
pub const MAX_YEAR: u32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum StudyKind {
    Profile,
    PersonalYear,
    LoveCompatibility,
    FamilyCompatibility,
    BusinessCompatibility,
    Forecast,
    OptimalDates,
}

/// One study request as assembled by a front end. Partner and event fields
/// are only meaningful for the study kinds that use them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRequest {
    pub kind: StudyKind,
    pub person: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventWindow>,
}

/// Figures computed for a study, embedded in the report next to the
/// generated analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StudyFigures {
    Profile(Profile),
    PersonalYear { year: u32, result: PersonalYear },
    Compatibility(Compatibility),
    Forecast(Forecast),
    LifePath { life_path: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyReport {
    pub kind: StudyKind,
    pub figures: StudyFigures,
    pub analysis: Analysis,
}

fn validation_error(message: impl Into<String>) -> NumeraError {
    NumeraError::ValidationError {
        message: message.into(),
    }
}

/// Accepts a birth date in either textual form and normalizes it to
/// `DD/MM/YYYY`, rejecting anything that is not a real calendar date.
pub fn normalize_birth_date(input: &str) -> Result<String> {
    let candidate = if input.contains('/') {
        input.to_string()
    } else {
        html_to_format(input)
    };

    if is_valid_date(&candidate) {
        Ok(candidate)
    } else {
        Err(NumeraError::InvalidDate {
            value: input.to_string(),
        })
    }
}

fn validated_person(person: &Person, label: &str, date_required: bool) -> Result<Person> {
    if person.first_name.trim().is_empty() {
        return Err(validation_error(format!("{} first name is required", label)));
    }

    let birth_date = match &person.birth_date {
        Some(date) => Some(normalize_birth_date(date)?),
        None if date_required => {
            return Err(validation_error(format!("{} birth date is required", label)));
        }
        None => None,
    };

    Ok(Person {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        birth_date,
    })
}

fn validated_year(reference_year: Option<u32>) -> Result<u32> {
    let year = reference_year.unwrap_or_else(|| Utc::now().year() as u32);
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(validation_error(format!(
            "reference year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(year)
}

fn validated_event(event: &Option<EventWindow>) -> Result<EventWindow> {
    let window = event
        .as_ref()
        .ok_or_else(|| validation_error("an event window is required for an optimal-dates study"))?;

    if window.event.trim().is_empty() {
        return Err(validation_error("the event description is required"));
    }

    Ok(EventWindow {
        event: window.event.clone(),
        start: normalize_birth_date(&window.start)?,
        end: normalize_birth_date(&window.end)?,
    })
}

/// Full profile figures for one person (requires a birth date).
pub fn compute_profile(person: &Person) -> Result<Profile> {
    let birth_date = person
        .birth_date
        .as_deref()
        .ok_or_else(|| validation_error("a birth date is required for a profile study"))?;

    let last_name = person.last_name.as_deref().unwrap_or("");
    let life_path_breakdown = life_path_breakdown(birth_date)?;
    let expression_breakdown = expression_breakdown(&person.first_name, last_name);
    let intimate_breakdown = intimate_breakdown(&person.first_name);

    Ok(Profile {
        life_path: life_path_breakdown.life_path,
        expression: expression_breakdown.final_number,
        intimate: intimate_breakdown.final_number,
        life_path_breakdown,
        expression_breakdown,
        intimate_breakdown,
    })
}

/// Validates a request and returns the normalized form actually used for
/// computation (dates in canonical form, defaulted reference year).
pub fn validate_request(request: &StudyRequest) -> Result<StudyRequest> {
    let person = validated_person(&request.person, "the requester's", true)?;

    let partner = match request.kind {
        StudyKind::LoveCompatibility
        | StudyKind::FamilyCompatibility
        | StudyKind::BusinessCompatibility => {
            let partner = request
                .partner
                .as_ref()
                .ok_or_else(|| validation_error("a partner is required for a compatibility study"))?;
            // Partner birth date stays optional for reliability reasons.
            Some(validated_person(partner, "the partner's", false)?)
        }
        _ => None,
    };

    let reference_year = match request.kind {
        StudyKind::PersonalYear | StudyKind::Forecast => Some(validated_year(request.reference_year)?),
        _ => None,
    };

    let event = match request.kind {
        StudyKind::OptimalDates => Some(validated_event(&request.event)?),
        _ => None,
    };

    Ok(StudyRequest {
        kind: request.kind,
        person,
        partner,
        reference_year,
        event,
    })
}

/// Computes the deterministic figures for an already-validated request.
/// Public so front ends can display the numbers without any network call.
pub fn compute_figures(request: &StudyRequest) -> Result<StudyFigures> {
    match request.kind {
        StudyKind::Profile => Ok(StudyFigures::Profile(compute_profile(&request.person)?)),
        StudyKind::PersonalYear => {
            let year = validated_year(request.reference_year)?;
            let birth_date = request.person.birth_date.as_deref().ok_or_else(|| {
                validation_error("a birth date is required for a personal-year study")
            })?;
            Ok(StudyFigures::PersonalYear {
                year,
                result: personal_year(birth_date, year)?,
            })
        }
        StudyKind::LoveCompatibility
        | StudyKind::FamilyCompatibility
        | StudyKind::BusinessCompatibility => {
            let partner = request
                .partner
                .as_ref()
                .ok_or_else(|| validation_error("a partner is required for a compatibility study"))?;
            Ok(StudyFigures::Compatibility(compatibility(
                &request.person,
                partner,
            )?))
        }
        StudyKind::Forecast => {
            let year = validated_year(request.reference_year)?;
            let birth_date = request.person.birth_date.as_deref().ok_or_else(|| {
                validation_error("a birth date is required for a forecast study")
            })?;
            Ok(StudyFigures::Forecast(forecast(birth_date, year)?))
        }
        StudyKind::OptimalDates => {
            let birth_date = request.person.birth_date.as_deref().ok_or_else(|| {
                validation_error("a birth date is required for an optimal-dates study")
            })?;
            Ok(StudyFigures::LifePath {
                life_path: life_path(birth_date)?,
            })
        }
    }
}

fn build_prompt(request: &StudyRequest, figures: &StudyFigures) -> Result<String> {
    let prompt = match (request.kind, figures) {
        (StudyKind::Profile, StudyFigures::Profile(profile)) => {
            prompts::profile_prompt(&request.person, profile)
        }
        (StudyKind::PersonalYear, StudyFigures::PersonalYear { year, result }) => {
            prompts::personal_year_prompt(&request.person, *year, result)
        }
        (kind, StudyFigures::Compatibility(result)) => {
            let flavor = match kind {
                StudyKind::FamilyCompatibility => prompts::CompatibilityFlavor::Family,
                StudyKind::BusinessCompatibility => prompts::CompatibilityFlavor::Business,
                _ => prompts::CompatibilityFlavor::Love,
            };
            let partner = request
                .partner
                .as_ref()
                .ok_or_else(|| validation_error("a partner is required for a compatibility study"))?;
            prompts::compatibility_prompt(flavor, &request.person, partner, result)
        }
        (StudyKind::Forecast, StudyFigures::Forecast(result)) => {
            prompts::forecast_prompt(&request.person, result)
        }
        (StudyKind::OptimalDates, StudyFigures::LifePath { life_path }) => {
            let event = request
                .event
                .as_ref()
                .ok_or_else(|| validation_error("an event window is required for an optimal-dates study"))?;
            prompts::optimal_dates_prompt(&request.person, *life_path, event)
        }
        _ => {
            return Err(NumeraError::GenerationError {
                message: "study kind and computed figures do not match".to_string(),
            })
        }
    };
    Ok(prompt)
}

pub struct StudyEngine<G: AnalysisGenerator> {
    generator: G,
    limiter: RateLimiter,
}

impl<G: AnalysisGenerator> StudyEngine<G> {
    pub fn new(generator: G, limiter: RateLimiter) -> Self {
        Self { generator, limiter }
    }

    pub async fn run(&mut self, request: &StudyRequest) -> Result<StudyReport> {
        let request = validate_request(request)?;

        match self.limiter.try_acquire(Utc::now()) {
            RateLimitDecision::Allowed(status) => {
                tracing::debug!(
                    "Usage check passed ({}/{} today)",
                    status.per_day.used,
                    status.per_day.max
                );
            }
            RateLimitDecision::Denied { scope, status } => {
                let resets_at = match scope {
                    crate::utils::rate_limit::LimitScope::Minute => status.per_minute.resets_at,
                    crate::utils::rate_limit::LimitScope::Hour => status.per_hour.resets_at,
                    crate::utils::rate_limit::LimitScope::Day => status.per_day.resets_at,
                };
                return Err(NumeraError::RateLimited {
                    scope: scope.as_str().to_string(),
                    resets_at,
                });
            }
        }

        let figures = compute_figures(&request)?;
        let prompt = build_prompt(&request, &figures)?;
        tracing::info!(
            "Running {:?} study for {}",
            request.kind,
            request.person.first_name
        );

        let raw = self.generator.generate(&prompt).await?;
        let analysis = parse_analysis(&raw);

        Ok(StudyReport {
            kind: request.kind,
            figures,
            analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request(kind: StudyKind) -> StudyRequest {
        StudyRequest {
            kind,
            person: Person::new("Jean")
                .with_last_name("Dupont")
                .with_birth_date("15/03/1990"),
            partner: None,
            reference_year: None,
            event: None,
        }
    }

    #[test]
    fn test_normalize_birth_date_accepts_both_forms() {
        assert_eq!(normalize_birth_date("15/03/1990").unwrap(), "15/03/1990");
        assert_eq!(normalize_birth_date("1990-03-15").unwrap(), "15/03/1990");
        assert!(normalize_birth_date("31/02/1990").is_err());
        assert!(normalize_birth_date("whatever").is_err());
    }

    #[test]
    fn test_validate_requires_first_name() {
        let mut request = base_request(StudyKind::Profile);
        request.person.first_name = "  ".to_string();
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_validate_requires_partner_for_compatibility() {
        let request = base_request(StudyKind::LoveCompatibility);
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_validate_normalizes_partner_html_date() {
        let mut request = base_request(StudyKind::LoveCompatibility);
        request.partner = Some(Person::new("Alice").with_birth_date("2000-01-01"));

        let validated = validate_request(&request).unwrap();
        let partner = validated.partner.unwrap();
        assert_eq!(partner.birth_date.as_deref(), Some("01/01/2000"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_year() {
        let mut request = base_request(StudyKind::PersonalYear);
        request.reference_year = Some(1850);
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_compute_figures_profile() {
        let request = base_request(StudyKind::Profile);
        match compute_figures(&request).unwrap() {
            StudyFigures::Profile(profile) => {
                assert_eq!(profile.life_path, 1);
                assert_eq!(profile.expression, 3);
                assert_eq!(profile.intimate, 3);
            }
            other => panic!("expected profile figures, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_figures_personal_year() {
        let mut request = base_request(StudyKind::PersonalYear);
        request.reference_year = Some(2025);
        match compute_figures(&request).unwrap() {
            StudyFigures::PersonalYear { year, result } => {
                assert_eq!(year, 2025);
                assert_eq!(result.personal_year, 1);
            }
            other => panic!("expected personal-year figures, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_figures_forecast_defaults_reference_year() {
        let request = base_request(StudyKind::Forecast);
        match compute_figures(&request).unwrap() {
            StudyFigures::Forecast(result) => {
                assert_eq!(result.in_three_years.year, result.reference_year + 3);
            }
            other => panic!("expected forecast figures, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_figures_optimal_dates() {
        let mut request = base_request(StudyKind::OptimalDates);
        request.event = Some(EventWindow {
            event: "wedding".to_string(),
            start: "01/06/2026".to_string(),
            end: "30/06/2026".to_string(),
        });
        match compute_figures(&request).unwrap() {
            StudyFigures::LifePath { life_path } => assert_eq!(life_path, 1),
            other => panic!("expected life path figures, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_event_window_dates() {
        let mut request = base_request(StudyKind::OptimalDates);
        request.event = Some(EventWindow {
            event: "wedding".to_string(),
            start: "2026-06-01".to_string(),
            end: "31/02/2026".to_string(),
        });
        assert!(validate_request(&request).is_err());

        request.event = Some(EventWindow {
            event: "wedding".to_string(),
            start: "2026-06-01".to_string(),
            end: "2026-06-30".to_string(),
        });
        let validated = validate_request(&request).unwrap();
        let window = validated.event.unwrap();
        assert_eq!(window.start, "01/06/2026");
        assert_eq!(window.end, "30/06/2026");
    }
}
