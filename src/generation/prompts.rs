//! Prompt builders for the text-generation service.
//!
//! Every builder embeds the deterministic figures and the step-by-step
//! arithmetic so the generated text can explain the calculations, and closes
//! with the strict-JSON schema the parser expects.

use crate::core::reduce::reduce_keeping_master;
use crate::domain::model::{
    Compatibility, EventWindow, Forecast, NameBreakdown, Person, PersonalYear, Profile,
    ProfileNumbers,
};

const TONE_GUIDELINES: &str = "\
General constraints:
- Professional, serious and accessible tone, for an adult audience interested in self-knowledge
- Explain the calculations step by step, in an understandable way
- No excessive mystical or esoteric references
- Pragmatic approach: personality, potential, life cycles and growth areas
- Fluent, structured, credible and useful language";

const JSON_SCHEMA_BLOCK: &str = r#"Answer in strict JSON with this structure:

{
  "introduction": "Short paragraph presenting the study and what it covers.",
  "lifePath": {
    "calculation": "Step-by-step explanation of the calculation",
    "meaning": {
      "personality": "Main personality tendencies",
      "strengths": "Natural strengths",
      "challenges": "Recurring challenges",
      "favorableEnvironment": "Type of favorable environment"
    }
  },
  "expression": {
    "calculation": "How letters convert to values, the total and its reduction",
    "interpretation": {
      "wayOfActing": "Way of acting",
      "dominantTalents": "Dominant talents",
      "relationalPosture": "Relational and professional posture"
    }
  },
  "innerSelf": {
    "calculation": "Explanation of the calculation",
    "interpretation": {
      "deepMotivations": "Deep motivations, inner needs, unconscious drivers"
    }
  },
  "overallCoherence": {
    "analysis": "Coherence or tensions between the three numbers",
    "developmentAxes": "Main personal development axes",
    "growthLevers": "Levers for growth and decision making"
  },
  "conclusion": {
    "summary": "Clear summary of the profile",
    "guidance": "Concrete guidance (personal, professional or strategic)",
    "outlook": "Forward-looking conclusion, without rigid predictions"
  }
}

Important:
- Original, structured content, no vague filler
- Do not ask the user any question
- Answer ONLY with the JSON, nothing before or after."#;

fn letters_display(breakdown: &NameBreakdown) -> String {
    breakdown
        .letters
        .iter()
        .map(|detail| format!("{}({})", detail.letter, detail.value))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn person_display(person: &Person) -> String {
    match &person.birth_date {
        Some(date) => format!("{}, born {}", person.full_name(), date),
        None => person.full_name(),
    }
}

fn numbers_display(label: &str, numbers: &ProfileNumbers) -> String {
    let life_path = match numbers.life_path {
        Some(n) => n.to_string(),
        None => "unknown (birth date not provided)".to_string(),
    };
    format!(
        "{}: life path {}, expression {}, inner self {}",
        label, life_path, numbers.expression, numbers.intimate
    )
}

/// Full-profile study prompt, showing the per-letter sums and the life path
/// arithmetic including the intermediate (possibly master) year sum.
pub fn profile_prompt(person: &Person, profile: &Profile) -> String {
    let lp = &profile.life_path_breakdown;
    let reduced_year_sum = reduce_keeping_master(lp.year_digit_sum);
    let intermediate_total = lp.reduced_day + lp.reduced_month + reduced_year_sum;

    format!(
        "You are an expert in modern numerology, with an analytical, structured and pedagogical approach.

From the following information:
- Name: {last}
- First name: {first}
- Birth date: {date} (DD/MM/YYYY format)

Your mission is to produce a complete, clear and relevant numerology study.

{tone}

**Calculation details:**

Life path:
- Date: {day}/{month}/{year}
- Reduced day: {day} -> {reduced_day}
- Reduced month: {month} -> {reduced_month}
- Reduced year: {year} -> {year_sum} -> {reduced_year_sum}
- Life path: {reduced_day} + {reduced_month} + {reduced_year_sum} = {intermediate} -> {life_path}

Expression number ({full_name}):
- Calculation: {expression_letters}
- Total: {expression_sum}
- Reduction: {expression_sum} -> {expression}

Inner-self number ({first}):
- Calculation: {intimate_letters}
- Total: {intimate_sum}
- Reduction: {intimate_sum} -> {intimate}

{schema}",
        last = person.last_name.as_deref().unwrap_or(""),
        first = person.first_name,
        date = person.birth_date.as_deref().unwrap_or(""),
        tone = TONE_GUIDELINES,
        day = lp.day,
        month = lp.month,
        year = lp.year,
        reduced_day = lp.reduced_day,
        reduced_month = lp.reduced_month,
        year_sum = lp.year_digit_sum,
        reduced_year_sum = reduced_year_sum,
        intermediate = intermediate_total,
        life_path = profile.life_path,
        full_name = person.full_name(),
        expression_letters = letters_display(&profile.expression_breakdown),
        expression_sum = profile.expression_breakdown.sum,
        expression = profile.expression,
        intimate_letters = letters_display(&profile.intimate_breakdown),
        intimate_sum = profile.intimate_breakdown.sum,
        intimate = profile.intimate,
        schema = JSON_SCHEMA_BLOCK,
    )
}

/// Personal-year study prompt for one target year.
pub fn personal_year_prompt(person: &Person, year: u32, result: &PersonalYear) -> String {
    format!(
        "You are an expert in modern numerology.

Produce a personal-year study for {person} for the year {year}.

{tone}

**Calculation details:**
- Life path: {life_path}
- Universal year: {year} -> {year_sum} -> {universal}
- Personal year: {life_path} + {universal} -> {personal}

Focus the analysis on the dominant themes, opportunities and points of
attention of personal year {personal}, month by month where relevant.

{schema}",
        person = person_display(person),
        year = year,
        tone = TONE_GUIDELINES,
        life_path = result.life_path,
        year_sum = result.details.year_digit_sum,
        universal = result.universal_year,
        personal = result.personal_year,
        schema = JSON_SCHEMA_BLOCK,
    )
}

/// Relationship flavor of a compatibility study; it only changes the framing
/// of the request, the arithmetic is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatibilityFlavor {
    Love,
    Family,
    Business,
}

impl CompatibilityFlavor {
    fn focus(&self) -> &'static str {
        match self {
            CompatibilityFlavor::Love => {
                "an emotional and romantic relationship: complicity, communication, long-term balance"
            }
            CompatibilityFlavor::Family => {
                "a family bond: mutual understanding, transmission, handling of disagreements"
            }
            CompatibilityFlavor::Business => {
                "a professional collaboration: complementary skills, decision making, shared ambitions"
            }
        }
    }
}

/// Compatibility study prompt for two people.
pub fn compatibility_prompt(
    flavor: CompatibilityFlavor,
    person1: &Person,
    person2: &Person,
    result: &Compatibility,
) -> String {
    let life_path_diff = match result.scores.life_path {
        Some(diff) => diff.to_string(),
        None => "not comparable (a birth date is missing)".to_string(),
    };

    format!(
        "You are an expert in modern numerology.

Produce a compatibility study between {p1} and {p2}, focused on {focus}.

{tone}

**Computed numbers:**
- {numbers1}
- {numbers2}

**Differences per axis (lower means closer):**
- Life path: {life_path_diff}
- Expression: {expression_diff}
- Inner self: {intimate_diff}
- Global score: {global} (0 means identical numbers on every compared axis)

{schema}",
        p1 = person_display(person1),
        p2 = person_display(person2),
        focus = flavor.focus(),
        tone = TONE_GUIDELINES,
        numbers1 = numbers_display("Person 1", &result.person1),
        numbers2 = numbers_display("Person 2", &result.person2),
        life_path_diff = life_path_diff,
        expression_diff = result.scores.expression,
        intimate_diff = result.scores.intimate,
        global = result.scores.global_score,
        schema = JSON_SCHEMA_BLOCK,
    )
}

/// 3-6-9 year forecast prompt.
pub fn forecast_prompt(person: &Person, forecast: &Forecast) -> String {
    format!(
        "You are an expert in modern numerology.

Produce a 3-6-9 year forecast for {person}, from reference year {reference}.

{tone}

**Computed personal years:**
- {y3}: personal year {p3}
- {y6}: personal year {p6}
- {y9}: personal year {p9}

Describe the overall trajectory across the three milestones and what each
period favors.

{schema}",
        person = person_display(person),
        reference = forecast.reference_year,
        tone = TONE_GUIDELINES,
        y3 = forecast.in_three_years.year,
        p3 = forecast.in_three_years.personal_year,
        y6 = forecast.in_six_years.year,
        p6 = forecast.in_six_years.personal_year,
        y9 = forecast.in_nine_years.year,
        p9 = forecast.in_nine_years.personal_year,
        schema = JSON_SCHEMA_BLOCK,
    )
}

/// Optimal-dates prompt: the date selection itself is delegated to the
/// generation service, anchored on the computed life path.
pub fn optimal_dates_prompt(person: &Person, life_path: u32, window: &EventWindow) -> String {
    format!(
        "You are an expert in modern numerology.

{person} is planning: {event}, between {start} and {end} (DD/MM/YYYY).
Their life path number is {life_path}.

Suggest the most favorable dates within that window and explain why each
suggested date resonates with the profile.

{tone}

{schema}",
        person = person_display(person),
        event = window.event,
        start = window.start,
        end = window.end,
        life_path = life_path,
        tone = TONE_GUIDELINES,
        schema = JSON_SCHEMA_BLOCK,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::study::compute_profile;

    fn jean() -> Person {
        Person::new("Jean")
            .with_last_name("Dupont")
            .with_birth_date("15/03/1990")
    }

    #[test]
    fn test_profile_prompt_embeds_calculation_details() {
        let person = jean();
        let profile = compute_profile(&person).unwrap();
        let prompt = profile_prompt(&person, &profile);

        assert!(prompt.contains("Jean"));
        assert!(prompt.contains("Dupont"));
        assert!(prompt.contains("15/03/1990"));
        // per-letter expression sum and totals
        assert!(prompt.contains("J(10)"));
        assert!(prompt.contains("Total: 120"));
        assert!(prompt.contains("120 -> 3"));
        // life path arithmetic with the unreduced year sum shown
        assert!(prompt.contains("1990 -> 19 -> 1"));
        assert!(prompt.contains("6 + 3 + 1 = 10 -> 1"));
        assert!(prompt.contains("Answer ONLY with the JSON"));
    }

    #[test]
    fn test_compatibility_prompt_mentions_missing_date() {
        use crate::core::studies::compatibility;

        let alice = Person::new("Alice").with_birth_date("01/01/2000");
        let bob = Person::new("Bob");
        let result = compatibility(&alice, &bob).unwrap();
        let prompt = compatibility_prompt(CompatibilityFlavor::Love, &alice, &bob, &result);

        assert!(prompt.contains("not comparable"));
        assert!(prompt.contains("Global score: 2"));
        assert!(prompt.contains("romantic"));
    }

    #[test]
    fn test_forecast_prompt_lists_milestones() {
        use crate::core::studies::forecast;

        let person = jean();
        let result = forecast("15/03/1990", 2024).unwrap();
        let prompt = forecast_prompt(&person, &result);

        assert!(prompt.contains("2027"));
        assert!(prompt.contains("2030"));
        assert!(prompt.contains("2033"));
    }
}
