//! Typed schema for the generated analysis and the soft-fallback parser.
//!
//! The generation service is asked for strict JSON against this schema, but
//! it may answer with free text. Non-empty content therefore always parses:
//! either into the structured sections or into a free-text fallback.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifePathMeaning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorable_environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifePathSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<LifePathMeaning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionInterpretation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub way_of_acting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_talents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relational_posture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<ExpressionInterpretation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerSelfInterpretation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_motivations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerSelfSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<InnerSelfInterpretation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherenceSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_axes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_levers: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConclusionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlook: Option<String>,
}

/// Display-ready analysis. Every section is optional: study types fill
/// different subsets, and free-text answers only carry `introduction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_path: Option<LifePathSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<ExpressionSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_self: Option<InnerSelfSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_coherence: Option<CoherenceSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<ConclusionSection>,
}

impl Analysis {
    /// True when the structured parse found nothing and the fallback did not
    /// fire either (i.e. empty content).
    pub fn is_empty(&self) -> bool {
        self.introduction.is_none()
            && self.life_path.is_none()
            && self.expression.is_none()
            && self.inner_self.is_none()
            && self.overall_coherence.is_none()
            && self.conclusion.is_none()
    }
}

/// Parses generated content: strict JSON first, free text as a fallback
/// carried in `introduction`.
pub fn parse_analysis(raw: &str) -> Analysis {
    match serde_json::from_str::<Analysis>(raw) {
        Ok(analysis) => analysis,
        Err(err) => {
            tracing::warn!("Generated content is not valid JSON ({}), keeping it as free text", err);
            let trimmed = raw.trim();
            Analysis {
                introduction: if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                },
                ..Analysis::default()
            }
        }
    }
}
