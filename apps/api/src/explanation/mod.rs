//! Explanation: turns a `ScoreRecord` into a short prose rationale for recruiters.
//!
//! Generation goes through an `ExplanationGenerator` (Gemini in production). The
//! generator is optional in `AppState`; when it is absent or fails, `explain` falls
//! back to a deterministic summary built from the record. That fallback is applied
//! here and nowhere else.

mod prompts;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::ScoreRecord;

/// Where the explanation text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub text: String,
    pub source: ExplanationSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Option<Arc<dyn ExplanationGenerator>>`.
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    async fn generate(&self, record: &ScoreRecord, candidate_name: &str)
        -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiExplainer
// ────────────────────────────────────────────────────────────────────────────

/// The evaluation data handed to the model. Mirrors what recruiters see.
#[derive(Debug, Serialize)]
struct EvaluationData<'a> {
    final_score: f64,
    skill_match: String,
    experience_match: String,
    jd_similarity: f64,
    initiative_score: f64,
    matched_skills: &'a [String],
    missing_skills: &'a [String],
}

impl<'a> From<&'a ScoreRecord> for EvaluationData<'a> {
    fn from(record: &'a ScoreRecord) -> Self {
        let display = record.display();
        Self {
            final_score: record.final_score,
            skill_match: display.skill_match,
            experience_match: display.experience_match,
            jd_similarity: record.jd_similarity,
            initiative_score: record.initiative_score,
            matched_skills: &record.matched_skills,
            missing_skills: &record.missing_skills,
        }
    }
}

pub struct GeminiExplainer {
    llm: LlmClient,
}

impl GeminiExplainer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ExplanationGenerator for GeminiExplainer {
    async fn generate(
        &self,
        record: &ScoreRecord,
        candidate_name: &str,
    ) -> Result<String, LlmError> {
        let data = EvaluationData::from(record);
        // Serializing plain numbers and strings cannot fail.
        let evaluation_json = serde_json::to_string_pretty(&data).unwrap_or_default();
        let prompt = prompts::explanation_user_prompt(candidate_name, &evaluation_json);

        let text = self
            .llm
            .call_text(&prompt, &prompts::explanation_system_prompt())
            .await?;
        Ok(text.trim().to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Produces an explanation for one candidate. Never fails.
pub async fn explain(
    generator: Option<&dyn ExplanationGenerator>,
    record: &ScoreRecord,
    candidate_name: &str,
) -> Explanation {
    let Some(generator) = generator else {
        return fallback(record);
    };

    match generator.generate(record, candidate_name).await {
        Ok(text) if !text.trim().is_empty() => Explanation {
            text,
            source: ExplanationSource::Generated,
        },
        Ok(_) => {
            warn!(candidate = candidate_name, "Explanation generator returned empty text");
            fallback(record)
        }
        Err(e) => {
            warn!(candidate = candidate_name, error = %e, "Explanation generation failed, using fallback");
            fallback(record)
        }
    }
}

fn fallback(record: &ScoreRecord) -> Explanation {
    Explanation {
        text: fallback_text(record),
        source: ExplanationSource::Fallback,
    }
}

/// Deterministic summary assembled from the record's fields.
pub fn fallback_text(record: &ScoreRecord) -> String {
    let display = record.display();
    let matched = join_or(&record.matched_skills, "none");
    let missing = join_or(&record.missing_skills, "none");

    format!(
        "Overall score {:.2}/100. Matched {} required skills ({}); missing: {}. \
         Experience {} years. Similarity to the job description {:.2}, initiative score {:.2}.",
        record.final_score,
        display.skill_match,
        matched,
        missing,
        display.experience_match,
        record.jd_similarity,
        record.initiative_score,
    )
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}
