use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::split_list;
use crate::errors::AppError;
use crate::explanation::{explain, Explanation};
use crate::matching::{ScoreDisplay, ScoreRecord};
use crate::shortlist::{BatchOutcome, BatchSummary, ResumeFailure, ResumeInput};
use crate::state::AppState;

pub const MAX_JD_CHARS: usize = 10_000;
pub const MAX_SKILLS: usize = 50;
pub const MAX_RESUMES: usize = 20;
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / response models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TextResume {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ShortlistTextRequest {
    pub jd_text: String,
    pub skills: Vec<String>,
    pub resumes: Vec<TextResume>,
}

#[derive(Debug, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub name: String,
    pub score: ScoreRecord,
    pub display: ScoreDisplay,
    pub explanation: Explanation,
    pub preview: String,
}

#[derive(Debug, Serialize)]
pub struct ShortlistResponse {
    pub batch_id: Uuid,
    pub required_skills: Vec<String>,
    pub min_experience_years: u32,
    pub ranked: Vec<RankedCandidate>,
    pub failures: Vec<ResumeFailure>,
    pub summary: BatchSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/shortlist
///
/// Multipart fields: `jd_text`, `skills` (comma-separated), and one `resumes` file
/// part per document.
pub async fn handle_shortlist_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ShortlistResponse>, AppError> {
    let mut jd_text = String::new();
    let mut skills = Vec::new();
    let mut resumes = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "jd_text" => jd_text = read_text_field(field).await?,
            "skills" => skills.extend(split_list(&read_text_field(field).await?)),
            "resumes" => {
                if resumes.len() == MAX_RESUMES {
                    return Err(AppError::Validation(format!(
                        "At most {MAX_RESUMES} resumes per batch"
                    )));
                }
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("resume-{}", resumes.len() + 1));
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                if bytes.len() > MAX_RESUME_BYTES {
                    return Err(AppError::Validation(format!(
                        "'{name}' exceeds the {} MB file limit",
                        MAX_RESUME_BYTES / (1024 * 1024)
                    )));
                }
                resumes.push(ResumeInput::document(name, bytes));
            }
            _ => {}
        }
    }

    shortlist(state, jd_text, skills, resumes).await.map(Json)
}

/// POST /api/v1/shortlist/text
pub async fn handle_shortlist_text(
    State(state): State<AppState>,
    Json(req): Json<ShortlistTextRequest>,
) -> Result<Json<ShortlistResponse>, AppError> {
    let skills: Vec<String> = req
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let resumes = req
        .resumes
        .into_iter()
        .map(|r| ResumeInput::text(r.name, r.text))
        .collect();

    shortlist(state, req.jd_text, skills, resumes).await.map(Json)
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart field: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared flow
// ────────────────────────────────────────────────────────────────────────────

fn validate(jd_text: &str, skills: &[String], resumes: &[ResumeInput]) -> Result<(), AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text is required".to_string()));
    }
    if jd_text.chars().count() > MAX_JD_CHARS {
        return Err(AppError::Validation(format!(
            "jd_text exceeds {MAX_JD_CHARS} characters"
        )));
    }
    if skills.is_empty() {
        return Err(AppError::Validation("At least one required skill is needed".to_string()));
    }
    if skills.len() > MAX_SKILLS {
        return Err(AppError::Validation(format!("At most {MAX_SKILLS} skills allowed")));
    }
    if resumes.is_empty() {
        return Err(AppError::Validation("Upload at least one resume".to_string()));
    }
    if resumes.len() > MAX_RESUMES {
        return Err(AppError::Validation(format!(
            "At most {MAX_RESUMES} resumes per batch"
        )));
    }
    Ok(())
}

async fn shortlist(
    state: AppState,
    jd_text: String,
    skills: Vec<String>,
    resumes: Vec<ResumeInput>,
) -> Result<ShortlistResponse, AppError> {
    validate(&jd_text, &skills, &resumes)?;

    let batch_id = Uuid::new_v4();
    info!(%batch_id, resumes = resumes.len(), skills = skills.len(), "Shortlist batch started");

    let shortlister = state.shortlister.clone();
    let audit = state.audit.clone();
    let outcome: BatchOutcome = tokio::task::spawn_blocking(move || {
        let outcome = shortlister.run_batch(&jd_text, &skills, &resumes)?;
        for event in outcome.audit_events(batch_id) {
            audit.record(&event);
        }
        Ok::<_, AppError>(outcome)
    })
    .await
    .map_err(|e| anyhow!("Scoring task failed: {e}"))??;

    let mut ranked = Vec::with_capacity(outcome.ranked.len());
    for (idx, scored) in outcome.ranked.iter().enumerate() {
        let explanation = explain(state.explainer.as_deref(), &scored.record, &scored.name).await;
        ranked.push(RankedCandidate {
            rank: idx + 1,
            name: scored.name.clone(),
            display: scored.record.display(),
            score: scored.record.clone(),
            explanation,
            preview: scored.preview(),
        });
    }

    Ok(ShortlistResponse {
        batch_id,
        required_skills: outcome.job.requirement.required_list(),
        min_experience_years: outcome.job.requirement.min_experience_years,
        ranked,
        failures: outcome.failures,
        summary: outcome.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resumes(n: usize) -> Vec<ResumeInput> {
        (0..n).map(|i| ResumeInput::text(format!("r{i}.txt"), "python")).collect()
    }

    fn skills(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("skill{i}")).collect()
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let jd = "x".repeat(MAX_JD_CHARS);
        assert!(validate(&jd, &skills(MAX_SKILLS), &resumes(MAX_RESUMES)).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_inputs() {
        assert!(validate("  ", &skills(1), &resumes(1)).is_err());
        assert!(validate("jd", &[], &resumes(1)).is_err());
        assert!(validate("jd", &skills(1), &[]).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_inputs() {
        let jd = "x".repeat(MAX_JD_CHARS + 1);
        assert!(validate(&jd, &skills(1), &resumes(1)).is_err());
        assert!(validate("jd", &skills(MAX_SKILLS + 1), &resumes(1)).is_err());
        assert!(validate("jd", &skills(1), &resumes(MAX_RESUMES + 1)).is_err());
    }
}
