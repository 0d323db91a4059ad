//! Batch orchestration: parse the JD once, then extract → parse → match → score each
//! resume in upload order. A JD failure aborts the batch; a resume failure is recorded
//! by name and the batch carries on.
//!
//! Everything here is synchronous and CPU-bound. The HTTP layer runs it on the
//! blocking pool.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::documents::{extract_document_text, ExtractionError};
use crate::embedding::{cosine_similarity, Embedder, EmbeddingError};
use crate::extraction::ParsedDocument;
use crate::matching::{
    calculate_project_score, round2, score, CandidateSignals, JobRequirement, ScoreRecord,
    SkillMatcher,
};
use crate::taxonomy::SkillTaxonomy;

/// Characters of raw resume text returned as a preview.
pub const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Job description is empty")]
    EmptyJobDescription,

    #[error("Failed to embed job description: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Why a single resume was skipped.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Resume contains no usable text")]
    Blank,

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs and outputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum ResumeSource {
    /// An uploaded document; the extension of `ResumeInput::name` picks the extractor.
    Document(Bytes),
    /// Text the caller already extracted.
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ResumeInput {
    pub name: String,
    pub source: ResumeSource,
}

impl ResumeInput {
    pub fn document(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            source: ResumeSource::Document(bytes.into()),
        }
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ResumeSource::Text(text.into()),
        }
    }

    fn raw_text(&self) -> Result<String, ExtractionError> {
        match &self.source {
            ResumeSource::Document(bytes) => extract_document_text(&self.name, bytes),
            ResumeSource::Text(text) => Ok(text.clone()),
        }
    }
}

/// The parsed JD plus everything derived from it once per batch.
#[derive(Debug, Clone)]
pub struct PreparedJob {
    pub document: ParsedDocument,
    pub requirement: JobRequirement,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct ScoredResume {
    pub name: String,
    pub document: ParsedDocument,
    pub record: ScoreRecord,
}

impl ScoredResume {
    /// First `PREVIEW_CHARS` characters of the raw text, with "..." when cut.
    pub fn preview(&self) -> String {
        let raw = &self.document.raw_text;
        match raw.char_indices().nth(PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &raw[..cut]),
            None => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Percentage, two decimals. 0 for an empty batch.
    pub success_rate: f64,
}

impl BatchSummary {
    pub fn new(successful: usize, failed: usize) -> Self {
        let total = successful + failed;
        let success_rate = if total == 0 {
            0.0
        } else {
            round2(successful as f64 / total as f64 * 100.0)
        };
        Self {
            total,
            successful,
            failed,
            success_rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub job: PreparedJob,
    /// Descending by final score; ties keep upload order.
    pub ranked: Vec<ScoredResume>,
    /// Upload order.
    pub failures: Vec<ResumeFailure>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    /// Audit events for the batch: one decision per ranked resume, one error per
    /// failure, then the summary.
    pub fn audit_events(&self, batch_id: Uuid) -> Vec<AuditEvent> {
        let jd_text = &self.job.document.raw_text;
        let mut events: Vec<AuditEvent> = self
            .ranked
            .iter()
            .map(|r| {
                AuditEvent::scoring_decision(
                    batch_id,
                    &r.name,
                    jd_text,
                    &r.document.raw_text,
                    &r.record,
                    &self.job.requirement,
                )
            })
            .collect();
        events.extend(
            self.failures
                .iter()
                .map(|f| AuditEvent::error(batch_id, &f.name, &f.error)),
        );
        events.push(AuditEvent::batch_summary(batch_id, &self.summary));
        events
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shortlister
// ────────────────────────────────────────────────────────────────────────────

/// Holds the shared read-only handles a batch needs. Cheap to clone.
#[derive(Clone)]
pub struct Shortlister {
    taxonomy: Arc<SkillTaxonomy>,
    embedder: Arc<dyn Embedder>,
    matcher: SkillMatcher,
}

impl Shortlister {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, embedder: Arc<dyn Embedder>, threshold: f32) -> Self {
        let matcher = SkillMatcher::new(embedder.clone(), threshold);
        Self {
            taxonomy,
            embedder,
            matcher,
        }
    }

    pub fn prepare_job<S: AsRef<str>>(
        &self,
        jd_text: &str,
        manual_skills: &[S],
    ) -> Result<PreparedJob, PipelineError> {
        let document = ParsedDocument::parse(jd_text, &self.taxonomy);
        if document.is_blank() {
            return Err(PipelineError::EmptyJobDescription);
        }
        let requirement = JobRequirement::from_parsed_jd(&document, manual_skills);
        let embedding = self.embedder.embed_one(&document.cleaned_text)?;

        info!(
            required_skills = requirement.required_skills.len(),
            min_experience_years = requirement.min_experience_years,
            "Job description parsed"
        );

        Ok(PreparedJob {
            document,
            requirement,
            embedding,
        })
    }

    /// Scores one already-parsed resume against the job.
    pub fn score_resume(
        &self,
        job: &PreparedJob,
        resume: &ParsedDocument,
    ) -> Result<ScoreRecord, EmbeddingError> {
        let required = job.requirement.required_list();
        let skill_match = self.matcher.match_skills(&resume.skills, &required)?;

        let resume_embedding = self.embedder.embed_one(&resume.cleaned_text)?;
        let jd_similarity = f64::from(cosine_similarity(&job.embedding, &resume_embedding));

        let signals = CandidateSignals {
            experience_years: resume.experience_years,
            jd_similarity,
            initiative_score: calculate_project_score(&resume.cleaned_text),
        };
        Ok(score(&signals, &job.requirement, &skill_match))
    }

    fn process_resume(&self, job: &PreparedJob, input: &ResumeInput) -> Result<ScoredResume, ResumeError> {
        let raw_text = input.raw_text()?;
        let document = ParsedDocument::parse(raw_text, &self.taxonomy);
        if document.is_blank() {
            return Err(ResumeError::Blank);
        }
        let record = self.score_resume(job, &document)?;
        Ok(ScoredResume {
            name: input.name.clone(),
            document,
            record,
        })
    }

    pub fn run_batch<S: AsRef<str>>(
        &self,
        jd_text: &str,
        manual_skills: &[S],
        resumes: &[ResumeInput],
    ) -> Result<BatchOutcome, PipelineError> {
        let job = self.prepare_job(jd_text, manual_skills)?;

        let mut ranked = Vec::with_capacity(resumes.len());
        let mut failures = Vec::new();

        for (idx, input) in resumes.iter().enumerate() {
            debug!(resume = %input.name, "Processing resume {}/{}", idx + 1, resumes.len());
            match self.process_resume(&job, input) {
                Ok(scored) => {
                    info!(
                        resume = %scored.name,
                        final_score = scored.record.final_score,
                        "Resume scored"
                    );
                    ranked.push(scored);
                }
                Err(e) => {
                    warn!(resume = %input.name, error = %e, "Failed to process resume");
                    failures.push(ResumeFailure {
                        name: input.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        // sort_by is stable, so equal scores keep upload order
        ranked.sort_by(|a, b| b.record.final_score.total_cmp(&a.record.final_score));

        let summary = BatchSummary::new(ranked.len(), failures.len());
        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Batch complete"
        );

        Ok(BatchOutcome {
            job,
            ranked,
            failures,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashedEmbedder;

    const JD: &str = "Senior Backend Engineer. 3+ years of experience with Python, Docker and \
        PostgreSQL. Kubernetes is a plus.";

    const STRONG: &str = "Backend developer, 2016 - 2022. Skills: Python, Docker, Kubernetes, \
        PostgreSQL. Built Python services, deployed Docker images, led the migration and \
        automated releases.";

    const WEAK: &str = "Office administrator. Organised meetings and answered phones.";

    fn shortlister() -> Shortlister {
        Shortlister::new(
            Arc::new(SkillTaxonomy::builtin()),
            Arc::new(HashedEmbedder::new(256).unwrap()),
            0.7,
        )
    }

    #[test]
    fn test_prepare_job_merges_manual_skills() {
        let job = shortlister().prepare_job(JD, &["Terraform"]).unwrap();
        assert!(job.requirement.required_skills.contains("python"));
        assert!(job.requirement.required_skills.contains("terraform"));
        assert_eq!(job.requirement.min_experience_years, 3);
        assert_eq!(job.embedding.len(), 256);
    }

    #[test]
    fn test_blank_job_description_aborts_batch() {
        let err = shortlister()
            .run_batch("  \n ", &["python"], &[ResumeInput::text("a.txt", STRONG)])
            .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyJobDescription));
    }

    #[test]
    fn test_batch_ranks_descending() {
        let resumes = vec![
            ResumeInput::text("weak.txt", WEAK),
            ResumeInput::text("strong.txt", STRONG),
        ];
        let outcome = shortlister().run_batch(JD, &["python"], &resumes).unwrap();

        assert_eq!(outcome.ranked.len(), 2);
        assert_eq!(outcome.ranked[0].name, "strong.txt");
        assert!(outcome.ranked[0].record.final_score > outcome.ranked[1].record.final_score);
        assert!(outcome.ranked[0].record.matched_skills.contains(&"python".to_string()));
        assert_eq!(outcome.ranked[0].record.experience_years, 6);
        assert_eq!(outcome.summary.success_rate, 100.0);
    }

    #[test]
    fn test_equal_scores_keep_upload_order() {
        let resumes = vec![
            ResumeInput::text("first.txt", STRONG),
            ResumeInput::text("second.txt", STRONG),
        ];
        let outcome = shortlister().run_batch(JD, &["python"], &resumes).unwrap();
        assert_eq!(outcome.ranked[0].name, "first.txt");
        assert_eq!(outcome.ranked[1].name, "second.txt");
    }

    #[test]
    fn test_failed_resumes_are_isolated() {
        let resumes = vec![
            ResumeInput::document("notes.xlsx", vec![1u8, 2, 3]),
            ResumeInput::text("strong.txt", STRONG),
            ResumeInput::text("blank.txt", " \t "),
        ];
        let outcome = shortlister().run_batch(JD, &["python"], &resumes).unwrap();

        assert_eq!(outcome.ranked.len(), 1);
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.failures[0].name, "notes.xlsx");
        assert!(outcome.failures[0].error.contains("Unsupported"));
        assert_eq!(outcome.failures[1].name, "blank.txt");
        assert_eq!(
            outcome.summary,
            BatchSummary {
                total: 3,
                successful: 1,
                failed: 2,
                success_rate: 33.33
            }
        );
    }

    #[test]
    fn test_all_failures_yield_empty_ranking() {
        let resumes = vec![ResumeInput::text("blank.txt", "")];
        let outcome = shortlister().run_batch(JD, &["python"], &resumes).unwrap();
        assert!(outcome.ranked.is_empty());
        assert_eq!(outcome.summary.success_rate, 0.0);
    }

    #[test]
    fn test_document_resume_is_extracted() {
        let resumes = vec![ResumeInput::document("cv.txt", STRONG.as_bytes().to_vec())];
        let outcome = shortlister().run_batch(JD, &["python"], &resumes).unwrap();
        assert_eq!(outcome.ranked.len(), 1);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = format!("{STRONG} {}", "é".repeat(PREVIEW_CHARS));
        let outcome = shortlister()
            .run_batch(JD, &["python"], &[ResumeInput::text("long.txt", long)])
            .unwrap();
        let preview = outcome.ranked[0].preview();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_audit_events_cover_batch() {
        let resumes = vec![
            ResumeInput::text("strong.txt", STRONG),
            ResumeInput::text("blank.txt", ""),
        ];
        let outcome = shortlister().run_batch(JD, &["python"], &resumes).unwrap();
        let events = outcome.audit_events(Uuid::nil());

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], AuditEvent::ScoringDecision { .. }));
        assert!(matches!(events[1], AuditEvent::Error { .. }));
        assert!(matches!(events[2], AuditEvent::BatchSummary { total_resumes: 2, .. }));
    }
}
