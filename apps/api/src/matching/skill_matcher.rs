//! Semantic skill matcher: required skills vs resume skills by embedding similarity.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::embedding::{cosine_similarity, Embedder, EmbeddingError};
use crate::matching::round2;
use crate::taxonomy::SkillSet;

/// Minimum cosine similarity for a resume skill to cover a required skill.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.7;

/// Which required skills a resume covers. Both lists keep required-skill input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// matched / required, rounded to 2 decimals. 0.0 when nothing is required.
    pub match_ratio: f64,
}

impl MatchResult {
    fn all_missing(required: &[String]) -> Self {
        Self {
            matched: vec![],
            missing: required.to_vec(),
            match_ratio: 0.0,
        }
    }
}

#[derive(Clone)]
pub struct SkillMatcher {
    embedder: Arc<dyn Embedder>,
    threshold: f32,
}

impl SkillMatcher {
    pub fn new(embedder: Arc<dyn Embedder>, threshold: f32) -> Self {
        Self {
            embedder,
            threshold,
        }
    }

    /// A required skill is matched when its best cosine similarity against any resume
    /// skill reaches the threshold.
    pub fn match_skills(
        &self,
        resume_skills: &SkillSet,
        required_skills: &[String],
    ) -> Result<MatchResult, EmbeddingError> {
        if resume_skills.is_empty() || required_skills.is_empty() {
            return Ok(MatchResult::all_missing(required_skills));
        }

        let resume_texts: Vec<&str> = resume_skills.iter().collect();
        let required_texts: Vec<&str> = required_skills.iter().map(String::as_str).collect();

        let resume_vectors = self.embedder.embed(&resume_texts)?;
        let required_vectors = self.embedder.embed(&required_texts)?;

        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for (skill, required_vector) in required_skills.iter().zip(&required_vectors) {
            let best = resume_vectors
                .iter()
                .map(|v| cosine_similarity(required_vector, v))
                .fold(f32::NEG_INFINITY, f32::max);

            debug!(skill = %skill, best_similarity = best, "Skill similarity");

            if best >= self.threshold {
                matched.push(skill.clone());
            } else {
                missing.push(skill.clone());
            }
        }

        let match_ratio = round2(matched.len() as f64 / required_skills.len() as f64);

        Ok(MatchResult {
            matched,
            missing,
            match_ratio,
        })
    }
}
