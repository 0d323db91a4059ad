//! Scorer: fixed linear blend of skill match, experience, document similarity and initiative.
//!
//! final = 100 × (0.40·match + 0.25·experience + 0.25·similarity + 0.10·initiative)

use serde::Serialize;

use crate::extraction::initiative_score;
use crate::matching::{round2, JobRequirement, MatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringWeights {
    pub skill_match: f64,
    pub experience: f64,
    pub jd_similarity: f64,
    pub initiative: f64,
}

/// The blend is fixed; the weights sum to 1.0.
pub const WEIGHTS: ScoringWeights = ScoringWeights {
    skill_match: 0.40,
    experience: 0.25,
    jd_similarity: 0.25,
    initiative: 0.10,
};

/// Per-resume signals that are not part of the skill match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateSignals {
    pub experience_years: u32,
    /// Whole-document JD/resume cosine similarity.
    pub jd_similarity: f64,
    pub initiative_score: f64,
}

/// The scored outcome for one resume. Numeric fields are authoritative; use
/// `display()` for presentation strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub final_score: f64,
    pub match_ratio: f64,
    pub matched_count: usize,
    pub required_count: usize,
    pub experience_years: u32,
    pub required_years: u32,
    pub experience_ratio: f64,
    pub jd_similarity: f64,
    pub initiative_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Human-readable fields derived from a `ScoreRecord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDisplay {
    /// "matched/total"
    pub skill_match: String,
    /// "X vs Y+"
    pub experience_match: String,
}

impl ScoreRecord {
    pub fn display(&self) -> ScoreDisplay {
        ScoreDisplay {
            skill_match: format!("{}/{}", self.matched_count, self.required_count),
            experience_match: format!("{} vs {}+", self.experience_years, self.required_years),
        }
    }
}

/// Project/initiative score for raw resume text.
pub fn calculate_project_score(text: &str) -> f64 {
    initiative_score(text)
}

/// min(years / required, 1.0), or full credit when the job has no requirement.
pub fn experience_ratio(years: u32, required_years: u32) -> f64 {
    if required_years == 0 {
        return 1.0;
    }
    (f64::from(years) / f64::from(required_years)).min(1.0)
}

pub fn score(
    candidate: &CandidateSignals,
    job: &JobRequirement,
    skill_match: &MatchResult,
) -> ScoreRecord {
    let match_ratio = skill_match.match_ratio.clamp(0.0, 1.0);
    let experience = experience_ratio(candidate.experience_years, job.min_experience_years);
    let similarity = candidate.jd_similarity.clamp(0.0, 1.0);
    let initiative = candidate.initiative_score.clamp(0.0, 1.0);

    let blended = WEIGHTS.skill_match * match_ratio
        + WEIGHTS.experience * experience
        + WEIGHTS.jd_similarity * similarity
        + WEIGHTS.initiative * initiative;

    ScoreRecord {
        final_score: round2(blended * 100.0),
        match_ratio,
        matched_count: skill_match.matched.len(),
        required_count: job.required_skills.len(),
        experience_years: candidate.experience_years,
        required_years: job.min_experience_years,
        experience_ratio: experience,
        jd_similarity: round2(similarity),
        initiative_score: initiative,
        matched_skills: skill_match.matched.clone(),
        missing_skills: skill_match.missing.clone(),
    }
}
