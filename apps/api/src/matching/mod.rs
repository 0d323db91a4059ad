//! Matching and scoring: semantic skill overlap plus the weighted final score.

pub mod scorer;
pub mod skill_matcher;

use serde::Serialize;

use crate::extraction::ParsedDocument;
use crate::taxonomy::SkillSet;

pub use scorer::{calculate_project_score, score, CandidateSignals, ScoreDisplay, ScoreRecord};
pub use skill_matcher::{MatchResult, SkillMatcher, DEFAULT_MATCH_THRESHOLD};

/// What the job asks for. Built once per batch from the parsed JD plus manual skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRequirement {
    pub required_skills: SkillSet,
    pub min_experience_years: u32,
}

impl JobRequirement {
    /// Unions the taxonomy-filtered JD skills with the manually supplied ones.
    /// Manual skills are normalized but not filtered: the user said they matter.
    pub fn from_parsed_jd<S: AsRef<str>>(jd: &ParsedDocument, manual_skills: &[S]) -> Self {
        let manual: SkillSet = manual_skills.iter().map(|s| s.as_ref()).collect();
        Self {
            required_skills: jd.skills.union(&manual),
            min_experience_years: jd.experience_years,
        }
    }

    /// Required skills in matching order.
    pub fn required_list(&self) -> Vec<String> {
        self.required_skills.to_vec()
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
