//! Text feature extraction: skills, years of experience and initiative from plain text.
//!
//! The same extractor runs on the job description and on every resume so that both
//! sides of a match are described by identical feature semantics.

pub mod chunker;
pub mod experience;
pub mod initiative;

use serde::Serialize;

use crate::documents::clean_text;
use crate::taxonomy::{SkillSet, SkillTaxonomy};

pub use experience::extract_experience;
pub use initiative::initiative_score;

/// Features derived from one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFeatures {
    pub skills: SkillSet,
    pub experience_years: u32,
    pub initiative_score: f64,
}

/// Chunks the text into noun phrases of at most four words and keeps those the taxonomy accepts.
pub fn extract_skills(text: &str, taxonomy: &SkillTaxonomy) -> SkillSet {
    taxonomy.validate(chunker::noun_phrases(text))
}

pub fn extract(text: &str, taxonomy: &SkillTaxonomy) -> TextFeatures {
    TextFeatures {
        skills: extract_skills(text, taxonomy),
        experience_years: extract_experience(text),
        initiative_score: initiative_score(text),
    }
}

/// A JD or resume after feature extraction. Built once and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    #[serde(skip)]
    pub raw_text: String,
    pub cleaned_text: String,
    pub skills: SkillSet,
    pub experience_years: u32,
    pub initiative_score: f64,
}

impl ParsedDocument {
    pub fn parse(raw_text: impl Into<String>, taxonomy: &SkillTaxonomy) -> Self {
        let raw_text = raw_text.into();
        let cleaned_text = clean_text(&raw_text);
        let TextFeatures {
            skills,
            experience_years,
            initiative_score,
        } = extract(&cleaned_text, taxonomy);

        Self {
            raw_text,
            cleaned_text,
            skills,
            experience_years,
            initiative_score,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.cleaned_text.is_empty()
    }
}
