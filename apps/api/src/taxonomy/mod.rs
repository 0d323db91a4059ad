//! Skill taxonomy: filters noisy noun-phrase candidates down to plausible technical skills.
//!
//! The taxonomy is an explicit value. Callers that need extra domain terms build a new
//! taxonomy with `with_custom_skills` and hand it to the pipeline; nothing is mutated
//! behind the caller's back.

mod terms;

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

pub use terms::{NOISE_PHRASES, TECH_SKILLS};

/// Phrases shorter than this (in characters) are never skills.
pub const MIN_SKILL_LEN: usize = 2;

/// Lower-cases and trims a skill phrase.
pub fn normalize_skill(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// SkillSet
// ────────────────────────────────────────────────────────────────────────────

/// A deduplicated set of normalized skill phrases, iterated in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and inserts a phrase. Returns false if it was too short or already present.
    pub fn insert(&mut self, phrase: &str) -> bool {
        let normalized = normalize_skill(phrase);
        if normalized.chars().count() < MIN_SKILL_LEN {
            return false;
        }
        self.0.insert(normalized)
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.0.contains(&normalize_skill(phrase))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.union(&other.0).cloned().collect())
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for phrase in iter {
            set.insert(phrase.as_ref());
        }
        set
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SkillTaxonomy
// ────────────────────────────────────────────────────────────────────────────

/// Reference vocabulary of technical skills plus a deny-list of filler phrases.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    tech_skills: HashSet<String>,
    noise_phrases: HashSet<String>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkillTaxonomy {
    /// The built-in vocabulary.
    pub fn builtin() -> Self {
        Self {
            tech_skills: TECH_SKILLS.iter().map(|s| s.to_string()).collect(),
            noise_phrases: NOISE_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns a taxonomy that also recognizes `skills`. Blank entries are ignored.
    pub fn with_custom_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for skill in skills {
            let normalized = normalize_skill(skill.as_ref());
            if !normalized.is_empty() {
                self.tech_skills.insert(normalized);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.tech_skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tech_skills.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.tech_skills.contains(&normalize_skill(term))
    }

    /// Filters free-form phrase candidates down to a `SkillSet`.
    ///
    /// Accepts exact taxonomy hits, then falls back to substring containment in either
    /// direction ("python programming" contains "python"). One-letter terms such as "r"
    /// and "c" therefore admit any phrase containing them.
    pub fn validate<I, S>(&self, candidates: I) -> SkillSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated = SkillSet::new();
        for candidate in candidates {
            let normalized = normalize_skill(candidate.as_ref());
            if self.accepts(&normalized) {
                validated.insert(&normalized);
            }
        }
        validated
    }

    fn accepts(&self, normalized: &str) -> bool {
        if self.noise_phrases.contains(normalized) {
            return false;
        }
        if normalized.chars().count() < MIN_SKILL_LEN {
            return false;
        }
        if self.tech_skills.contains(normalized) {
            return true;
        }
        self.tech_skills
            .iter()
            .any(|term| normalized.contains(term.as_str()) || term.contains(normalized))
    }
}
