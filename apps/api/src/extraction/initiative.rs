//! Initiative score: a proxy for ownership language ("doer" vs "watcher").

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

pub const ACTION_VERBS: &[&str] = &[
    "led",
    "managed",
    "created",
    "built",
    "developed",
    "designed",
    "architected",
    "delivered",
    "implemented",
    "engineered",
    "spearheaded",
    "deployed",
    "launched",
];

/// Credit per distinct action verb.
pub const VERB_WEIGHT: f64 = 0.2;

static ACTION_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = ACTION_VERBS.join("|");
    Regex::new(&format!(r"\b({alternation})\b")).expect("valid action-verb regex")
});

/// Counts distinct action verbs (whole words only) and maps them to [0, 1].
/// Repeating a verb earns nothing extra; five distinct verbs reach the cap.
pub fn initiative_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let distinct: HashSet<&str> = ACTION_VERB_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();
    (distinct.len() as f64 * VERB_WEIGHT).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_distinct_verbs() {
        let text = "Led the migration, built the CI pipeline and deployed it to production.";
        assert!((initiative_score(text) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_verb_counts_once() {
        let text = "Built a parser. Built a compiler. Built a linker.";
        assert!((initiative_score(text) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_capped_at_one() {
        let text = "Led, managed, created, built, developed and designed services.";
        assert_eq!(initiative_score(text), 1.0);
    }

    #[test]
    fn test_partial_words_do_not_count() {
        // "misled", "rebuilt", "ledger" contain verbs only as fragments
        assert_eq!(initiative_score("misled ledger rebuilt"), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert!((initiative_score("SPEARHEADED the launch") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_no_verbs() {
        assert_eq!(initiative_score("attended meetings"), 0.0);
    }
}
