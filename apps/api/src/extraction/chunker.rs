//! Rule-based noun-phrase chunker.
//!
//! Splits text into runs of content words. Chunks break at punctuation, function words
//! and common verbs; determiners open a new chunk and stay attached to it so that
//! filler like "the team" surfaces intact for the noise filter.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Longest chunk (in words) kept as a skill candidate.
pub const MAX_CHUNK_WORDS: usize = 4;

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "our", "your", "their", "his", "her", "its", "my", "this", "that",
        "these", "those", "some", "any", "each", "every", "all", "both",
    ]
    .into_iter()
    .collect()
});

static BREAK_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // conjunctions and prepositions
        "and", "or", "but", "nor", "so", "yet", "with", "without", "within", "of", "in", "on",
        "at", "to", "for", "from", "by", "into", "onto", "over", "under", "about", "across",
        "through", "via", "per", "as", "than", "like", "including", "such", "between",
        "among", "during", "after", "before", "while", "since", "until", "upon", "against",
        // pronouns
        "i", "we", "you", "he", "she", "it", "they", "me", "us", "him", "them", "who",
        "whom", "which", "what", "where", "when", "why", "how", "whose",
        // auxiliaries and common verbs
        "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had",
        "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may",
        "might", "must", "need", "needs", "require", "requires", "required", "seeking",
        "looking", "use", "uses", "used", "using", "work", "works", "worked", "working",
        "join", "help", "helped", "ensure", "build", "design", "develop", "lead", "manage",
        "led", "managed", "created", "built", "developed", "designed", "architected",
        "delivered", "implemented", "engineered", "spearheaded", "deployed", "launched",
        "improved", "maintained", "collaborated", "partnered", "contributed", "owned",
        "drove", "reduced", "increased", "migrated", "wrote", "supported", "ran",
        // adverbs and negation
        "not", "no", "also", "very", "well", "highly", "strongly", "preferably", "ideally",
        "etc", "e.g", "i.e",
    ]
    .into_iter()
    .collect()
});

const LEADING_PUNCT: &[char] = &['(', '[', '{', '"', '\'', '`', '*', '<'];
const TRAILING_PUNCT: &[char] = &[',', ';', ':', '.', '!', '?', ')', ']', '}', '"', '\'', '`', '*', '>'];

/// Extracts candidate noun phrases of at most `MAX_CHUNK_WORDS` words, in first-seen order.
pub fn noun_phrases(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut phrases: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut current: Vec<&str> = Vec::new();

    for raw in lowered.split_whitespace() {
        let without_leading = raw.trim_start_matches(LEADING_PUNCT);
        let word = without_leading.trim_end_matches(TRAILING_PUNCT);
        let breaks_before = without_leading.len() != raw.len();
        let breaks_after = word.len() != without_leading.len();

        if breaks_before {
            flush(&mut current, &mut phrases, &mut seen);
        }

        if word.is_empty() || !word.chars().any(|c| c.is_alphanumeric()) {
            flush(&mut current, &mut phrases, &mut seen);
            continue;
        }

        if BREAK_WORDS.contains(word) {
            flush(&mut current, &mut phrases, &mut seen);
        } else if DETERMINERS.contains(word) {
            flush(&mut current, &mut phrases, &mut seen);
            current.push(word);
        } else {
            current.push(word);
        }

        if breaks_after {
            flush(&mut current, &mut phrases, &mut seen);
        }
    }
    flush(&mut current, &mut phrases, &mut seen);

    phrases
}

fn flush(current: &mut Vec<&str>, phrases: &mut Vec<String>, seen: &mut HashSet<String>) {
    if let Some(phrase) = finish_chunk(current) {
        if seen.insert(phrase.clone()) {
            phrases.push(phrase);
        }
    }
    current.clear();
}

fn finish_chunk(words: &[&str]) -> Option<String> {
    if words.is_empty() || words.len() > MAX_CHUNK_WORDS {
        return None;
    }
    if words.iter().all(|w| DETERMINERS.contains(*w)) {
        return None;
    }
    Some(words.join(" "))
}
