//! Rule-based normalizer backed by static word lists.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::normalizer::{NlpError, NormalizedInput, Normalizer};

// =============================================================================
// Cleanup patterns (compiled once, reused across calls)
// =============================================================================

// Everything except word characters, whitespace, and apostrophes becomes a
// space so "hello...world" tokenizes as two words. Apostrophes survive so
// normalized text still matches aliases like "what's your name".
static PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s']").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Function words skipped entirely during tagging. Contractions appear with
// their apostrophes already removed (tokens are bared before lookup).
static STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "am", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "would", "shall",
    "should", "may", "might", "must", "can", "could", "i", "im", "id", "ive",
    "me", "my", "mine", "we", "us", "our", "you", "your", "youre", "yours",
    "he", "him", "his", "she", "her", "it", "its", "they", "them", "their",
    "what", "whats", "which", "who", "whos", "whom", "this", "that", "these",
    "those", "there", "here", "of", "in", "to", "for", "with", "on", "at",
    "from", "by", "about", "as", "into", "and", "but", "or", "not", "no",
    "dont", "cant", "wont", "so", "if", "then", "than", "too", "very",
    "just", "also", "up", "out", "all", "any", "some", "how", "hows", "when",
    "where", "wheres", "why", "please",
];

// Conversational verbs worth keeping as match terms. Greetings stay out of
// the stop list on purpose: "hey there" should still surface "hey".
static VERB_WORDS: &[&str] = &[
    "ask", "build", "chat", "code", "contact", "create", "draw", "email",
    "explain", "find", "give", "go", "greet", "help", "hire", "know",
    "learn", "like", "list", "live", "love", "make", "meet", "play", "read",
    "reach", "run", "say", "see", "show", "speak", "study", "talk", "tell",
    "think", "use", "want", "work", "write",
];

/// Rule-based text normalizer.
///
/// Lowercases and trims, replaces punctuation with spaces, collapses
/// whitespace, then tags each token: stop words are dropped, verb-list
/// members become verbs, and remaining tokens of two or more characters
/// become nouns. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleNormalizer;

impl RuleNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Normalizer for RuleNormalizer {
    fn normalize(&self, raw: &str) -> Result<NormalizedInput, NlpError> {
        let lowered = raw.trim().to_lowercase();
        let no_punct = PUNCT_RE.replace_all(&lowered, " ");
        let text = WHITESPACE_RE
            .replace_all(no_punct.trim(), " ")
            .into_owned();

        let mut nouns = HashSet::new();
        let mut verbs = HashSet::new();
        for token in text.split_whitespace() {
            // Bare form without apostrophes, so "what's" hits the "whats"
            // stop entry and "don't" hits "dont".
            let bare: String = token.chars().filter(|c| *c != '\'').collect();
            if bare.is_empty() || STOP_WORDS.contains(&bare.as_str()) {
                continue;
            }
            if VERB_WORDS.contains(&bare.as_str()) {
                verbs.insert(bare);
            } else if bare.chars().count() >= 2 {
                nouns.insert(bare);
            }
        }

        Ok(NormalizedInput { text, nouns, verbs })
    }
}
