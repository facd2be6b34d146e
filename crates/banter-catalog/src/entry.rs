//! Catalog entry model: reply payloads and their trigger aliases.

use serde::Deserialize;

/// Reply payload for a catalog entry.
///
/// A `Scalar` is returned verbatim on every hit. `Variants` holds a set of
/// interchangeable phrasings that the selector draws from at random, with
/// anti-repeat tracking per key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReplyText {
    Scalar(String),
    Variants(Vec<String>),
}

impl ReplyText {
    /// Number of distinct replies this payload can produce.
    pub fn variant_count(&self) -> usize {
        match self {
            ReplyText::Scalar(_) => 1,
            ReplyText::Variants(v) => v.len(),
        }
    }

    pub fn is_variants(&self) -> bool {
        matches!(self, ReplyText::Variants(_))
    }
}

/// One entry of the response catalog.
///
/// `aliases` holds only the additional trigger phrases from the document;
/// the key itself is always a trigger (see [`ResponseEntry::alias_candidates`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    pub key: String,
    pub aliases: Vec<String>,
    pub text: ReplyText,
    pub description: Option<String>,
}

impl ResponseEntry {
    /// Convenience constructor for a scalar entry with no extra aliases.
    pub fn scalar(key: &str, text: &str) -> Self {
        Self {
            key: key.to_string(),
            aliases: Vec::new(),
            text: ReplyText::Scalar(text.to_string()),
            description: None,
        }
    }

    /// Trigger phrases in match priority order: the key first, then the
    /// document's aliases. An alias that merely restates the key is skipped
    /// so each trigger appears once.
    pub fn alias_candidates(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.key.as_str()).chain(
            self.aliases
                .iter()
                .map(String::as_str)
                .filter(move |a| !a.eq_ignore_ascii_case(&self.key)),
        )
    }

    /// Case-insensitive, trimmed equality of `text` against any trigger.
    pub fn matches_alias(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.alias_candidates()
            .any(|a| a.trim().to_lowercase() == needle)
    }

    /// Whether the help listing should include this entry.
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}
