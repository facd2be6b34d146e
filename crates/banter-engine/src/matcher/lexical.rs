//! Noun/verb term matching.

use std::collections::HashSet;

use banter_catalog::ResponseCatalog;

/// First key in catalog order with a trigger present in `nouns ∪ verbs`.
///
/// Terms come from the normalizer one word at a time, so multi-word
/// aliases never match at this stage. Empty sets match nothing.
pub fn match_terms<'a>(
    catalog: &'a ResponseCatalog,
    nouns: &HashSet<String>,
    verbs: &HashSet<String>,
) -> Option<&'a str> {
    if nouns.is_empty() && verbs.is_empty() {
        return None;
    }
    for entry in catalog.iter() {
        for alias in entry.alias_candidates() {
            let term = alias.trim().to_lowercase();
            if nouns.contains(&term) || verbs.contains(&term) {
                return Some(entry.key.as_str());
            }
        }
    }
    None
}
