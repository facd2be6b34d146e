//! Exact alias equality matching.

use banter_catalog::ResponseCatalog;

/// First key in catalog order with a trigger equal to `text`,
/// case-insensitively and ignoring surrounding whitespace. Empty input
/// never matches.
pub fn match_alias<'a>(catalog: &'a ResponseCatalog, text: &str) -> Option<&'a str> {
    if text.trim().is_empty() {
        return None;
    }
    catalog
        .iter()
        .find(|entry| entry.matches_alias(text))
        .map(|entry| entry.key.as_str())
}
