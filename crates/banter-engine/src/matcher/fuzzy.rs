//! Fuzzy similarity matching over an alias index.

use banter_catalog::ResponseCatalog;
use tracing::debug;

/// One fuzzy candidate: an entry key and its distance from the query.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyHit {
    pub key: String,
    /// Distance in [0, 1]; 0.0 is an exact match.
    pub score: f64,
}

/// Similarity index over every (key, alias) trigger pair in the catalog.
///
/// Built exactly once after the catalog is installed and never rebuilt.
/// Pairs are indexed in catalog order, key before document aliases, and
/// that order is the tie-break: the stable sort keeps equal scores in
/// build order, so the earliest-indexed alias wins.
#[derive(Debug, Default)]
pub struct FuzzyIndex {
    entries: Vec<IndexedAlias>,
    threshold: f64,
}

#[derive(Debug, Clone)]
struct IndexedAlias {
    key: String,
    /// Lowercased at build so searches compare in one case.
    alias: String,
}

impl FuzzyIndex {
    /// Index with nothing in it. `search` yields no candidates.
    pub fn unbuilt() -> Self {
        Self::default()
    }

    /// Index every trigger pair of `catalog` in document order.
    pub fn build(catalog: &ResponseCatalog, threshold: f64) -> Self {
        let mut entries = Vec::new();
        for entry in catalog.iter() {
            for alias in entry.alias_candidates() {
                entries.push(IndexedAlias {
                    key: entry.key.clone(),
                    alias: alias.trim().to_lowercase(),
                });
            }
        }
        debug!(pairs = entries.len(), threshold, "Fuzzy index built");
        Self { entries, threshold }
    }

    /// All eligible candidates for `query`, most similar first.
    ///
    /// A candidate is eligible when its Jaro-Winkler distance is strictly
    /// under the threshold.
    pub fn search(&self, query: &str) -> Vec<FuzzyHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || self.entries.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<FuzzyHit> = self
            .entries
            .iter()
            .map(|pair| FuzzyHit {
                key: pair.key.clone(),
                score: 1.0 - strsim::jaro_winkler(&needle, &pair.alias),
            })
            .filter(|hit| hit.score < self.threshold)
            .collect();
        hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }

    /// Best eligible candidate, if any.
    pub fn best(&self, query: &str) -> Option<FuzzyHit> {
        self.search(query).into_iter().next()
    }

    /// Number of indexed trigger pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
