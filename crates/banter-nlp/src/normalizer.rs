//! Normalizer contract and the best-effort degrade path.

use std::collections::HashSet;

use banter_core::BanterError;
use tracing::debug;

/// Output of input normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedInput {
    /// Lowercased, trimmed, punctuation-stripped text.
    pub text: String,
    /// Open-class words tagged as nouns. May be empty.
    pub nouns: HashSet<String>,
    /// Words tagged as verbs. May be empty.
    pub verbs: HashSet<String>,
}

impl NormalizedInput {
    /// Degraded output used when normalization fails: the raw input
    /// lowercased and trimmed, with empty word sets.
    pub fn degraded(raw: &str) -> Self {
        Self {
            text: raw.trim().to_lowercase(),
            nouns: HashSet::new(),
            verbs: HashSet::new(),
        }
    }
}

/// Errors from a normalizer implementation.
#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("normalization failed: {0}")]
    Internal(String),
}

impl From<NlpError> for BanterError {
    fn from(err: NlpError) -> Self {
        BanterError::Normalize(err.to_string())
    }
}

/// Text normalization and part-of-speech word extraction.
///
/// Implementations may fail internally; the resolver only ever calls
/// through [`normalize_or_fallback`], so from its point of view
/// normalization is infallible, best-effort enrichment.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> Result<NormalizedInput, NlpError>;
}

/// Run `normalizer` on `raw`, substituting the degraded output on failure.
pub fn normalize_or_fallback(normalizer: &dyn Normalizer, raw: &str) -> NormalizedInput {
    match normalizer.normalize(raw) {
        Ok(normalized) => normalized,
        Err(e) => {
            debug!(error = %e, "Normalizer failed, degrading to trimmed input");
            NormalizedInput::degraded(raw)
        }
    }
}
