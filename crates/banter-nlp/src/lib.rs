//! Input normalization for Banter.
//!
//! Defines the normalizer contract the resolver consumes (lowercased text
//! plus best-effort noun/verb word sets) and a rule-based default
//! implementation backed by static word lists.

pub mod normalizer;
pub mod rule;

pub use normalizer::{normalize_or_fallback, NlpError, NormalizedInput, Normalizer};
pub use rule::RuleNormalizer;
