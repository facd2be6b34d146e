//! Matching stages of the resolution cascade.
//!
//! Ordered from cheapest and most precise to loosest: exact alias
//! equality, then single-word noun/verb terms, then fuzzy similarity.

pub mod exact;
pub mod fuzzy;
pub mod lexical;

pub use fuzzy::{FuzzyHit, FuzzyIndex};
