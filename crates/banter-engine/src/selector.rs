//! Reply selection with anti-repeat variant draws.

use banter_catalog::{ReplyText, ResponseEntry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::session::SessionState;

/// Picks the reply text for a resolved entry.
///
/// Scalars pass through verbatim and never touch session state. Variant
/// sets get a uniform random draw with a bounded redraw loop against the
/// previous reply for the same key, so a back-to-back repeat only happens
/// once the redraw budget is spent.
pub struct ResponseSelector {
    rng: StdRng,
    max_redraws: u32,
}

impl ResponseSelector {
    pub fn new(max_redraws: u32) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            max_redraws,
        }
    }

    /// Selector with a fixed seed, for deterministic tests.
    pub fn seeded(seed: u64, max_redraws: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_redraws,
        }
    }

    /// Select the reply text for `entry`, updating the session's anti-repeat
    /// record when the entry holds variants.
    pub fn select(&mut self, entry: &ResponseEntry, session: &mut SessionState) -> String {
        match &entry.text {
            ReplyText::Scalar(text) => text.clone(),
            ReplyText::Variants(variants) => {
                let choice = self.draw(variants, session.last_for(&entry.key));
                session.record(&entry.key, &choice);
                choice
            }
        }
    }

    fn draw(&mut self, variants: &[String], last: Option<&str>) -> String {
        // Unreachable through a loaded catalog; kept total anyway.
        if variants.is_empty() {
            debug!("Variant list is empty, returning empty reply");
            return String::new();
        }
        if variants.len() == 1 {
            return variants[0].clone();
        }
        let mut choice = &variants[self.rng.random_range(0..variants.len())];
        let mut redraws = 0;
        while last == Some(choice.as_str()) && redraws < self.max_redraws {
            choice = &variants[self.rng.random_range(0..variants.len())];
            redraws += 1;
        }
        choice.clone()
    }
}
