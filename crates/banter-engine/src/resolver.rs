//! The resolution cascade.
//!
//! Maps one raw user input to exactly one reply: pending follow-up context
//! first, then the help listing, then exact alias, noun/verb term, and
//! fuzzy matching, and finally the fallback. Precedence is fixed; an
//! earlier stage that produces a key short-circuits the rest.

use std::sync::{Mutex, MutexGuard};

use banter_catalog::ResponseCatalog;
use banter_nlp::{normalize_or_fallback, NormalizedInput, Normalizer};
use tracing::{debug, info, warn};

use crate::matcher::{exact, lexical, FuzzyIndex};
use crate::selector::ResponseSelector;
use crate::session::{PendingContext, SessionState};
use crate::types::{EngineConfig, Reply, Resolution, SideEffect};

/// Reply used when nothing matches and the catalog has no unknown entry.
pub const FALLBACK_REPLY: &str = "I'm not sure how to respond to that.";

/// The resolution engine. One instance serves one widget session.
///
/// Mutable state (catalog, fuzzy index, session, selector RNG) sits behind
/// one lock so the engine can be shared between the input loop and the
/// catalog loader task; the lock is held for a single resolution at a
/// time. Resolution is synchronous and total: every input maps to exactly
/// one reply once a catalog is installed.
pub struct ChatEngine {
    normalizer: Box<dyn Normalizer>,
    config: EngineConfig,
    state: Mutex<EngineState>,
}

struct EngineState {
    catalog: Option<ResponseCatalog>,
    index: FuzzyIndex,
    session: SessionState,
    selector: ResponseSelector,
}

impl ChatEngine {
    pub fn new(normalizer: Box<dyn Normalizer>, config: EngineConfig) -> Self {
        let selector = ResponseSelector::new(config.max_redraws);
        Self::with_selector(normalizer, config, selector)
    }

    /// Engine with a deterministic selector, for reproducible tests.
    pub fn seeded(normalizer: Box<dyn Normalizer>, config: EngineConfig, seed: u64) -> Self {
        let selector = ResponseSelector::seeded(seed, config.max_redraws);
        Self::with_selector(normalizer, config, selector)
    }

    fn with_selector(
        normalizer: Box<dyn Normalizer>,
        config: EngineConfig,
        selector: ResponseSelector,
    ) -> Self {
        Self {
            normalizer,
            config,
            state: Mutex::new(EngineState {
                catalog: None,
                index: FuzzyIndex::unbuilt(),
                session: SessionState::new(),
                selector,
            }),
        }
    }

    /// Install the loaded catalog and build the fuzzy index over it.
    ///
    /// The index is built here, once; installing again is ignored so a
    /// duplicate load cannot rebuild it mid-session.
    pub fn install_catalog(&self, catalog: ResponseCatalog) {
        let mut state = self.lock_state();
        if state.catalog.is_some() {
            warn!("Catalog already installed, ignoring reinstall");
            return;
        }
        state.index = FuzzyIndex::build(&catalog, self.config.fuzzy_threshold);
        info!(entries = catalog.len(), "Catalog installed");
        state.catalog = Some(catalog);
    }

    /// Whether a catalog has been installed.
    pub fn is_ready(&self) -> bool {
        self.lock_state().catalog.is_some()
    }

    /// Resolve one user input.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let mut state = self.lock_state();
        let EngineState {
            catalog,
            index,
            session,
            selector,
        } = &mut *state;

        let Some(catalog) = catalog.as_ref() else {
            debug!("Resolve called before catalog install");
            return Resolution::Loading;
        };

        // An armed follow-up consumes the input before any matching, and
        // is cleared no matter what the input contains.
        if session.take_pending() == PendingContext::AwaitingName {
            let name = capitalize_first(raw.trim());
            debug!(name = %name, "Consumed input as name");
            let text = self.config.greeting_template.replace("{name}", &name);
            return Resolution::Reply(Reply::text(text));
        }

        let cleaned = raw.trim().to_lowercase();
        let normalized = normalize_or_fallback(self.normalizer.as_ref(), raw);
        debug!(input = %cleaned, normalized = %normalized.text, "Resolving input");

        if self.is_help_trigger(catalog, &normalized, &cleaned) {
            debug!("Help trigger");
            return Resolution::Reply(Reply::text(compose_help(catalog)));
        }

        let matched = Self::match_key(catalog, index, &normalized, &cleaned);
        let reply = match matched.as_deref().and_then(|key| catalog.get(key)) {
            Some(entry) => {
                let text = selector.select(entry, session);
                if entry.key == self.config.goodbye_key {
                    debug!(key = %entry.key, "Handoff resolved");
                    Reply::with_effect(text, SideEffect::toggle_after_render())
                } else {
                    if entry.key == self.config.ask_name_key {
                        debug!(key = %entry.key, "Awaiting name armed");
                        session.set_awaiting_name();
                    }
                    Reply::text(text)
                }
            }
            None => self.fallback_reply(catalog, session, selector),
        };
        Resolution::Reply(reply)
    }

    /// Matching stages in precedence order: exact on normalized text,
    /// exact on the cleaned raw input, noun/verb terms, fuzzy.
    fn match_key(
        catalog: &ResponseCatalog,
        index: &FuzzyIndex,
        normalized: &NormalizedInput,
        cleaned: &str,
    ) -> Option<String> {
        exact::match_alias(catalog, &normalized.text)
            .or_else(|| exact::match_alias(catalog, cleaned))
            .or_else(|| lexical::match_terms(catalog, &normalized.nouns, &normalized.verbs))
            .map(str::to_string)
            .or_else(|| {
                index.best(cleaned).map(|hit| {
                    debug!(key = %hit.key, score = hit.score, "Fuzzy hit");
                    hit.key
                })
            })
    }

    fn is_help_trigger(
        &self,
        catalog: &ResponseCatalog,
        normalized: &NormalizedInput,
        cleaned: &str,
    ) -> bool {
        match catalog.get(&self.config.help_key) {
            Some(entry) => {
                entry.matches_alias(&normalized.text) || entry.matches_alias(cleaned)
            }
            None => normalized.text == self.config.help_key || cleaned == self.config.help_key,
        }
    }

    fn fallback_reply(
        &self,
        catalog: &ResponseCatalog,
        session: &mut SessionState,
        selector: &mut ResponseSelector,
    ) -> Reply {
        match catalog.get(&self.config.unknown_key) {
            Some(entry) => Reply::text(selector.select(entry, session)),
            None => {
                debug!("No unknown entry, using fallback sentinel");
                Reply::text(FALLBACK_REPLY)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().expect("engine state mutex poisoned")
    }
}

/// One `key: description` line per described entry, in catalog order.
fn compose_help(catalog: &ResponseCatalog) -> String {
    let lines: Vec<String> = catalog
        .iter()
        .filter(|entry| entry.has_description())
        .map(|entry| {
            format!(
                "{}: {}",
                entry.key,
                entry.description.as_deref().unwrap_or_default()
            )
        })
        .collect();
    lines.join("\n")
}

/// Uppercase the first letter, leaving the rest as typed.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
