//! Engine output types and tunable settings.

use serde::{Deserialize, Serialize};

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The catalog has not been installed yet; the caller should show its
    /// still-loading message and try again later.
    Loading,
    /// A reply to render, with any deferred side effects.
    Reply(Reply),
}

impl Resolution {
    /// The reply, if resolution produced one.
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Resolution::Loading => None,
            Resolution::Reply(reply) => Some(reply),
        }
    }
}

/// One reply produced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub side_effects: Vec<SideEffect>,
}

impl Reply {
    /// Plain reply with no side effects.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side_effects: Vec::new(),
        }
    }

    /// Reply carrying one side effect.
    pub fn with_effect(text: impl Into<String>, effect: SideEffect) -> Self {
        Self {
            text: text.into(),
            side_effects: vec![effect],
        }
    }
}

/// Host-visible action requested by a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffect {
    pub kind: SideEffectKind,
    pub timing: EffectTiming,
}

impl SideEffect {
    /// The goodbye handoff: toggle the host view once rendering finishes.
    pub fn toggle_after_render() -> Self {
        Self {
            kind: SideEffectKind::ToggleView,
            timing: EffectTiming::AfterRender,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffectKind {
    /// Hand control back to the host view.
    ToggleView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTiming {
    /// Fire only after the reply has fully rendered.
    AfterRender,
}

/// Tunable resolution settings.
///
/// The reserved keys are catalog keys with engine-level behavior attached;
/// a catalog opts in by shipping the matching entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key whose entry (and aliases) triggers the command listing.
    pub help_key: String,
    /// Key whose replies carry the view-toggle side effect.
    pub goodbye_key: String,
    /// Key holding the fallback reply for unmatched input.
    pub unknown_key: String,
    /// Key whose resolution arms the awaiting-name follow-up.
    pub ask_name_key: String,
    /// Fuzzy eligibility threshold in [0, 1]; candidates score strictly below it.
    pub fuzzy_threshold: f64,
    /// Redraw budget when a variant repeats the previous reply.
    pub max_redraws: u32,
    /// Reply template for the awaiting-name follow-up; `{name}` is replaced.
    pub greeting_template: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            help_key: "help".to_string(),
            goodbye_key: "goodbye".to_string(),
            unknown_key: "unknown".to_string(),
            ask_name_key: "ask-name".to_string(),
            fuzzy_threshold: 0.4,
            max_redraws: 10,
            greeting_template: "Nice to meet you, {name}!".to_string(),
        }
    }
}
