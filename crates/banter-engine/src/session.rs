//! Per-session conversational state.

use std::collections::HashMap;

/// Follow-up context armed by a previous reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingContext {
    #[default]
    None,
    /// The next input is consumed as the user's name.
    AwaitingName,
}

/// Mutable state for one widget session.
///
/// Tracks the last reply returned per catalog key (for anti-repeat) and
/// the pending follow-up context. Lives for the session and is dropped
/// with it; nothing persists.
#[derive(Debug, Default)]
pub struct SessionState {
    last_by_category: HashMap<String, String>,
    pending: PendingContext,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reply returned for `category`, if any.
    pub fn last_for(&self, category: &str) -> Option<&str> {
        self.last_by_category.get(category).map(String::as_str)
    }

    /// Record the reply just returned for `category`.
    pub fn record(&mut self, category: &str, reply: &str) {
        self.last_by_category
            .insert(category.to_string(), reply.to_string());
    }

    /// Take the pending context, clearing it. Every input consumes the
    /// context exactly once, whatever the input contains.
    pub fn take_pending(&mut self) -> PendingContext {
        std::mem::take(&mut self.pending)
    }

    pub fn set_awaiting_name(&mut self) {
        self.pending = PendingContext::AwaitingName;
    }
}
