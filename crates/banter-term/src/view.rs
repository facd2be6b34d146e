//! Host/terminal view state with thread-safe toggling.
//!
//! The widget renders either the terminal chat surface or the host page it
//! is embedded in. The goodbye handoff flips between them; there are no
//! other transitions.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::debug;

/// Which surface the widget currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// The interactive chat terminal.
    Terminal,
    /// The surrounding host page.
    Host,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Terminal => write!(f, "Terminal"),
            ViewState::Host => write!(f, "Host"),
        }
    }
}

impl ViewState {
    /// The other surface.
    pub fn flipped(&self) -> ViewState {
        match self {
            ViewState::Terminal => ViewState::Host,
            ViewState::Host => ViewState::Terminal,
        }
    }
}

/// Shared view state. Clones observe the same underlying state.
#[derive(Debug, Clone)]
pub struct ViewToggle {
    state: Arc<Mutex<ViewState>>,
}

impl Default for ViewToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewToggle {
    /// New toggle showing the terminal.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::Terminal)),
        }
    }

    /// Returns the current view.
    pub fn current(&self) -> ViewState {
        *self.state.lock().expect("view state mutex poisoned")
    }

    /// Flip to the other view and return the new state.
    pub fn toggle(&self) -> ViewState {
        let mut state = self.state.lock().expect("view state mutex poisoned");
        let next = state.flipped();
        debug!("View: {} -> {}", *state, next);
        *state = next;
        next
    }
}

// =============================================================================
// Tests
// =============================================================================
