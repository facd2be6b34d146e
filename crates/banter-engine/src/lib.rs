//! Intent resolution and response selection.
//!
//! Takes one raw user input and the installed response catalog and produces
//! exactly one reply through a fixed matching cascade, with anti-repeat
//! variant selection and deferred side effects for the host view.

pub mod matcher;
pub mod resolver;
pub mod selector;
pub mod session;
pub mod types;

pub use matcher::{FuzzyHit, FuzzyIndex};
pub use resolver::{ChatEngine, FALLBACK_REPLY};
pub use selector::ResponseSelector;
pub use session::{PendingContext, SessionState};
pub use types::{
    EffectTiming, EngineConfig, Reply, Resolution, SideEffect, SideEffectKind,
};
