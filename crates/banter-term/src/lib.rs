//! Terminal rendering surface: the typing animation renderer and the
//! host/terminal view toggle.

pub mod renderer;
pub mod view;

pub use renderer::{RenderConfig, RenderSink, StdoutSink, TypingRenderer};
pub use view::{ViewState, ViewToggle};
