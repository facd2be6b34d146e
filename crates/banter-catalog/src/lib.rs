//! Response catalog for Banter.
//!
//! Models the JSON catalog document as an ordered, read-only mapping of
//! intent keys to reply entries, and provides the one-time async loader.

pub mod catalog;
pub mod entry;
pub mod error;
pub mod loader;

pub use catalog::ResponseCatalog;
pub use entry::{ReplyText, ResponseEntry};
pub use error::CatalogError;
pub use loader::load_catalog;
