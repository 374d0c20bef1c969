//! In-memory adapter implementations.
//!
//! These adapters are thread-safe and suitable for tests and for hosts that
//! do not need a real directory or transport.

mod directory;
mod entity_cache;
mod error_listener;
mod responder;

pub use directory::{DirectoryUpload, InMemoryCommandDirectory};
pub use entity_cache::InMemoryEntityCache;
pub use error_listener::CollectingErrorListener;
pub use responder::RecordingResponder;
