//! Port contracts for the collaborators around the dispatch engine.
//!
//! Ports define infrastructure-agnostic interfaces: where definitions are
//! uploaded, how responses reach the event source, where uncached entities
//! are looked up, and who observes unhandled dispatch errors.

pub mod directory;
pub mod entity_cache;
pub mod error_listener;
pub mod responder;

pub use directory::{CommandDirectory, DirectoryError, DirectoryResult};
pub use entity_cache::EntityCache;
pub use error_listener::InteractionErrorListener;
pub use responder::{InteractionResponder, ResponderError, ResponderResult};

#[cfg(test)]
pub use directory::MockCommandDirectory;
