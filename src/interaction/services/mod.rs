//! Registry, routing, invocation, and export services.
//!
//! [`InteractionClient`] is the entry point most hosts need. The router and
//! exporter are exposed as free functions over a [`CommandRegistry`] for
//! callers that drive dispatch themselves.

mod client;
pub mod exporter;
mod invoker;
mod registry;
pub mod router;

pub use client::{InteractionClient, WaitError};
pub use exporter::{ExportedCommands, export};
pub use invoker::Invoker;
pub use registry::CommandRegistry;
pub use router::{CommandPath, DispatchTarget};
