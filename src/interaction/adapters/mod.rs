//! Adapter implementations of the interaction ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryCommandDirectory`]: records bulk uploads per scope
//! - [`memory::RecordingResponder`]: records endpoint responses
//! - [`memory::InMemoryEntityCache`]: map-backed entity lookup
//! - [`memory::CollectingErrorListener`]: collects unrecovered dispatch errors
//!
//! Transport-backed adapters live in the host application.

pub mod memory;
