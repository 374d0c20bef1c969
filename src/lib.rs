//! Switchboard: interaction command registration and dispatch.
//!
//! This crate sits between an interaction event source (a webhook or a
//! persistent connection) and application handler functions. Callers declare
//! hierarchical commands and component or autocomplete callbacks; the crate
//! routes each incoming event to exactly one handler, validates its
//! arguments, runs it without blocking the receive path, and flattens the
//! registry back into bulk definition lists for upload.
//!
//! # Architecture
//!
//! Switchboard follows hexagonal architecture principles:
//!
//! - **Domain**: definitions, events, handlers, and their invariants
//! - **Ports**: trait interfaces for the command directory, response
//!   delivery, entity lookup, and error observation
//! - **Adapters**: in-memory implementations of the ports
//!
//! Networking, signature verification, and persistence are left to the host.
//!
//! # Modules
//!
//! - [`interaction`]: command registry, router, invoker, and exporter

pub mod interaction;
