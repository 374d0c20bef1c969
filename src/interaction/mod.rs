//! Interaction command registration and dispatch.
//!
//! This module turns decoded interaction events into handler invocations and
//! turns the registered command hierarchy back into upload-ready definition
//! lists. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Registry, routing, invocation, and export services in [`services`]
//! - Client configuration in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
