//! Unit tests for the interaction module.
//!
//! Tests are organised by component: domain model and builders, then the
//! registry, router, invoker, exporter, and client services.

mod router_tests;
