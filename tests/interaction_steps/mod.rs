//! Step definitions for interaction behaviour scenarios.

pub mod world;

mod given;
mod then;
mod when;
