//! Shared models for the groovyscope inference engine.
//!
//! Everything here is plain data: the engine crates produce these values and
//! front ends (CLI, editors) consume them.

pub mod models;

pub use models::*;
