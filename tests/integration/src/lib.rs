//! Integration test utilities for the forum server
//!
//! Spawns the REST API on the in-memory storage backend and drives it over
//! HTTP with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
