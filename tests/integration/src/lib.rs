//! Integration test utilities for the rate-card server
//!
//! Spawns the full HTTP application against a real PostgreSQL database and
//! drives it over reqwest.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
