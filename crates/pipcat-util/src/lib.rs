//! Shared utilities for the pipcat manifest aggregator.
//!
//! This crate provides cross-cutting concerns used by all other pipcat
//! crates: error types and process spawning.

pub mod errors;
pub mod process;
