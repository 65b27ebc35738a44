//! Shared utilities for repository-keeper.
//!
//! This crate provides cross-cutting concerns used by all other keeper crates:
//! error types, filesystem helpers, checksum hashing, and terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
