//! Core data types for repository-keeper: artifact coordinates, resolution
//! targets, configuration, the tracked library universe, and substitution plans.

pub mod config;
pub mod coordinate;
pub mod env;
pub mod substitution;
pub mod tracked;
