//! Maven repository protocol: POM parsing, metadata, downloads, the
//! persistent fingerprint cache, and the content-addressed manifest store.

pub mod auth;
pub mod client;
pub mod download;
pub mod fingerprint;
pub mod metadata;
pub mod pom;
pub mod repository;
pub mod snapshot;
pub mod store;
