//! Shared types for the evmatch event correlation server.
//!
//! Enable the `client` feature for a typed HTTP client.

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
