//! Mapping provider boundary
//!
//! Types, traits and errors describing the native mapping service the marker
//! manager drives, plus an in-memory recording implementation of it.

pub(crate) mod error;
pub(crate) mod memory;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the provider boundary
pub mod api;

#[cfg(test)]
mod tests;
