//! Common types and utilities shared across the crate.
//!
//! The OOXML layers keep their own error types; [`Error`] is the unified
//! error presented by the deck generator and the command-line binary.

// Submodule declarations
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
