//! Unified error types for slidesmith.
//!
//! This module provides a single error type that encompasses content loading,
//! OOXML packaging and filesystem errors, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
