//! Unified error types for the atomext library.
//!
//! This module provides a single error type covering document parsing,
//! extension-element validation, and serialization, presenting a consistent
//! API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
