//! Unified error types for the atomext library.
//!
//! Parsing never returns a partially populated object: every operation either
//! yields an instance that satisfies its type's invariants or fails with one
//! of the variants below. Nothing is retried internally.
use thiserror::Error;

/// Main error type for atomext operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller contract violation (wrong element handed to a parser, writer misuse)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A typed attribute value failed lexical parsing
    #[error("Malformed attribute {attribute}: {value:?}")]
    MalformedAttribute {
        /// Local name of the offending attribute
        attribute: String,
        /// The rejected attribute value
        value: String,
    },

    /// A structural document rule was violated
    #[error("Structural violation: {0}")]
    Structural(String),

    /// Malformed XML or encoding failure in the source document
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for atomext operations.
pub type Result<T> = std::result::Result<T, Error>;
