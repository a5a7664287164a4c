//! Atom feed object model and the re-entrant feed parser.
//!
//! The parser exposes two things the extension framework builds on: a
//! `parse_entry` entry point that can be invoked re-entrantly from inside an
//! extension parser, and an "entry produced" notification whose consumer can
//! suppress the default append-to-feed handling for a single entry.

/// Feed, entry, and link data model plus their serialization
pub mod entry;
/// Feed parsing with the scoped entry-capture mechanism
pub mod parser;

// Re-exports for convenience
pub use entry::{AtomLink, Feed, FeedEntry};
pub use parser::{EntryCapture, EntryEvent, EntryListener, FeedParser};
