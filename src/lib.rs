//! Atomext - A Rust library for parsing GData-style schema extensions in Atom feeds
//!
//! This library parses and losslessly re-serializes schema extension elements
//! embedded in Atom feed entries, including extensions that carry an entire
//! nested feed entry inside them.
//!
//! # Features
//!
//! - **Extension element contract**: one trait every extension type implements,
//!   so the feed parser can route unrecognized child elements uniformly
//! - **Re-entrant entry capture**: an extension can delegate parsing of a nested
//!   `atom:entry` back to the feed parser and capture the result for itself,
//!   without the entry leaking into the surrounding feed
//! - **Presence-tracked fields**: `readOnly="false"` and an absent `readOnly`
//!   attribute stay distinguishable across a parse/serialize round trip
//! - **Lossless write-back**: serializers omit attributes that were never set
//!   and omit empty extension elements entirely
//!
//! # Example - Parsing an extension element
//!
//! ```
//! use atomext::atom::FeedParser;
//! use atomext::common::xml::XmlNode;
//! use atomext::extensions::{EntryLink, ExtensionElement};
//!
//! # fn main() -> atomext::Result<()> {
//! let xml = r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005"
//!                  href="http://example.com/feeds/1" readOnly="true"/>"#;
//! let node = XmlNode::from_str(xml)?;
//! let mut parser = FeedParser::new();
//!
//! let link = EntryLink::parse(&node, &mut parser)?;
//! assert_eq!(link.href(), Some("http://example.com/feeds/1"));
//! assert!(link.read_only().value());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Parsing a feed with extension elements
//!
//! ```
//! use atomext::atom::FeedParser;
//!
//! # fn main() -> atomext::Result<()> {
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"
//!                    xmlns:gd="http://schemas.google.com/g/2005">
//!     <entry>
//!         <id>urn:example:1</id>
//!         <gd:recurrenceException specialized="true">
//!             <gd:entryLink href="http://example.com/feeds/1"/>
//!         </gd:recurrenceException>
//!     </entry>
//! </feed>"#;
//!
//! let mut parser = FeedParser::new();
//! let feed = parser.parse_feed(xml)?;
//! assert_eq!(feed.entries.len(), 1);
//! assert_eq!(feed.entries[0].extensions.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing an extension back out
//!
//! ```
//! use atomext::extensions::{EntryLink, ExtensionElement};
//!
//! # fn main() -> atomext::Result<()> {
//! let mut link = EntryLink::new();
//! link.set_href("http://example.com/feeds/1");
//! link.set_read_only(false);
//!
//! // An explicitly assigned false is re-emitted; an untouched field would not be.
//! let xml = link.to_xml_string()?;
//! assert!(xml.contains(r#"readOnly="false""#));
//! # Ok(())
//! # }
//! ```

/// Atom feed and entry object model with the re-entrant feed parser
pub mod atom;

/// Common types, errors, and XML plumbing shared across the crate
pub mod common;

/// Schema extension element types and their dispatch registry
pub mod extensions;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use extensions::{EntryLink, Extension, ExtensionElement, ExtensionField, RecurrenceException};
