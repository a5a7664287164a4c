//! Schema extension element types.
//!
//! Extensions are XML elements outside the base Atom vocabulary that a feed
//! entry may carry. Every extension type implements [`ExtensionElement`], so
//! the feed parser can treat heterogeneous extensions uniformly: one stable
//! element name shared by the parse and write sides, one parse entry point
//! with access to the re-entrant parsing context, and one serializer that is
//! free to emit nothing at all.

use crate::atom::FeedParser;
use crate::common::Result;
use crate::common::xml::{XmlNode, XmlWriter, fragment_to_string};
use std::io::Write;

/// Leaf extension holding an optional nested entry
pub mod entry_link;
/// Presence-tracked scalar fields
pub mod field;
/// Vocabulary name table and kind routing
pub mod names;
/// Composite extension requiring an entry link child
pub mod recurrence_exception;
/// Closed dispatch over the known extension types
pub mod registry;

// Re-exports for convenience
pub use entry_link::EntryLink;
pub use field::ExtensionField;
pub use recurrence_exception::RecurrenceException;
pub use registry::Extension;

/// The capability every schema extension element implements.
pub trait ExtensionElement: Sized {
    /// XML local name this type answers to and emits.
    ///
    /// The dispatcher routes on this name and the serializer reuses it, so
    /// the two can never diverge.
    const ELEMENT_NAME: &'static str;

    /// Parse an element node known to match [`ELEMENT_NAME`](Self::ELEMENT_NAME).
    ///
    /// `parser` is the re-entrant parsing context; an extension that embeds a
    /// full entry delegates back into it. Handing in a node with any other
    /// name is a caller contract violation and fails with
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument).
    fn parse(node: &XmlNode, parser: &mut FeedParser) -> Result<Self>;

    /// Serialize this instance, or emit nothing if it carries no information
    /// worth persisting.
    fn write_to<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()>;

    /// Serialize to a standalone string fragment.
    fn to_xml_string(&self) -> Result<String> {
        fragment_to_string(|writer| self.write_to(writer))
    }
}
