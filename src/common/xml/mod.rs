//! XML plumbing shared by the feed parser and the extension serializers.
//!
//! The reading side builds an in-memory [`XmlNode`] tree with resolved
//! namespaces; the writing side streams through [`XmlWriter`], escaping
//! centrally so no serializer emits raw markup by hand.

// Submodule declarations
pub mod escape;
pub mod node;
pub mod value;
pub mod writer;

// Re-exports for convenience
pub use escape::{escape_xml, unescape_xml};
pub use node::XmlNode;
pub use value::{format_bool, parse_bool};
pub use writer::{XmlWriter, fragment_to_string};
