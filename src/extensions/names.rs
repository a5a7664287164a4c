//! Name table for the GData schema-extension vocabulary.
//!
//! Element and attribute names are shared between the parse side and the
//! write side through these constants, so the name an extension answers to
//! and the name it emits can never diverge.

use phf::{Map, phf_map};

/// GData schema-extension namespace
pub const GD_NAMESPACE: &str = "http://schemas.google.com/g/2005";

/// Conventional prefix for the GData namespace
pub const GD_PREFIX: &str = "gd";

/// Atom namespace (RFC 4287)
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Conventional prefix for the Atom namespace
pub const ATOM_PREFIX: &str = "atom";

/// Nested entry link element
pub const ENTRY_LINK: &str = "entryLink";

/// Recurrence exception element
pub const RECURRENCE_EXCEPTION: &str = "recurrenceException";

/// Reference URI attribute
pub const ATTR_HREF: &str = "href";

/// Relation type attribute
pub const ATTR_REL: &str = "rel";

/// Read-only flag attribute
pub const ATTR_READ_ONLY: &str = "readOnly";

/// Specialized exception flag attribute
pub const ATTR_SPECIALIZED: &str = "specialized";

/// Reserved scalar payload attribute
pub const ATTR_VALUE: &str = "value";

/// The closed set of extension element types this crate parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    /// `gd:entryLink`
    EntryLink,
    /// `gd:recurrenceException`
    RecurrenceException,
}

/// Local element name to extension kind, O(1) at compile time.
static EXTENSION_KINDS: Map<&'static str, ExtensionKind> = phf_map! {
    "entryLink" => ExtensionKind::EntryLink,
    "recurrenceException" => ExtensionKind::RecurrenceException,
};

/// Route an element to its extension kind by (namespace, local name).
///
/// Returns `None` for elements outside the GData namespace or with an
/// unrecognized local name; the caller decides whether that is an error.
pub fn extension_kind(namespace: Option<&str>, local_name: &str) -> Option<ExtensionKind> {
    if namespace != Some(GD_NAMESPACE) {
        return None;
    }
    EXTENSION_KINDS.get(local_name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_kind_routing() {
        assert_eq!(
            extension_kind(Some(GD_NAMESPACE), "entryLink"),
            Some(ExtensionKind::EntryLink)
        );
        assert_eq!(
            extension_kind(Some(GD_NAMESPACE), "recurrenceException"),
            Some(ExtensionKind::RecurrenceException)
        );
    }

    #[test]
    fn test_extension_kind_requires_namespace() {
        assert_eq!(extension_kind(None, "entryLink"), None);
        assert_eq!(extension_kind(Some(ATOM_NAMESPACE), "entryLink"), None);
    }

    #[test]
    fn test_extension_kind_unknown_name() {
        assert_eq!(extension_kind(Some(GD_NAMESPACE), "reminder"), None);
    }
}
