//! Closed dispatch over the known extension element types.
//!
//! The feed parser routes unrecognized entry children here. Dispatch is a
//! tagged variant keyed by `(namespace, local name)` through the compile-time
//! name table; there is no open-ended type discovery.

use crate::atom::FeedParser;
use crate::common::xml::{XmlNode, XmlWriter, fragment_to_string};
use crate::common::{Error, Result};
use crate::extensions::entry_link::EntryLink;
use crate::extensions::names::{ExtensionKind, extension_kind};
use crate::extensions::ExtensionElement;
use crate::extensions::recurrence_exception::RecurrenceException;
use std::io::Write;

/// One parsed schema extension element.
#[derive(Debug, Clone, PartialEq)]
pub enum Extension {
    /// A `gd:entryLink` element
    EntryLink(EntryLink),
    /// A `gd:recurrenceException` element
    RecurrenceException(RecurrenceException),
}

impl Extension {
    /// Whether the registry has a parser for this element.
    pub fn handles(node: &XmlNode) -> bool {
        extension_kind(node.namespace(), node.local_name()).is_some()
    }

    /// Parse an element by routing it to the matching extension type.
    pub fn parse(node: &XmlNode, parser: &mut FeedParser) -> Result<Self> {
        match extension_kind(node.namespace(), node.local_name()) {
            Some(ExtensionKind::EntryLink) => {
                Ok(Extension::EntryLink(EntryLink::parse(node, parser)?))
            },
            Some(ExtensionKind::RecurrenceException) => Ok(Extension::RecurrenceException(
                RecurrenceException::parse(node, parser)?,
            )),
            None => Err(Error::InvalidArgument(format!(
                "no extension handler for element {}",
                node.name()
            ))),
        }
    }

    /// The element's local name, identical on the parse and write sides.
    pub fn element_name(&self) -> &'static str {
        match self {
            Extension::EntryLink(_) => EntryLink::ELEMENT_NAME,
            Extension::RecurrenceException(_) => RecurrenceException::ELEMENT_NAME,
        }
    }

    /// Serialize the wrapped extension.
    pub fn write_to<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Extension::EntryLink(link) => link.write_to(writer),
            Extension::RecurrenceException(exception) => exception.write_to(writer),
        }
    }

    /// Serialize to a standalone string fragment.
    pub fn to_xml_string(&self) -> Result<String> {
        fragment_to_string(|writer| self.write_to(writer))
    }
}
