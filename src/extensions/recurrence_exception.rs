//! The `gd:recurrenceException` extension: an exception to a recurrence rule.
//!
//! The exception's payload lives in a required `gd:entryLink` child; a
//! document without one is structurally invalid. Unlike the entry link, the
//! element itself is always emitted on write-back, even when it carries no
//! attributes and an empty link: the element is a marker, and its presence is
//! meaningful to consumers.

use crate::atom::FeedParser;
use crate::common::xml::{XmlNode, XmlWriter, parse_bool};
use crate::common::{Error, Result};
use crate::extensions::ExtensionElement;
use crate::extensions::entry_link::EntryLink;
use crate::extensions::names::{
    ATTR_SPECIALIZED, ATTR_VALUE, ENTRY_LINK, GD_NAMESPACE, GD_PREFIX, RECURRENCE_EXCEPTION,
};
use std::io::Write;

/// A recurrence exception wrapping a required entry link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurrenceException {
    specialized: bool,
    value: Option<String>,
    entry_link: EntryLink,
}

impl RecurrenceException {
    /// Create an exception around the given entry link.
    pub fn new(entry_link: EntryLink) -> Self {
        Self {
            specialized: false,
            value: None,
            entry_link,
        }
    }

    /// Whether this is a specialized exception.
    pub fn specialized(&self) -> bool {
        self.specialized
    }

    /// Mark the exception as specialized or not.
    pub fn set_specialized(&mut self, specialized: bool) {
        self.specialized = specialized;
    }

    /// Reserved scalar payload.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set the reserved scalar payload.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// The required entry link.
    pub fn entry_link(&self) -> &EntryLink {
        &self.entry_link
    }

    /// Mutable access to the entry link.
    pub fn entry_link_mut(&mut self) -> &mut EntryLink {
        &mut self.entry_link
    }
}

impl ExtensionElement for RecurrenceException {
    const ELEMENT_NAME: &'static str = RECURRENCE_EXCEPTION;

    fn parse(node: &XmlNode, parser: &mut FeedParser) -> Result<Self> {
        if !node.is(GD_NAMESPACE, Self::ELEMENT_NAME) {
            return Err(Error::InvalidArgument(format!(
                "expected gd:{}, got {}",
                Self::ELEMENT_NAME,
                node.name()
            )));
        }

        let mut specialized = false;
        if let Some(raw) = node.attribute(ATTR_SPECIALIZED) {
            specialized = parse_bool(ATTR_SPECIALIZED, raw)?;
        }
        let value = node.attribute(ATTR_VALUE).map(str::to_string);

        let mut entry_link = None;
        for child in node.children() {
            if child.is(GD_NAMESPACE, ENTRY_LINK) {
                entry_link = Some(EntryLink::parse(child, parser)?);
            }
        }
        let entry_link = entry_link.ok_or_else(|| {
            Error::Structural(format!(
                "gd:{} requires a gd:{ENTRY_LINK} child",
                Self::ELEMENT_NAME
            ))
        })?;

        Ok(Self {
            specialized,
            value,
            entry_link,
        })
    }

    // The element is always written, attribute-less or not; only the
    // attributes and the link content are conditional.
    fn write_to<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element_ns(GD_PREFIX, Self::ELEMENT_NAME, GD_NAMESPACE)?;
        if self.specialized {
            writer.attribute(ATTR_SPECIALIZED, "true")?;
        }
        if let Some(value) = self.value.as_deref()
            && !value.is_empty()
        {
            writer.attribute(ATTR_VALUE, value)?;
        }
        self.entry_link.write_to(writer)?;
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<RecurrenceException> {
        let node = XmlNode::from_str(xml)?;
        RecurrenceException::parse(&node, &mut FeedParser::new())
    }

    #[test]
    fn test_parse_with_entry_link() {
        let exception = parse(
            r#"<gd:recurrenceException xmlns:gd="http://schemas.google.com/g/2005" specialized="true">
                <gd:entryLink href="http://x/1"/>
            </gd:recurrenceException>"#,
        )
        .unwrap();
        assert!(exception.specialized());
        assert_eq!(exception.entry_link().href(), Some("http://x/1"));
    }

    #[test]
    fn test_missing_entry_link_is_structural_error() {
        let err = parse(
            r#"<gd:recurrenceException xmlns:gd="http://schemas.google.com/g/2005"/>"#,
        )
        .unwrap_err();
        match err {
            Error::Structural(message) => assert!(message.contains("entryLink")),
            other => panic!("expected Structural, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_specialized_is_fatal_not_defaulted() {
        let err = parse(
            r#"<gd:recurrenceException xmlns:gd="http://schemas.google.com/g/2005" specialized="sometimes">
                <gd:entryLink href="http://x/1"/>
            </gd:recurrenceException>"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedAttribute { .. }));
    }

    #[test]
    fn test_name_mismatch_is_contract_violation() {
        let err =
            parse(r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005"/>"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_element_always_emitted_even_when_empty() {
        // specialized false, no value, empty link: the marker element remains
        let bare = RecurrenceException::new(EntryLink::new());
        assert_eq!(
            bare.to_xml_string().unwrap(),
            r#"<gd:recurrenceException xmlns:gd="http://schemas.google.com/g/2005"/>"#
        );
    }

    #[test]
    fn test_element_emitted_when_unspecialized_with_link() {
        let exception = parse(
            r#"<gd:recurrenceException xmlns:gd="http://schemas.google.com/g/2005">
                <gd:entryLink href="http://x/1"/>
            </gd:recurrenceException>"#,
        )
        .unwrap();

        let xml = exception.to_xml_string().unwrap();
        assert!(xml.starts_with("<gd:recurrenceException"));
        assert!(xml.contains("<gd:entryLink"));
        assert!(xml.ends_with("</gd:recurrenceException>"));
    }

    #[test]
    fn test_round_trip() {
        let xml = r#"<gd:recurrenceException xmlns:gd="http://schemas.google.com/g/2005" specialized="true" value="v1"><gd:entryLink href="http://x/1" readOnly="true"/></gd:recurrenceException>"#;
        let exception = parse(xml).unwrap();
        assert_eq!(exception.value(), Some("v1"));
        assert_eq!(exception.to_xml_string().unwrap(), xml);
    }

    #[test]
    fn test_last_entry_link_wins() {
        let exception = parse(
            r#"<gd:recurrenceException xmlns:gd="http://schemas.google.com/g/2005">
                <gd:entryLink href="http://x/1"/>
                <gd:entryLink href="http://x/2"/>
            </gd:recurrenceException>"#,
        )
        .unwrap();
        assert_eq!(exception.entry_link().href(), Some("http://x/2"));
    }
}
