//! The `gd:entryLink` extension: a link that may embed a full nested entry.
//!
//! The nested `atom:entry` is parsed by delegating back into the feed parser
//! through a scoped capture, so the entry lands in this extension instead of
//! the surrounding feed's entry collection. At most one nested entry is
//! permitted; a second one in the same element is a structural error, never a
//! silent overwrite.

use crate::atom::entry::ENTRY;
use crate::atom::{FeedEntry, FeedParser};
use crate::common::xml::{XmlNode, XmlWriter, format_bool, parse_bool};
use crate::common::{Error, Result};
use crate::extensions::ExtensionElement;
use crate::extensions::field::ExtensionField;
use crate::extensions::names::{
    ATOM_NAMESPACE, ATTR_HREF, ATTR_READ_ONLY, ATTR_REL, ENTRY_LINK, GD_NAMESPACE, GD_PREFIX,
};
use std::io::Write;

/// A nested entry link.
///
/// `readOnly` is presence-tracked: an explicit `readOnly="false"` in the
/// source document is re-emitted on write-back, while a field that was never
/// assigned is omitted even though both read as `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryLink {
    href: Option<String>,
    rel: Option<String>,
    read_only: ExtensionField<bool>,
    entry: Option<FeedEntry>,
}

impl EntryLink {
    /// Create an empty entry link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference URI.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Set the reference URI.
    pub fn set_href(&mut self, href: impl Into<String>) {
        self.href = Some(href.into());
    }

    /// Relation type.
    pub fn rel(&self) -> Option<&str> {
        self.rel.as_deref()
    }

    /// Set the relation type.
    pub fn set_rel(&mut self, rel: impl Into<String>) {
        self.rel = Some(rel.into());
    }

    /// The presence-tracked read-only flag.
    pub fn read_only(&self) -> &ExtensionField<bool> {
        &self.read_only
    }

    /// Set the read-only flag, marking it for write-back.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// The nested entry, if one was captured or assigned.
    pub fn entry(&self) -> Option<&FeedEntry> {
        self.entry.as_ref()
    }

    /// Attach a nested entry.
    pub fn set_entry(&mut self, entry: FeedEntry) {
        self.entry = Some(entry);
    }

    /// Detach and return the nested entry.
    pub fn take_entry(&mut self) -> Option<FeedEntry> {
        self.entry.take()
    }

    fn has_content(&self) -> bool {
        self.href.as_deref().is_some_and(|href| !href.is_empty())
            || self.read_only.is_set()
            || self.entry.is_some()
    }
}

impl ExtensionElement for EntryLink {
    const ELEMENT_NAME: &'static str = ENTRY_LINK;

    fn parse(node: &XmlNode, parser: &mut FeedParser) -> Result<Self> {
        if !node.is(GD_NAMESPACE, Self::ELEMENT_NAME) {
            return Err(Error::InvalidArgument(format!(
                "expected gd:{}, got {}",
                Self::ELEMENT_NAME,
                node.name()
            )));
        }

        let mut link = EntryLink::new();
        link.href = node.attribute(ATTR_HREF).map(str::to_string);
        link.rel = node.attribute(ATTR_REL).map(str::to_string);
        if let Some(raw) = node.attribute(ATTR_READ_ONLY) {
            link.read_only.set(parse_bool(ATTR_READ_ONLY, raw)?);
        }

        for child in node.children() {
            if !child.is(ATOM_NAMESPACE, ENTRY) {
                continue;
            }
            if link.entry.is_some() {
                return Err(Error::Structural(format!(
                    "gd:{} allows at most one nested atom:entry",
                    Self::ELEMENT_NAME
                )));
            }
            // Divert the delegated parse's result into this extension; the
            // guard detaches the interception even if the nested parse fails.
            let mut capture = parser.capture_next_entry();
            capture.parse_entry(child)?;
            link.entry = capture.finish();
        }

        Ok(link)
    }

    fn write_to<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        if !self.has_content() {
            return Ok(());
        }

        writer.start_element_ns(GD_PREFIX, Self::ELEMENT_NAME, GD_NAMESPACE)?;
        if let Some(href) = self.href.as_deref()
            && !href.is_empty()
        {
            writer.attribute(ATTR_HREF, href)?;
        }
        if let Some(rel) = self.rel.as_deref()
            && !rel.is_empty()
        {
            writer.attribute(ATTR_REL, rel)?;
        }
        if self.read_only.is_set() {
            writer.attribute(ATTR_READ_ONLY, format_bool(self.read_only.value()))?;
        }
        if let Some(entry) = &self.entry {
            entry.write_to(writer)?;
        }
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(xml: &str) -> Result<EntryLink> {
        let node = XmlNode::from_str(xml)?;
        EntryLink::parse(&node, &mut FeedParser::new())
    }

    #[test]
    fn test_attributes_only() {
        let link = parse(
            r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005"
                  href="http://x/1" rel="alternate" readOnly="false"/>"#,
        )
        .unwrap();
        assert_eq!(link.href(), Some("http://x/1"));
        assert_eq!(link.rel(), Some("alternate"));
        assert!(link.read_only().is_set());
        assert!(!link.read_only().value());
        assert!(link.entry().is_none());
    }

    #[test]
    fn test_serialization_is_stable() {
        let xml = r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005" href="http://x/1" rel="alternate" readOnly="false"/>"#;
        let link = parse(xml).unwrap();
        assert_eq!(link.to_xml_string().unwrap(), xml);
    }

    #[test]
    fn test_absent_read_only_stays_absent() {
        let link = parse(
            r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005" href="http://x/1"/>"#,
        )
        .unwrap();
        assert!(!link.read_only().is_set());

        let xml = link.to_xml_string().unwrap();
        assert!(!xml.contains("readOnly"));
    }

    #[test]
    fn test_explicit_false_read_only_round_trips() {
        let link = parse(
            r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005" readOnly="false"/>"#,
        )
        .unwrap();
        let xml = link.to_xml_string().unwrap();
        assert!(xml.contains(r#"readOnly="false""#));
    }

    #[test]
    fn test_malformed_read_only_is_fatal() {
        let err = parse(
            r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005" readOnly="maybe"/>"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedAttribute { .. }));
    }

    #[test]
    fn test_name_mismatch_is_contract_violation() {
        let err = parse(r#"<gd:other xmlns:gd="http://schemas.google.com/g/2005"/>"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_link_serializes_to_nothing() {
        let link = EntryLink::new();
        assert_eq!(link.to_xml_string().unwrap(), "");
    }

    #[test]
    fn test_rel_alone_does_not_make_element_worth_writing() {
        let mut link = EntryLink::new();
        link.set_rel("alternate");
        assert_eq!(link.to_xml_string().unwrap(), "");
    }

    #[test]
    fn test_nested_entry_end_to_end() {
        let xml = r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005"
                        xmlns="http://www.w3.org/2005/Atom"
                        href="http://x/1" readOnly="true">
            <entry>
                <id>urn:example:nested</id>
                <title>Nested</title>
            </entry>
        </gd:entryLink>"#;
        let link = parse(xml).unwrap();

        assert_eq!(link.href(), Some("http://x/1"));
        assert!(link.read_only().is_set());
        assert!(link.read_only().value());
        let nested = link.entry().expect("nested entry should be captured");
        assert_eq!(nested.id.as_deref(), Some("urn:example:nested"));

        // The same three observable facts survive a round trip
        let rewritten = link.to_xml_string().unwrap();
        let reparsed = parse(&rewritten).unwrap();
        assert_eq!(reparsed.href(), Some("http://x/1"));
        assert!(reparsed.read_only().is_set() && reparsed.read_only().value());
        assert_eq!(
            reparsed.entry().and_then(|e| e.id.as_deref()),
            Some("urn:example:nested")
        );
    }

    #[test]
    fn test_two_nested_entries_fail_structurally() {
        let xml = r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005"
                        xmlns="http://www.w3.org/2005/Atom">
            <entry><id>urn:example:1</id></entry>
            <entry><id>urn:example:2</id></entry>
        </gd:entryLink>"#;
        let err = parse(xml).unwrap_err();
        assert!(matches!(err, Error::Structural(_)));
    }

    #[test]
    fn test_captured_entry_does_not_leak_into_feed() {
        let xml = r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005"
                        xmlns="http://www.w3.org/2005/Atom">
            <entry><id>urn:example:nested</id></entry>
        </gd:entryLink>"#;
        let node = XmlNode::from_str(xml).unwrap();
        let mut parser = FeedParser::new();
        let link = EntryLink::parse(&node, &mut parser).unwrap();

        assert!(link.entry().is_some());
        assert!(parser.entries().is_empty());
    }

    #[test]
    fn test_nested_parse_failure_leaves_parser_usable() {
        let bad = r#"<gd:entryLink xmlns:gd="http://schemas.google.com/g/2005"
                        xmlns="http://www.w3.org/2005/Atom">
            <entry><updated>not-a-date</updated></entry>
        </gd:entryLink>"#;
        let node = XmlNode::from_str(bad).unwrap();
        let mut parser = FeedParser::new();
        assert!(EntryLink::parse(&node, &mut parser).is_err());

        // No dangling interception: a later unrelated parse behaves normally
        let entry = XmlNode::from_str(
            r#"<entry xmlns="http://www.w3.org/2005/Atom"><id>urn:example:1</id></entry>"#,
        )
        .unwrap();
        parser.parse_entry(&entry).unwrap();
        assert_eq!(parser.entries().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_attribute_presence_round_trips(
            href in proptest::option::of("[a-zA-Z0-9:/._-]{1,24}"),
            rel in proptest::option::of("[a-zA-Z0-9:/._-]{1,24}"),
            read_only in proptest::option::of(any::<bool>()),
        ) {
            let mut link = EntryLink::new();
            if let Some(href) = &href {
                link.set_href(href.clone());
            }
            if let Some(rel) = &rel {
                link.set_rel(rel.clone());
            }
            if let Some(read_only) = read_only {
                link.set_read_only(read_only);
            }

            let xml = link.to_xml_string().unwrap();
            if href.is_none() && read_only.is_none() {
                // Nothing worth writing: the element is omitted entirely
                prop_assert!(xml.is_empty());
            } else {
                let reparsed = parse(&xml).unwrap();
                prop_assert_eq!(link, reparsed);
            }
        }
    }
}
