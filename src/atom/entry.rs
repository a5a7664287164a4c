//! Atom feed and entry data model.
//!
//! A deliberately small slice of RFC 4287: the fields feed round-tripping
//! needs, plus the extension collection that schema extensions parse into.
//! Extension elements inside an entry are routed through the closed dispatch
//! registry; unknown foreign children are skipped, not errors.

use crate::atom::parser::FeedParser;
use crate::common::xml::{XmlNode, XmlWriter};
use crate::common::{Error, Result};
use crate::extensions::Extension;
use crate::extensions::names::{ATOM_NAMESPACE, ATOM_PREFIX};
use chrono::{DateTime, FixedOffset};
use std::io::Write;

pub(crate) const FEED: &str = "feed";
pub(crate) const ENTRY: &str = "entry";
const ID: &str = "id";
const TITLE: &str = "title";
const UPDATED: &str = "updated";
const PUBLISHED: &str = "published";
const SUMMARY: &str = "summary";
const CONTENT: &str = "content";
const LINK: &str = "link";

/// An Atom feed: metadata plus its entry collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    /// Feed identifier (`atom:id`)
    pub id: Option<String>,
    /// Feed title (`atom:title`)
    pub title: Option<String>,
    /// Last update timestamp (`atom:updated`)
    pub updated: Option<DateTime<FixedOffset>>,
    /// Entries in document order
    pub entries: Vec<FeedEntry>,
}

/// An `atom:link` element.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomLink {
    /// Target URI
    pub href: String,
    /// Relation type
    pub rel: Option<String>,
    /// Media type of the target
    pub media_type: Option<String>,
}

/// A single Atom entry, including any schema extensions it carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    /// Entry identifier (`atom:id`)
    pub id: Option<String>,
    /// Entry title (`atom:title`)
    pub title: Option<String>,
    /// Last update timestamp (`atom:updated`)
    pub updated: Option<DateTime<FixedOffset>>,
    /// Publication timestamp (`atom:published`)
    pub published: Option<DateTime<FixedOffset>>,
    /// Short summary text (`atom:summary`)
    pub summary: Option<String>,
    /// Entry content (`atom:content`, text form only)
    pub content: Option<String>,
    /// Links in document order
    pub links: Vec<AtomLink>,
    /// Schema extension elements in document order
    pub extensions: Vec<Extension>,
}

impl FeedEntry {
    /// Build an entry from an `atom:entry` node.
    ///
    /// Extension children dispatch through the registry with `parser` as the
    /// re-entrant context, so an extension may itself capture a nested entry.
    pub(crate) fn from_node(node: &XmlNode, parser: &mut FeedParser) -> Result<Self> {
        if !node.is(ATOM_NAMESPACE, ENTRY) {
            return Err(Error::InvalidArgument(format!(
                "expected atom:entry, got {}",
                node.name()
            )));
        }

        let mut entry = FeedEntry::default();
        for child in node.children() {
            if child.namespace() == Some(ATOM_NAMESPACE) {
                match child.local_name() {
                    ID => entry.id = Some(child.text().to_string()),
                    TITLE => entry.title = Some(child.text().to_string()),
                    UPDATED => entry.updated = Some(parse_timestamp(UPDATED, child.text())?),
                    PUBLISHED => entry.published = Some(parse_timestamp(PUBLISHED, child.text())?),
                    SUMMARY => entry.summary = Some(child.text().to_string()),
                    CONTENT => entry.content = Some(child.text().to_string()),
                    LINK => {
                        if let Some(href) = child.attribute("href") {
                            entry.links.push(AtomLink {
                                href: href.to_string(),
                                rel: child.attribute("rel").map(str::to_string),
                                media_type: child.attribute("type").map(str::to_string),
                            });
                        }
                    },
                    _ => {},
                }
            } else if Extension::handles(child) {
                entry.extensions.push(Extension::parse(child, parser)?);
            }
        }
        Ok(entry)
    }

    /// Write this entry as an `atom:entry` element.
    pub fn write_to<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element_ns(ATOM_PREFIX, ENTRY, ATOM_NAMESPACE)?;
        write_optional_text(writer, ID, self.id.as_deref())?;
        write_optional_text(writer, TITLE, self.title.as_deref())?;
        write_timestamp(writer, UPDATED, self.updated.as_ref())?;
        write_timestamp(writer, PUBLISHED, self.published.as_ref())?;
        write_optional_text(writer, SUMMARY, self.summary.as_deref())?;
        write_optional_text(writer, CONTENT, self.content.as_deref())?;
        for link in &self.links {
            writer.start_element_ns(ATOM_PREFIX, LINK, ATOM_NAMESPACE)?;
            writer.attribute("href", &link.href)?;
            if let Some(rel) = &link.rel {
                writer.attribute("rel", rel)?;
            }
            if let Some(media_type) = &link.media_type {
                writer.attribute("type", media_type)?;
            }
            writer.end_element()?;
        }
        for extension in &self.extensions {
            extension.write_to(writer)?;
        }
        writer.end_element()
    }
}

impl Feed {
    /// Write this feed as an `atom:feed` element.
    pub fn write_to<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element_ns(ATOM_PREFIX, FEED, ATOM_NAMESPACE)?;
        write_optional_text(writer, ID, self.id.as_deref())?;
        write_optional_text(writer, TITLE, self.title.as_deref())?;
        write_timestamp(writer, UPDATED, self.updated.as_ref())?;
        for entry in &self.entries {
            entry.write_to(writer)?;
        }
        writer.end_element()
    }
}

/// Parse an RFC 3339 timestamp element body.
pub(crate) fn parse_timestamp(element: &str, text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map_err(|e| Error::Xml(format!("invalid atom:{element} timestamp {text:?}: {e}")))
}

fn write_optional_text<W: Write>(
    writer: &mut XmlWriter<W>,
    local_name: &str,
    text: Option<&str>,
) -> Result<()> {
    if let Some(text) = text {
        writer.start_element_ns(ATOM_PREFIX, local_name, ATOM_NAMESPACE)?;
        writer.text(text)?;
        writer.end_element()?;
    }
    Ok(())
}

fn write_timestamp<W: Write>(
    writer: &mut XmlWriter<W>,
    local_name: &str,
    timestamp: Option<&DateTime<FixedOffset>>,
) -> Result<()> {
    if let Some(timestamp) = timestamp {
        writer.start_element_ns(ATOM_PREFIX, local_name, ATOM_NAMESPACE)?;
        writer.text(&timestamp.to_rfc3339())?;
        writer.end_element()?;
    }
    Ok(())
}
