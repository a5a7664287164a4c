//! Streaming XML writer.
//!
//! Serializers decide attribute-by-attribute what to emit while writing, so
//! the writer keeps the start tag open until the first child or text arrives
//! and collapses childless elements to the self-closing form. Namespace
//! declarations are emitted once per scope: starting an element with a
//! prefix already bound to the same URI by an ancestor writes no duplicate
//! `xmlns:` attribute.

use crate::common::xml::escape::escape_xml;
use crate::common::{Error, Result};
use std::io::Write;

/// Streaming XML writer over any [`Write`] sink.
pub struct XmlWriter<W: Write> {
    inner: W,
    open: Vec<String>,
    ns_decls: Vec<(usize, String, String)>,
    tag_open: bool,
}

impl<W: Write> XmlWriter<W> {
    /// Create a writer over the given sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            open: Vec::new(),
            ns_decls: Vec::new(),
            tag_open: false,
        }
    }

    /// Open an element with a raw qualified name.
    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.close_pending_tag()?;
        write!(self.inner, "<{name}")?;
        self.open.push(name.to_string());
        self.tag_open = true;
        Ok(())
    }

    /// Open a namespaced element, declaring `xmlns:prefix` unless an ancestor
    /// already bound this prefix to the same URI.
    pub fn start_element_ns(&mut self, prefix: &str, local_name: &str, namespace: &str) -> Result<()> {
        self.start_element(&format!("{prefix}:{local_name}"))?;
        if !self.prefix_in_scope(prefix, namespace) {
            self.ns_decls
                .push((self.open.len(), prefix.to_string(), namespace.to_string()));
            self.attribute(&format!("xmlns:{prefix}"), namespace)?;
        }
        Ok(())
    }

    /// Write an attribute on the currently open start tag.
    ///
    /// Fails once child content has been written: attributes belong to the
    /// start tag only.
    pub fn attribute(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.tag_open {
            return Err(Error::InvalidArgument(format!(
                "attribute {name:?} written outside an open start tag"
            )));
        }
        write!(self.inner, " {name}=\"{}\"", escape_xml(value))?;
        Ok(())
    }

    /// Write escaped text content inside the current element.
    pub fn text(&mut self, text: &str) -> Result<()> {
        if self.open.is_empty() {
            return Err(Error::InvalidArgument(
                "text written outside any element".to_string(),
            ));
        }
        self.close_pending_tag()?;
        write!(self.inner, "{}", escape_xml(text))?;
        Ok(())
    }

    /// Close the current element, collapsing it to `<name/>` if it has no content.
    pub fn end_element(&mut self) -> Result<()> {
        let name = self.open.pop().ok_or_else(|| {
            Error::InvalidArgument("end_element without a matching start_element".to_string())
        })?;
        if self.tag_open {
            write!(self.inner, "/>")?;
            self.tag_open = false;
        } else {
            write!(self.inner, "</{name}>")?;
        }
        let depth = self.open.len();
        self.ns_decls.retain(|(d, _, _)| *d <= depth);
        Ok(())
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn close_pending_tag(&mut self) -> Result<()> {
        if self.tag_open {
            write!(self.inner, ">")?;
            self.tag_open = false;
        }
        Ok(())
    }

    fn prefix_in_scope(&self, prefix: &str, namespace: &str) -> bool {
        self.ns_decls
            .iter()
            .rev()
            .find(|(_, p, _)| p == prefix)
            .is_some_and(|(_, _, uri)| uri == namespace)
    }
}

/// Serialize a fragment into a string through a closure that drives a writer.
pub fn fragment_to_string<F>(write: F) -> Result<String>
where
    F: FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>,
{
    let mut writer = XmlWriter::new(Vec::new());
    write(&mut writer)?;
    String::from_utf8(writer.into_inner())
        .map_err(|_| Error::Xml("writer produced invalid UTF-8".to_string()))
}
