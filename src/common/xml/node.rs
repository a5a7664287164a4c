//! In-memory XML element tree with namespace resolution.
//!
//! This is the node abstraction the extension parsers consume: local name,
//! resolved namespace URI, attribute lookup by name, and child elements in
//! document order. Trees are built from a full document fragment with
//! `quick-xml`; namespace declarations are resolved against the ancestor
//! scope chain, so a nested fragment sees prefixes bound by its ancestors.

use crate::common::xml::escape::unescape_xml;
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// A single XML element with resolved namespace information.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    local_name: String,
    prefix: Option<String>,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parse a document fragment into a node tree.
    ///
    /// The fragment must contain exactly one root element.
    pub fn from_str(xml: &str) -> Result<Self> {
        Self::from_bytes(xml.as_bytes())
    }

    /// Parse a document fragment from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        // Ancestor chain of namespace scopes; prefix "" is the default namespace.
        let mut scopes: Vec<HashMap<String, String>> = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let (node, scope) = Self::open_element(e, &scopes)?;
                    scopes.push(scope);
                    stack.push(node);
                },
                Ok(Event::Empty(ref e)) => {
                    let (node, _) = Self::open_element(e, &scopes)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    } else {
                        return Ok(node);
                    }
                },
                Ok(Event::Text(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = std::str::from_utf8(t.as_ref())
                            .map_err(|_| Error::Xml("invalid UTF-8 in text content".to_string()))?;
                        current.text.push_str(&unescape_xml(text));
                    }
                },
                Ok(Event::CData(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = std::str::from_utf8(t.as_ref())
                            .map_err(|_| Error::Xml("invalid UTF-8 in CDATA content".to_string()))?;
                        current.text.push_str(text);
                    }
                },
                Ok(Event::End(_)) => {
                    scopes.pop();
                    if let Some(node) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(node);
                        } else {
                            return Ok(node);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => return Err(Error::Xml(format!("XML parsing error: {e}"))),
            }
            buf.clear();
        }

        Err(Error::Xml("no root element found".to_string()))
    }

    /// Build a node from a start tag, returning it with the namespace scope
    /// the tag declares.
    fn open_element(
        e: &BytesStart<'_>,
        scopes: &[HashMap<String, String>],
    ) -> Result<(XmlNode, HashMap<String, String>)> {
        let name = std::str::from_utf8(e.name().as_ref())
            .map_err(|_| Error::Xml("invalid UTF-8 in tag name".to_string()))?
            .to_string();

        let mut scope = HashMap::new();
        let mut attributes = Vec::new();

        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|_| Error::Xml("invalid UTF-8 in attribute name".to_string()))?;
            let value = std::str::from_utf8(&attr.value)
                .map_err(|_| Error::Xml("invalid UTF-8 in attribute value".to_string()))?;
            let value = unescape_xml(value);

            if key == "xmlns" {
                scope.insert(String::new(), value);
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.insert(prefix.to_string(), value);
            } else {
                attributes.push((key.to_string(), value));
            }
        }

        let (prefix, local_name) = match name.split_once(':') {
            Some((p, l)) => (Some(p.to_string()), l.to_string()),
            None => (None, name.clone()),
        };

        let namespace = Self::resolve(scopes, &scope, prefix.as_deref().unwrap_or(""));

        let node = XmlNode {
            name,
            local_name,
            prefix,
            namespace,
            attributes,
            text: String::new(),
            children: Vec::new(),
        };
        Ok((node, scope))
    }

    /// Resolve a prefix against the current declarations and the ancestor
    /// scope chain, innermost binding first.
    fn resolve(
        scopes: &[HashMap<String, String>],
        current: &HashMap<String, String>,
        prefix: &str,
    ) -> Option<String> {
        if let Some(uri) = current.get(prefix) {
            return Some(uri.clone());
        }
        scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(prefix))
            .cloned()
    }

    /// The qualified tag name as written in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The local name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// The namespace prefix, if the tag carried one.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The resolved namespace URI, if the element is in a namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up an attribute value by name.
    ///
    /// Namespace declarations are not exposed as attributes.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Accumulated text content of this element (children excluded).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check whether this element has the given namespace URI and local name.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let node = XmlNode::from_str(r#"<item id="1">hello</item>"#).unwrap();
        assert_eq!(node.name(), "item");
        assert_eq!(node.local_name(), "item");
        assert_eq!(node.prefix(), None);
        assert_eq!(node.namespace(), None);
        assert_eq!(node.attribute("id"), Some("1"));
        assert_eq!(node.attribute("missing"), None);
        assert_eq!(node.text(), "hello");
    }

    #[test]
    fn test_namespace_resolution() {
        let node =
            XmlNode::from_str(r#"<gd:link xmlns:gd="http://schemas.google.com/g/2005"/>"#).unwrap();
        assert_eq!(node.local_name(), "link");
        assert_eq!(node.prefix(), Some("gd"));
        assert_eq!(node.namespace(), Some("http://schemas.google.com/g/2005"));
        assert!(node.is("http://schemas.google.com/g/2005", "link"));
    }

    #[test]
    fn test_namespace_scope_inheritance() {
        let xml = r#"<root xmlns:a="urn:a" xmlns="urn:default">
            <a:child><a:grandchild/></a:child>
            <plain/>
        </root>"#;
        let root = XmlNode::from_str(xml).unwrap();
        assert_eq!(root.namespace(), Some("urn:default"));

        let child = &root.children()[0];
        assert_eq!(child.namespace(), Some("urn:a"));
        assert_eq!(child.children()[0].namespace(), Some("urn:a"));

        // Default namespace applies to unprefixed descendants
        assert_eq!(root.children()[1].namespace(), Some("urn:default"));
    }

    #[test]
    fn test_inner_declaration_shadows_outer() {
        let xml = r#"<root xmlns:x="urn:outer"><x:a xmlns:x="urn:inner"/><x:b/></root>"#;
        let root = XmlNode::from_str(xml).unwrap();
        assert_eq!(root.children()[0].namespace(), Some("urn:inner"));
        assert_eq!(root.children()[1].namespace(), Some("urn:outer"));
    }

    #[test]
    fn test_children_in_document_order() {
        let root = XmlNode::from_str("<r><a/><b/><c/></r>").unwrap();
        let names: Vec<_> = root.children().iter().map(XmlNode::local_name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_xmlns_not_exposed_as_attribute() {
        let node = XmlNode::from_str(r#"<r xmlns:gd="urn:gd" href="x"/>"#).unwrap();
        assert_eq!(node.attribute("xmlns:gd"), None);
        assert_eq!(node.attribute("href"), Some("x"));
    }

    #[test]
    fn test_attribute_values_unescaped() {
        let node = XmlNode::from_str(r#"<r title="a &amp; b &lt;c&gt;"/>"#).unwrap();
        assert_eq!(node.attribute("title"), Some("a & b <c>"));
    }

    #[test]
    fn test_malformed_document() {
        assert!(XmlNode::from_str("<open><unclosed></open>").is_err());
        assert!(XmlNode::from_str("").is_err());
        assert!(XmlNode::from_str("no markup at all").is_err());
    }
}
