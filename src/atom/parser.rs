//! Feed parsing and the scoped entry-capture mechanism.
//!
//! `parse_entry` is deliberately re-entrant: an extension parser that finds a
//! nested `atom:entry` inside its own element calls back into the same
//! parser. The "entry produced" notification fires synchronously at the end
//! of every `parse_entry` call, and whoever is listening may take the entry
//! and suppress the default handling (appending to the ambient feed).
//!
//! [`EntryCapture`] is the scoped form of that subscription: it installs a
//! one-shot listener and removes it again in `Drop`, so a parse failure
//! inside the nested entry cannot leave a dangling interception handler that
//! would corrupt a later, unrelated parse.

use crate::atom::entry::{ENTRY, FEED, Feed, FeedEntry, parse_timestamp};
use crate::common::xml::XmlNode;
use crate::common::{Error, Result};
use crate::extensions::names::ATOM_NAMESPACE;
use std::cell::RefCell;
use std::rc::Rc;

/// Notification payload for a completed entry.
///
/// The listener may [`take_entry`](Self::take_entry) to assume ownership and
/// set [`discard`](Self::discard) to stop the parser from appending the entry
/// to the ambient feed.
pub struct EntryEvent {
    entry: Option<FeedEntry>,
    /// Suppress the parser's default handling of this entry.
    pub discard: bool,
}

impl EntryEvent {
    /// Borrow the produced entry, if still present.
    pub fn entry(&self) -> Option<&FeedEntry> {
        self.entry.as_ref()
    }

    /// Take ownership of the produced entry.
    pub fn take_entry(&mut self) -> Option<FeedEntry> {
        self.entry.take()
    }
}

/// Callback invoked whenever `parse_entry` completes an entry.
pub type EntryListener = Box<dyn FnMut(&mut EntryEvent)>;

/// Atom feed parser with a re-entrant entry parsing entry point.
pub struct FeedParser {
    entries: Vec<FeedEntry>,
    listener: Option<EntryListener>,
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser {
    /// Create a parser with an empty ambient entry collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            listener: None,
        }
    }

    /// Parse a complete `atom:feed` document.
    pub fn parse_feed(&mut self, xml: &str) -> Result<Feed> {
        let root = XmlNode::from_str(xml)?;
        if !root.is(ATOM_NAMESPACE, FEED) {
            return Err(Error::InvalidArgument(format!(
                "expected atom:feed, got {}",
                root.name()
            )));
        }

        let mut feed = Feed::default();
        for child in root.children() {
            if child.namespace() != Some(ATOM_NAMESPACE) {
                continue;
            }
            match child.local_name() {
                ENTRY => self.parse_entry(child)?,
                "id" => feed.id = Some(child.text().to_string()),
                "title" => feed.title = Some(child.text().to_string()),
                "updated" => feed.updated = Some(parse_timestamp("updated", child.text())?),
                _ => {},
            }
        }
        feed.entries = std::mem::take(&mut self.entries);
        Ok(feed)
    }

    /// Parse one `atom:entry` node and run the completion notification.
    ///
    /// Unless a listener discards the entry, it is appended to the ambient
    /// entry collection. The notification fires synchronously, on the same
    /// call stack, before this function returns.
    pub fn parse_entry(&mut self, node: &XmlNode) -> Result<()> {
        let entry = FeedEntry::from_node(node, self)?;
        let mut event = EntryEvent {
            entry: Some(entry),
            discard: false,
        };
        if let Some(listener) = self.listener.as_mut() {
            listener(&mut event);
        }
        if !event.discard && let Some(entry) = event.entry.take() {
            self.entries.push(entry);
        }
        Ok(())
    }

    /// Entries accumulated by `parse_entry` and not claimed by any listener.
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Drain the ambient entry collection.
    pub fn take_entries(&mut self) -> Vec<FeedEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Install an entry listener, returning the previous one.
    pub fn set_entry_listener(&mut self, listener: EntryListener) -> Option<EntryListener> {
        self.listener.replace(listener)
    }

    /// Remove the current entry listener.
    pub fn clear_entry_listener(&mut self) -> Option<EntryListener> {
        self.listener.take()
    }

    /// Install a one-shot listener that intercepts the next produced entry.
    ///
    /// The returned guard restores the previous listener when it goes out of
    /// scope, on success and error paths alike; the intercepted entry is
    /// claimed with [`EntryCapture::finish`].
    pub fn capture_next_entry(&mut self) -> EntryCapture<'_> {
        let slot = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&slot);
        let previous = self.listener.replace(Box::new(move |event: &mut EntryEvent| {
            let mut captured = sink.borrow_mut();
            if captured.is_none()
                && let Some(entry) = event.take_entry()
            {
                *captured = Some(entry);
                event.discard = true;
            }
        }));
        EntryCapture {
            parser: self,
            slot,
            previous,
            detached: false,
        }
    }
}

/// Scope guard for a one-shot entry interception.
///
/// While the guard is alive, the next entry completed by `parse_entry` is
/// diverted into the guard instead of the ambient feed. Dropping the guard
/// restores the previous listener.
pub struct EntryCapture<'p> {
    parser: &'p mut FeedParser,
    slot: Rc<RefCell<Option<FeedEntry>>>,
    previous: Option<EntryListener>,
    detached: bool,
}

impl EntryCapture<'_> {
    /// Delegate to the parser's entry parsing entry point.
    pub fn parse_entry(&mut self, node: &XmlNode) -> Result<()> {
        self.parser.parse_entry(node)
    }

    /// Detach the interception and return the captured entry, if any.
    pub fn finish(mut self) -> Option<FeedEntry> {
        self.detach();
        self.slot.borrow_mut().take()
    }

    fn detach(&mut self) {
        if !self.detached {
            self.parser.listener = self.previous.take();
            self.detached = true;
        }
    }
}

impl Drop for EntryCapture<'_> {
    fn drop(&mut self) {
        self.detach();
    }
}
