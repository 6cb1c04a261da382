// In-memory problem list with live search

use crate::entry::Entry;
use crate::query::{self, Query};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors returned by store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Delete was given a position outside the displayed list
    #[error("invalid index {position}: {len} entries are displayed")]
    InvalidIndex { position: usize, len: usize },
}

/// Change notification, emitted once per effective mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// An entry was prepended to the list
    Added { entry: Entry },
    /// An entry was removed; `position` is its index in the full list
    Deleted { position: usize, entry: Entry },
    /// The search text changed
    QueryChanged { query: String },
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Canonical problem list plus the current search query
///
/// Entries are kept newest-first. The visible list is never stored: it is
/// derived from the entries and the query every time it is read, so the two
/// cannot drift apart.
pub struct ListStore {
    entries: Vec<Entry>,
    query: Query,
    revision: u64,
    listeners: Vec<Listener>,
}

impl ListStore {
    /// Create an empty store with no active query
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            query: Query::default(),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a problem at the head of the list
    ///
    /// The text is trimmed first. Blank text is ignored and `false` is
    /// returned.
    pub fn add(&mut self, text: &str) -> bool {
        let Some(entry) = Entry::new(text) else {
            debug!("add: ignoring blank text");
            return false;
        };

        self.entries.insert(0, entry.clone());
        debug!(len = self.entries.len(), "add: prepended entry");

        self.emit(StoreEvent::Added { entry });
        true
    }

    /// Delete the entry at `position` in the displayed list
    ///
    /// While a query is active the position refers to the filtered view and is
    /// resolved to the matching entry in the full list before removal.
    pub fn delete(&mut self, position: usize) -> Result<Entry, StoreError> {
        let visible = self.visible_positions();
        let Some(&canonical) = visible.get(position) else {
            debug!(position, len = visible.len(), "delete: position out of range");
            return Err(StoreError::InvalidIndex {
                position,
                len: visible.len(),
            });
        };

        let entry = self.entries.remove(canonical);
        debug!(position, canonical, len = self.entries.len(), "delete: removed entry");

        self.emit(StoreEvent::Deleted {
            position: canonical,
            entry: entry.clone(),
        });
        Ok(entry)
    }

    /// Replace the search text
    ///
    /// The text is stored verbatim. An empty string turns filtering off.
    pub fn set_query(&mut self, text: &str) {
        if self.query.as_str() == text {
            return;
        }

        self.query = Query::new(text);
        debug!(query = text, normalized = self.query.normalized(), "set_query: updated");

        self.emit(StoreEvent::QueryChanged {
            query: text.to_string(),
        });
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Entries currently shown, in list order
    pub fn visible(&self) -> Vec<&Entry> {
        self.visible_positions().into_iter().map(|i| &self.entries[i]).collect()
    }

    /// Positions in [`entries`](Self::entries) of the entries currently shown
    pub fn visible_positions(&self) -> Vec<usize> {
        query::visible_positions(&self.entries, &self.query)
    }

    pub fn visible_len(&self) -> usize {
        self.visible_positions().len()
    }

    /// Full list, newest first
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Search text as entered
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn is_filtering(&self) -> bool {
        self.query.is_active()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ========================================================================
    // Change notification
    // ========================================================================

    /// Counter bumped on every effective mutation
    ///
    /// Renderers compare it with the value they last drew to decide whether
    /// to redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a callback run after every effective mutation
    ///
    /// Listeners are called synchronously, in registration order.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: StoreEvent) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListStore")
            .field("entries", &self.entries)
            .field("query", &self.query)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
