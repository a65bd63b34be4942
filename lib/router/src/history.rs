//! Session history.
//!
//! Models browser-native URL path history: entries are full hrefs built
//! from a base path joined with the route path, no hash fragment. The log
//! is bounded; only the current session is kept in memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How an entry reached the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A new entry was pushed.
    Push,
    /// The current entry was replaced in place.
    Replace,
}

/// One visited location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Full href: base path joined with the route path.
    pub href: String,
    /// How the entry was recorded.
    pub kind: EntryKind,
    /// When the entry was recorded.
    pub at: DateTime<Utc>,
}

/// Bounded in-memory history log for the session.
#[derive(Debug)]
pub struct History {
    base: String,
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

/// Entries kept before the oldest are dropped.
const DEFAULT_CAPACITY: usize = 128;

impl History {
    /// Creates an empty history with the given base path.
    ///
    /// The base is normalised: a trailing slash is dropped, and an empty or
    /// root base means hrefs equal the route path.
    #[must_use]
    pub fn new(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            base,
            entries: VecDeque::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Builds the full href for a route path.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Pushes a new entry for a route path.
    pub fn push(&mut self, path: &str) {
        self.record(path, EntryKind::Push);
    }

    /// Replaces the current entry, or pushes when the log is empty.
    pub fn replace(&mut self, path: &str) {
        if self.entries.pop_back().is_none() {
            self.record(path, EntryKind::Push);
        } else {
            self.record(path, EntryKind::Replace);
        }
    }

    fn record(&mut self, path: &str, kind: EntryKind) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            href: self.href(path),
            kind,
            at: Utc::now(),
        });
    }

    /// Returns the current location, if any navigation committed yet.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true before the first committed navigation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
