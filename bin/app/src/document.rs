//! Host document abstraction.
//!
//! Stands in for the browser page at the shell's mount seam: a set of
//! element ids the shell can mount into, plus the shared document title the
//! window/tab chrome reads.

use std::collections::HashSet;
use zipfit_router::DocumentTitle;

/// The host page the application mounts into.
#[derive(Debug)]
pub struct HostDocument {
    element_ids: HashSet<String>,
    title: DocumentTitle,
}

impl HostDocument {
    /// Creates an empty document with an empty title.
    #[must_use]
    pub fn new() -> Self {
        Self {
            element_ids: HashSet::new(),
            title: DocumentTitle::default(),
        }
    }

    /// Adds an element id to the document.
    #[must_use]
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.element_ids.insert(id.into());
        self
    }

    /// Returns true when the document contains an element with the id.
    #[must_use]
    pub fn has_element(&self, id: &str) -> bool {
        self.element_ids.contains(id)
    }

    /// Returns the shared document-title handle.
    #[must_use]
    pub fn title(&self) -> &DocumentTitle {
        &self.title
    }
}

impl Default for HostDocument {
    fn default() -> Self {
        Self::new()
    }
}
