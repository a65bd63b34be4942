//! Route declarations.
//!
//! A route maps a URL path pattern to a view and an open metadata bag. The
//! only metadata key the navigation core itself interprets is `title`,
//! which the title hook applies to the document title on every transition.

use crate::error::RouteDefinitionError;
use crate::view::{ViewBinding, ViewHandle, ViewLoader};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Unique symbolic identifier of a route (`home`, `ai`, `list`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteName(String);

impl RouteName {
    /// Creates a route name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, RouteDefinitionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RouteDefinitionError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, normalised URL path pattern.
///
/// Patterns are absolute (`/ai`), carry no query string or hash fragment,
/// and have trailing slashes normalised away except for the root path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(String);

impl RoutePath {
    /// Parses and normalises a path pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is relative or contains a query
    /// string or hash fragment.
    pub fn parse(pattern: impl Into<String>) -> Result<Self, RouteDefinitionError> {
        let pattern = pattern.into();
        if !pattern.starts_with('/') {
            return Err(RouteDefinitionError::RelativePath { path: pattern });
        }
        if pattern.contains('?') || pattern.contains('#') {
            return Err(RouteDefinitionError::PatternHasSuffix { path: pattern });
        }
        Ok(Self(normalize_trailing_slash(&pattern).to_string()))
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when a requested path matches this pattern exactly.
    ///
    /// The request is normalised first: query string and hash fragment are
    /// stripped, trailing slashes folded. No partial or fuzzy matching.
    #[must_use]
    pub fn matches(&self, requested: &str) -> bool {
        normalize_request_path(requested) == self.0
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalises a requested path for matching: strips query string and hash
/// fragment, folds the trailing slash.
#[must_use]
pub fn normalize_request_path(raw: &str) -> &str {
    let without_fragment = raw.split('#').next().unwrap_or(raw);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    normalize_trailing_slash(without_query)
}

fn normalize_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Open per-route metadata bag.
///
/// Only the `title` key is interpreted by the navigation core; other keys
/// pass through untouched for application use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteMeta {
    entries: HashMap<String, String>,
}

impl RouteMeta {
    /// Key holding the per-route document title.
    pub const TITLE_KEY: &'static str = "title";

    /// Creates an empty metadata bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the route's display title, if declared.
    ///
    /// An empty string counts as declared and is returned verbatim.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get(Self::TITLE_KEY)
    }

    /// Number of entries in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the bag has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A declarative mapping from a URL path pattern to a view and metadata.
#[derive(Debug, Clone)]
pub struct Route {
    /// Unique symbolic name.
    pub name: RouteName,
    /// Unique path pattern.
    pub path: RoutePath,
    /// Open metadata bag.
    pub meta: RouteMeta,
    binding: ViewBinding,
}

impl Route {
    /// Declares a route.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or path pattern is invalid.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        binding: ViewBinding,
    ) -> Result<Self, RouteDefinitionError> {
        Ok(Self {
            name: RouteName::new(name)?,
            path: RoutePath::parse(path)?,
            meta: RouteMeta::new(),
            binding,
        })
    }

    /// Declares a route whose view is bound eagerly.
    pub fn eager(
        name: impl Into<String>,
        path: impl Into<String>,
        view: ViewHandle,
    ) -> Result<Self, RouteDefinitionError> {
        Self::new(name, path, ViewBinding::eager(view))
    }

    /// Declares a route whose view loads on first activation.
    pub fn lazy(
        name: impl Into<String>,
        path: impl Into<String>,
        loader: Arc<dyn ViewLoader>,
    ) -> Result<Self, RouteDefinitionError> {
        Self::new(name, path, ViewBinding::lazy(loader))
    }

    /// Sets the route's display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta.insert(RouteMeta::TITLE_KEY, title);
        self
    }

    /// Adds an arbitrary metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key, value);
        self
    }

    /// Returns how this route obtains its view.
    #[must_use]
    pub fn binding(&self) -> &ViewBinding {
        &self.binding
    }
}
