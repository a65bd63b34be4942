//! Strongly-typed identifiers for navigation-domain entities.
//!
//! IDs use ULID (Universally Unique Lexicographically Sortable Identifier)
//! format, providing both uniqueness and temporal ordering. A navigation
//! attempt keeps its ID for its whole lifetime, so log lines emitted while
//! resolving, while running hooks, and while activating a view can all be
//! correlated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Unique identifier for a single navigation attempt.
///
/// A fresh ID is minted for every call to `navigate`, including attempts
/// that end in a not-found result or are superseded by a newer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationId(Ulid);

impl NavigationId {
    const PREFIX: &'static str = "nav";

    /// Creates a new ID with a randomly generated ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Creates an ID from a ULID.
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for NavigationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NavigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::PREFIX, self.0)
    }
}

impl FromStr for NavigationId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the display form ("nav_<ulid>") and a raw ULID.
        let ulid_str = s.strip_prefix("nav_").unwrap_or(s);

        Ulid::from_str(ulid_str).map(Self).map_err(|e| ParseIdError {
            id_type: "NavigationId",
            reason: e.to_string(),
        })
    }
}

impl From<Ulid> for NavigationId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl From<NavigationId> for Ulid {
    fn from(id: NavigationId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_id_display_format() {
        let id = NavigationId::new();
        assert!(id.to_string().starts_with("nav_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = NavigationId::new();
        let parsed: NavigationId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let ulid = Ulid::new();
        let id: NavigationId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parse_invalid_ulid() {
        let result: Result<NavigationId, _> = "not_a_ulid".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "NavigationId");
    }

    #[test]
    fn id_equality() {
        let ulid = Ulid::new();
        assert_eq!(NavigationId::from_ulid(ulid), NavigationId::from_ulid(ulid));
    }
}
