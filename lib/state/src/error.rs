//! Error types for the state crate.

use std::fmt;

/// Errors from typed store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A value could not be serialized into the store.
    Serialize {
        store: String,
        key: String,
        reason: String,
    },
    /// A stored value could not be deserialized to the requested type.
    Deserialize {
        store: String,
        key: String,
        reason: String,
    },
    /// No value is stored under the key.
    Missing { store: String, key: String },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize { store, key, reason } => {
                write!(f, "failed to serialize '{key}' into store '{store}': {reason}")
            }
            Self::Deserialize { store, key, reason } => {
                write!(
                    f,
                    "failed to deserialize '{key}' from store '{store}': {reason}"
                )
            }
            Self::Missing { store, key } => {
                write!(f, "no value for '{key}' in store '{store}'")
            }
        }
    }
}

impl std::error::Error for StateError {}
