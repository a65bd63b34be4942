//! Named state stores.
//!
//! The application shell installs a [`StateRegistry`] before mount; views
//! and other components share state through named [`Store`]s created on
//! first use. The navigation core never consults this crate.

use crate::error::StateError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Buffered change events per store before slow subscribers start lagging.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// A single state change, broadcast to store subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Store the change happened in.
    pub store: String,
    /// Key that changed.
    pub key: String,
    /// New value, or `None` when the key was removed.
    pub value: Option<JsonValue>,
}

/// A named key-value store of JSON state.
///
/// Clones share the same underlying state and change channel.
#[derive(Clone)]
pub struct Store {
    name: Arc<str>,
    values: Arc<RwLock<HashMap<String, JsonValue>>>,
    changes: broadcast::Sender<StateChange>,
}

impl Store {
    fn new(name: &str) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            name: Arc::from(name),
            values: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }

    /// Returns the store's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<JsonValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Deserializes the value for a key to a concrete type.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is missing or the stored value does
    /// not deserialize to `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, StateError> {
        let value = self.get(key).ok_or_else(|| StateError::Missing {
            store: self.name.to_string(),
            key: key.to_string(),
        })?;
        serde_json::from_value(value).map_err(|e| StateError::Deserialize {
            store: self.name.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sets the raw value for a key and notifies subscribers.
    pub fn set(&self, key: impl Into<String>, value: JsonValue) {
        let key = key.into();
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), value.clone());
        self.notify(key, Some(value));
    }

    /// Serializes a value into the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the value does not serialize to JSON.
    pub fn set_from<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<(), StateError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| StateError::Serialize {
            store: self.name.to_string(),
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.set(key, value);
        Ok(())
    }

    /// Removes a key, notifying subscribers when it was present.
    pub fn remove(&self, key: &str) -> Option<JsonValue> {
        let removed = self
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        if removed.is_some() {
            self.notify(key.to_string(), None);
        }
        removed
    }

    /// Subscribes to change events for this store.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    /// Keys currently present, in no particular order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn notify(&self, key: String, value: Option<JsonValue>) {
        // Send fails only when nobody subscribed, which is fine.
        let _ = self.changes.send(StateChange {
            store: self.name.to_string(),
            key,
            value,
        });
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("name", &self.name).finish()
    }
}

/// Registry of named stores, created on first use.
#[derive(Debug, Default)]
pub struct StateRegistry {
    stores: RwLock<HashMap<String, Store>>,
}

impl StateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store with the given name, creating it if needed.
    #[must_use]
    pub fn store(&self, name: &str) -> Store {
        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        stores
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(store = name, "creating state store");
                Store::new(name)
            })
            .clone()
    }

    /// Returns true when a store with the name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all existing stores, in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn set_get_remove_roundtrip() {
        let registry = StateRegistry::new();
        let store = registry.store("session");

        store.set("user", json!({"name": "tester"}));
        assert_eq!(store.get("user"), Some(json!({"name": "tester"})));

        let removed = store.remove("user");
        assert_eq!(removed, Some(json!({"name": "tester"})));
        assert_eq!(store.get("user"), None);
    }

    #[test]
    fn typed_roundtrip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Filters {
            region: String,
            max_deposit: u64,
        }

        let registry = StateRegistry::new();
        let store = registry.store("listing");

        let filters = Filters {
            region: "서울".to_string(),
            max_deposit: 5000,
        };
        store.set_from("filters", &filters).expect("should serialize");

        let loaded: Filters = store.get_as("filters").expect("should deserialize");
        assert_eq!(loaded, filters);
    }

    #[test]
    fn typed_access_errors() {
        let registry = StateRegistry::new();
        let store = registry.store("listing");

        let err = store.get_as::<u64>("missing").unwrap_err();
        assert!(matches!(err, StateError::Missing { .. }));

        store.set("count", json!("not a number"));
        let err = store.get_as::<u64>("count").unwrap_err();
        assert!(matches!(err, StateError::Deserialize { .. }));
    }

    #[test]
    fn registry_returns_the_same_store() {
        let registry = StateRegistry::new();
        registry.store("session").set("k", json!(1));

        // Second lookup sees the value written through the first handle.
        assert_eq!(registry.store("session").get("k"), Some(json!(1)));
        assert!(registry.contains("session"));
        assert!(!registry.contains("other"));
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let registry = StateRegistry::new();
        let store = registry.store("session");
        let mut changes = store.subscribe();

        store.set("user", json!("tester"));
        let change = changes.recv().await.expect("change event");
        assert_eq!(change.store, "session");
        assert_eq!(change.key, "user");
        assert_eq!(change.value, Some(json!("tester")));

        store.remove("user");
        let change = changes.recv().await.expect("change event");
        assert_eq!(change.value, None);
    }
}
