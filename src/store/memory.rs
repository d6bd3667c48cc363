use crate::core::storage::KeyValueStore;
use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// In-memory store. Clones share the same contents.
///
/// Values are kept serialized so reads behave exactly like the disk store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Stores raw bytes under `key`, bypassing serialization.
    #[cfg(test)]
    pub(crate) fn set_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), bytes.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let items = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let Some(bytes) = items.get(key) else {
            debug!("Store MISS for key: {}", key);
            return None;
        };
        match serde_json::from_slice(bytes) {
            Ok(value) => {
                debug!("Store HIT for key: {}", key);
                Some(value)
            }
            Err(e) => {
                debug!("Unreadable value for key {}: {}", key, e);
                None
            }
        }
    }

    fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), bytes);
        debug!("Store SET for key: {}", key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        debug!("Store REMOVE for key: {}", key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!("Store CLEAR");
        Ok(())
    }
}
