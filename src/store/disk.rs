use crate::core::storage::KeyValueStore;
use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "local_storage";

/// Disk backed store using a single fjall partition.
pub struct DiskStore {
    keyspace: Keyspace,
    items: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create storage directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open storage at {}", path.display()))?;
        let items = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open storage partition")?;
        debug!("Opened storage at {}", path.display());

        Ok(Self { keyspace, items })
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist storage")
    }
}

impl KeyValueStore for DiskStore {
    fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let res: Result<Option<T>> = (|| {
            let Some(bytes) = self.items.get(key)? else {
                debug!("Store MISS for key: {}", key);
                return Ok(None);
            };
            let value = serde_json::from_slice(&bytes)?;
            debug!("Store HIT for key: {}", key);
            Ok(Some(value))
        })();

        match res {
            Ok(value) => value,
            Err(e) => {
                debug!("DiskStore get error for key {}: {}", key, e);
                None
            }
        }
    }

    fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.items
            .insert(key, bytes)
            .with_context(|| format!("Failed to write key: {key}"))?;
        self.persist()?;
        debug!("Store SET for key: {}", key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items
            .remove(key)
            .with_context(|| format!("Failed to remove key: {key}"))?;
        self.persist()?;
        debug!("Store REMOVE for key: {}", key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let keys = self
            .items
            .keys()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list stored keys")?;
        for key in keys {
            self.items.remove(key)?;
        }
        self.persist()?;
        debug!("Store CLEAR");
        Ok(())
    }
}
