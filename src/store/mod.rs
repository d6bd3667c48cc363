pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::core::config::AppConfig;
use anyhow::Result;

/// Opens the disk store under the configured data directory.
pub fn open_default(config: &AppConfig) -> Result<DiskStore> {
    let path = config.default_data_path()?.join("storage");
    DiskStore::open(&path)
}
