//! Record storage with file and in-memory backends.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record::KeyRecord;
use std::path::PathBuf;
use tracing::info;

/// Storage backend for key records.
#[derive(Debug, Clone)]
pub enum Store {
    /// Append-only record file
    File(FileStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    /// Build the backend selected by configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        if config.persist {
            info!("Using key store at {:?}", config.path);
            Store::file(config.path.clone())
        } else {
            info!("Persistence disabled, using in-memory key store");
            Store::memory()
        }
    }

    /// File-backed store.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Store::File(FileStore::new(path))
    }

    /// Empty in-memory store.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    /// Load all records in insertion order.
    pub fn load(&self) -> Result<Vec<KeyRecord>, StoreError> {
        match self {
            Store::File(s) => s.load(),
            Store::Memory(s) => s.load(),
        }
    }

    /// Append one record.
    pub fn append(&mut self, record: &KeyRecord) -> Result<(), StoreError> {
        match self {
            Store::File(s) => s.append(record),
            Store::Memory(s) => s.append(record),
        }
    }
}

impl From<MemoryStore> for Store {
    fn from(store: MemoryStore) -> Self {
        Store::Memory(store)
    }
}

impl From<FileStore> for Store {
    fn from(store: FileStore) -> Self {
        Store::File(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_selects_backend() {
        let persistent = StoreConfig {
            path: PathBuf::from("keys.txt"),
            persist: true,
        };
        match Store::from_config(&persistent) {
            Store::File(s) => assert_eq!(s.path(), std::path::Path::new("keys.txt")),
            Store::Memory(_) => panic!("expected file store"),
        }

        let ephemeral = StoreConfig {
            path: PathBuf::from("keys.txt"),
            persist: false,
        };
        assert!(matches!(Store::from_config(&ephemeral), Store::Memory(_)));
    }
}
