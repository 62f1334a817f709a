//! In-memory record store.

use crate::error::StoreError;
use crate::record::KeyRecord;
use tracing::debug;

/// Record store that lives for the life of the process.
///
/// Used when persistence is disabled and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<KeyRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(records: Vec<KeyRecord>) -> Self {
        Self { records }
    }

    pub fn load(&self) -> Result<Vec<KeyRecord>, StoreError> {
        debug!("Memory store: returning {} records", self.records.len());
        Ok(self.records.clone())
    }

    /// Append a record. Applies the same encoding rules as the file store.
    pub fn append(&mut self, record: &KeyRecord) -> Result<(), StoreError> {
        record.ensure_encodable()?;
        self.records.push(record.clone());
        Ok(())
    }

    #[cfg(test)]
    fn count(&self) -> usize {
        self.records.len()
    }
}
