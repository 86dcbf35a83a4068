pub mod disk;
pub mod memory;

use async_trait::async_trait;

use crate::{FileRecord, RecordKey, StoreResult};

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Key-value document store holding file records under their
/// (checksum, format) key.
///
/// Writes are unconditional upserts: concurrent writers to one key race and
/// the last one wins. Implementations must be safe to share across tasks.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, record: &FileRecord) -> StoreResult<()>;

    /// `Ok(None)` when nothing is stored under `key`.
    async fn get(&self, key: &RecordKey) -> StoreResult<Option<FileRecord>>;

    /// Removing an absent key succeeds.
    async fn delete(&self, key: &RecordKey) -> StoreResult<()>;

    /// Whole-record replacement; there is no field-level merge.
    async fn update(&self, record: &FileRecord) -> StoreResult<()> {
        self.put(record).await
    }

    async fn scan(&self) -> StoreResult<Vec<FileRecord>>;
}
