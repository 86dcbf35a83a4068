use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RecordStore;
use crate::{FileRecord, RecordKey, StoreResult};

/// In-process store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<RecordKey, FileRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put(&self, record: &FileRecord) -> StoreResult<()> {
        let mut records = self.records.lock().await;
        records.insert(record.key(), record.clone());
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> StoreResult<Option<FileRecord>> {
        let records = self.records.lock().await;
        Ok(records.get(key).cloned())
    }

    async fn delete(&self, key: &RecordKey) -> StoreResult<()> {
        let mut records = self.records.lock().await;
        records.remove(key);
        Ok(())
    }

    async fn scan(&self) -> StoreResult<Vec<FileRecord>> {
        let records = self.records.lock().await;
        Ok(records.values().cloned().collect())
    }
}
