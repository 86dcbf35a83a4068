use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, warn};

use super::RecordStore;
use crate::{FileRecord, RecordKey, StoreResult};

static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Directory-backed document store: one JSON document per record under
/// `<base>/records/`, named by a digest of the record key.
#[derive(Debug, Clone)]
pub struct DiskStore {
    records_path: PathBuf,
}

impl DiskStore {
    pub async fn new<P: AsRef<Path>>(base_path: P) -> StoreResult<Self> {
        let records_path = base_path.as_ref().join("records");
        fs::create_dir_all(&records_path).await?;

        Ok(Self { records_path })
    }

    fn document_path(&self, key: &RecordKey) -> PathBuf {
        self.records_path.join(format!("{}.json", key_digest(key)))
    }

    // Unique per write so concurrent writers to one key never share a temp file.
    fn staging_path(&self, key: &RecordKey) -> PathBuf {
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        self.records_path
            .join(format!("{}.{}.{}.tmp", key_digest(key), std::process::id(), seq))
    }
}

fn key_digest(key: &RecordKey) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.checksum.as_bytes());
    hasher.update([0u8]);
    hasher.update(key.format.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl RecordStore for DiskStore {
    async fn put(&self, record: &FileRecord) -> StoreResult<()> {
        let key = record.key();
        let document = serde_json::to_vec(record)?;

        let staging = self.staging_path(&key);
        let committed = match fs::write(&staging, document).await {
            Ok(()) => fs::rename(&staging, self.document_path(&key)).await,
            Err(e) => Err(e),
        };
        if let Err(e) = committed {
            match fs::remove_file(&staging).await {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == ErrorKind::NotFound => {}
                Err(cleanup) => {
                    warn!(path = %staging.display(), error = %cleanup, "failed to remove staging file");
                }
            }
            return Err(e.into());
        }

        debug!(%key, "record written");
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> StoreResult<Option<FileRecord>> {
        let document = match fs::read(self.document_path(key)).await {
            Ok(document) => document,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: FileRecord = serde_json::from_slice(&document)?;
        Ok(Some(record))
    }

    async fn delete(&self, key: &RecordKey) -> StoreResult<()> {
        match fs::remove_file(self.document_path(key)).await {
            Ok(()) => {
                debug!(%key, "record removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn scan(&self) -> StoreResult<Vec<FileRecord>> {
        let mut records = Vec::new();

        let mut entries = fs::read_dir(&self.records_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            // A document may be deleted between listing and reading it.
            let document = match fs::read(&path).await {
                Ok(document) => document,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            records.push(serde_json::from_slice(&document)?);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(checksum: &str) -> FileRecord {
        FileRecord {
            checksum: checksum.to_string(),
            format: "pdf".to_string(),
            created_at: 1_700_000_000_000,
            expires: 1_735_948_800_000,
            path: format!("tenant/{}.pdf", checksum),
        }
    }

    #[test]
    fn digest_separates_key_parts() {
        assert_ne!(
            key_digest(&RecordKey::new("ab", "cpdf")),
            key_digest(&RecordKey::new("abc", "pdf"))
        );
    }

    #[tokio::test]
    async fn writes_leave_no_staging_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskStore::new(temp_dir.path()).await.unwrap();

        store.put(&record("a")).await.unwrap();
        store.put(&record("a")).await.unwrap();
        store.put(&record("b")).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path().join("records"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.ends_with(".json")));
    }

    #[tokio::test]
    async fn failed_write_removes_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskStore::new(temp_dir.path()).await.unwrap();
        let blocked = record("blocked");

        // A non-empty directory where the document belongs makes the commit fail.
        let target = store.document_path(&blocked.key());
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("occupied"), "x").unwrap();

        let result = store.put(&blocked).await;
        assert!(matches!(result, Err(crate::StoreError::Io(_))));

        let staged = std::fs::read_dir(temp_dir.path().join("records"))
            .unwrap()
            .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(staged, 0);
    }

    #[tokio::test]
    async fn scan_skips_foreign_files_and_rejects_corrupt_documents() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskStore::new(temp_dir.path()).await.unwrap();
        store.put(&record("a")).await.unwrap();

        std::fs::write(temp_dir.path().join("records/notes.txt"), "ignored").unwrap();
        assert_eq!(store.scan().await.unwrap(), vec![record("a")]);

        std::fs::write(temp_dir.path().join("records/broken.json"), "{").unwrap();
        assert!(matches!(store.scan().await, Err(crate::StoreError::Serialization(_))));
    }
}
