use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::storage::RecordStore;
use crate::validation::Validator;
use crate::{FileCandidate, FileRecord, FormatSet, RecordKey, Result};

/// Validated CRUD over file records.
///
/// The service keeps no state of its own besides the accepted formats; the
/// store is the system of record. Creates and updates are validated in full
/// before the store is touched, reads and deletes go straight to the store.
#[derive(Clone)]
pub struct FileRecordService {
    store: Arc<dyn RecordStore>,
    validator: Validator,
}

impl FileRecordService {
    pub fn new<S: RecordStore + 'static>(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            validator: Validator::default(),
        }
    }

    pub fn with_formats(mut self, formats: FormatSet) -> Self {
        self.validator = Validator::new(formats);
        self
    }

    pub async fn create(&self, candidate: &FileCandidate) -> Result<FileRecord> {
        let record = self.check(candidate)?;
        self.store.put(&record).await?;
        info!(checksum = %record.checksum, format = %record.format, "file record created");
        Ok(record)
    }

    /// `Ok(None)` when no record exists under `key`.
    pub async fn get(&self, key: &RecordKey) -> Result<Option<FileRecord>> {
        let record = self.store.get(key).await?;
        debug!(%key, found = record.is_some(), "file record lookup");
        Ok(record)
    }

    /// Replaces the record under the candidate's key with the candidate.
    pub async fn update(&self, candidate: &FileCandidate) -> Result<FileRecord> {
        let record = self.check(candidate)?;
        self.store.update(&record).await?;
        info!(checksum = %record.checksum, format = %record.format, "file record updated");
        Ok(record)
    }

    pub async fn destroy(&self, key: &RecordKey) -> Result<()> {
        self.store.delete(key).await?;
        info!(%key, "file record destroyed");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<FileRecord>> {
        Ok(self.store.scan().await?)
    }

    fn check(&self, candidate: &FileCandidate) -> Result<FileRecord> {
        self.validator.validate(candidate).map_err(|rule| {
            warn!(
                rule = rule.rule(),
                key = ?candidate.key(),
                "rejected file record"
            );
            rule.into()
        })
    }
}
