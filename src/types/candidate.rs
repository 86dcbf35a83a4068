use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{FileRecord, FormatSet, RecordKey};

/// An unvalidated record as a caller supplied it.
///
/// Every field may be absent and keeps its raw JSON value, so a wrongly typed
/// field (a string date, a numeric format) survives until validation rejects
/// it with the matching rule. A JSON `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
}

impl FileCandidate {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Derives a candidate from a file body: SHA-256 checksum, sniffed format
    /// and a `<tenant>/<checksum>.<format>` path. The format stays empty when
    /// it cannot be detected.
    pub fn describe(data: &[u8], tenant: &str, created_at: i64, ttl: Duration) -> Self {
        let checksum = content_checksum(data);
        let format = FormatSet::detect(data);
        let path = match &format {
            Some(format) => format!("{}/{}.{}", tenant, checksum, format),
            None => format!("{}/{}", tenant, checksum),
        };

        Self {
            checksum: Some(checksum.into()),
            format: format.map(Value::from),
            created_at: Some(created_at.into()),
            expires: Some(created_at.saturating_add(ttl.num_milliseconds()).into()),
            path: Some(path.into()),
        }
    }

    /// The record key, when both key fields hold text.
    pub fn key(&self) -> Option<RecordKey> {
        match (&self.checksum, &self.format) {
            (Some(Value::String(checksum)), Some(Value::String(format))) => {
                Some(RecordKey::new(checksum, format))
            }
            _ => None,
        }
    }

    pub fn with_checksum(mut self, checksum: impl Into<Value>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<Value>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<Value>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn with_expires(mut self, expires: impl Into<Value>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<Value>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<FileRecord> for FileCandidate {
    fn from(record: FileRecord) -> Self {
        Self {
            checksum: Some(record.checksum.into()),
            format: Some(record.format.into()),
            created_at: Some(record.created_at.into()),
            expires: Some(record.expires.into()),
            path: Some(record.path.into()),
        }
    }
}

/// Lowercase hex SHA-256 digest of a file body.
pub fn content_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
