use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composite primary key of a file record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub checksum: String,
    pub format: String,
}

impl RecordKey {
    pub fn new(checksum: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            checksum: checksum.into(),
            format: format.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.checksum, self.format)
    }
}

/// Metadata for one uploaded file. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub checksum: String,
    pub format: String,
    pub created_at: i64,
    pub expires: i64,
    pub path: String,
}

impl FileRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey::new(&self.checksum, &self.format)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Read-only view; nothing in this crate acts on expiry.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expires)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FileRecord {
        FileRecord {
            checksum: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            format: "pdf".to_string(),
            created_at: 1_700_000_000_000,
            expires: 1_735_948_800_000,
            path: "tenant/d41d8cd98f00b204e9800998ecf8427e.pdf".to_string(),
        }
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert_eq!(json["expires"], 1_735_948_800_000i64);
        assert!(json.get("created_at").is_none());
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn key_is_checksum_and_format() {
        let key = record().key();
        assert_eq!(key, RecordKey::new("d41d8cd98f00b204e9800998ecf8427e", "pdf"));
        assert_eq!(key.to_string(), "d41d8cd98f00b204e9800998ecf8427e/pdf");
    }

    #[test]
    fn timestamps_convert_to_utc() {
        let expires = record().expires_at_utc().unwrap();
        assert_eq!(expires.to_rfc3339(), "2025-01-04T00:00:00+00:00");
    }
}
