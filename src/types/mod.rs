mod candidate;
mod format;
mod record;

pub use candidate::{content_checksum, FileCandidate};
pub use format::FormatSet;
pub use record::{FileRecord, RecordKey};
