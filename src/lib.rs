pub mod error;
pub mod service;
pub mod storage;
pub mod validation;

mod types;

pub use error::{RecordError, Result, StoreError, StoreResult, ValidationError};
pub use service::FileRecordService;
pub use types::*;
