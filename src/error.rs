use thiserror::Error;

/// The schema rule a candidate record broke.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    #[error("record has no checksum")]
    MissingChecksum,
    #[error("record has no format")]
    MissingFormat,
    #[error("record format is not an accepted format")]
    InvalidFormat,
    #[error("record has no createdAt timestamp")]
    MissingCreatedAt,
    #[error("record createdAt is not numeric")]
    NonNumericCreatedAt,
    #[error("record has no expiration timestamp")]
    MissingExpiration,
    #[error("record expiration is not numeric")]
    NonNumericExpiration,
    #[error("record has no path")]
    MissingPath,
}

impl ValidationError {
    /// Stable rule identifier, used in logs and command output.
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::MissingChecksum => "MissingChecksum",
            ValidationError::MissingFormat => "MissingFormat",
            ValidationError::InvalidFormat => "InvalidFormat",
            ValidationError::MissingCreatedAt => "MissingCreatedAt",
            ValidationError::NonNumericCreatedAt => "NonNumericCreatedAt",
            ValidationError::MissingExpiration => "MissingExpiration",
            ValidationError::NonNumericExpiration => "NonNumericExpiration",
            ValidationError::MissingPath => "MissingPath",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("validation failed [{}]: {}", .0.rule(), .0)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RecordError {
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            RecordError::Validation(rule) => Some(*rule),
            RecordError::Store(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;
