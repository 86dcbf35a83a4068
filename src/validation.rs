use serde_json::Value;

use crate::{FileCandidate, FileRecord, FormatSet, ValidationError};

/// Checks candidates against the file record schema.
///
/// Rules run in field order (checksum, format, createdAt, expires, path) and
/// `validate` reports the first one broken. Validation never mutates its input.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    formats: FormatSet,
}

impl Validator {
    pub fn new(formats: FormatSet) -> Self {
        Self { formats }
    }

    pub fn validate(&self, candidate: &FileCandidate) -> Result<FileRecord, ValidationError> {
        let checksum = checksum(candidate)?;
        let format = self.format(candidate)?;
        let created_at = timestamp(
            &candidate.created_at,
            ValidationError::MissingCreatedAt,
            ValidationError::NonNumericCreatedAt,
        )?;
        let expires = timestamp(
            &candidate.expires,
            ValidationError::MissingExpiration,
            ValidationError::NonNumericExpiration,
        )?;
        let path = path(candidate)?;

        Ok(FileRecord {
            checksum: checksum.to_string(),
            format: format.to_string(),
            created_at,
            expires,
            path: path.to_string(),
        })
    }

    /// Every rule the candidate breaks, in rule order. Empty when valid.
    pub fn violations(&self, candidate: &FileCandidate) -> Vec<ValidationError> {
        [
            checksum(candidate).err(),
            self.format(candidate).err(),
            timestamp(
                &candidate.created_at,
                ValidationError::MissingCreatedAt,
                ValidationError::NonNumericCreatedAt,
            )
            .err(),
            timestamp(
                &candidate.expires,
                ValidationError::MissingExpiration,
                ValidationError::NonNumericExpiration,
            )
            .err(),
            path(candidate).err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn format<'a>(&self, candidate: &'a FileCandidate) -> Result<&'a str, ValidationError> {
        let format = required_text(
            &candidate.format,
            ValidationError::MissingFormat,
            ValidationError::InvalidFormat,
        )?;
        if !self.formats.contains(format) {
            return Err(ValidationError::InvalidFormat);
        }
        Ok(format)
    }
}

fn checksum(candidate: &FileCandidate) -> Result<&str, ValidationError> {
    let missing = ValidationError::MissingChecksum;
    required_text(&candidate.checksum, missing, missing)
}

fn path(candidate: &FileCandidate) -> Result<&str, ValidationError> {
    let missing = ValidationError::MissingPath;
    required_text(&candidate.path, missing, missing)
}

/// Non-empty JSON strings only; other JSON types are never stringified.
fn required_text<'a>(
    field: &'a Option<Value>,
    missing: ValidationError,
    not_text: ValidationError,
) -> Result<&'a str, ValidationError> {
    match field {
        None => Err(missing),
        Some(Value::String(text)) if text.is_empty() => Err(missing),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(_) => Err(not_text),
    }
}

fn timestamp(
    field: &Option<Value>,
    missing: ValidationError,
    non_numeric: ValidationError,
) -> Result<i64, ValidationError> {
    let value = field.as_ref().ok_or(missing)?;
    as_millis(value).ok_or(non_numeric)
}

/// Integral JSON numbers only; strings are never parsed as dates.
fn as_millis(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(millis) = number.as_i64() {
        return Some(millis);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}
