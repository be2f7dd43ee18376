//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors raised when a request or value object fails validation.
///
/// Validation always happens before any codec or storage call, so a
/// `ValidationError` guarantees nothing was decoded or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Unknown profile type")]
    UnknownProfileType,

    #[error("Time range requires both 'from' and 'to'")]
    MissingTimeRange,

    #[error("Time range 'from' is after 'to'")]
    InvertedTimeRange,

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes exposed to transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    DecodeFailed,
    NotFound,
    AmbiguousMatch,
    StorageError,
    WriteFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::DecodeFailed => "DECODE_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AmbiguousMatch => "AMBIGUOUS_MATCH",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::WriteFailed => "WRITE_FAILED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("service");
        assert_eq!(format!("{}", err), "Field 'service' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("labels", "missing '='");
        assert_eq!(
            format!("{}", err),
            "Field 'labels' has invalid format: missing '='"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::ValidationFailed), "VALIDATION_FAILED");
        assert_eq!(format!("{}", ErrorCode::AmbiguousMatch), "AMBIGUOUS_MATCH");
        assert_eq!(format!("{}", ErrorCode::WriteFailed), "WRITE_FAILED");
    }
}
