//! Errors returned by the repository.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::{CodecError, StorageError};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("could not parse profile: {0}")]
    Decode(#[source] CodecError),

    #[error("{operation} failed ({context}): {source}")]
    Storage {
        operation: &'static str,
        context: String,
        #[source]
        source: StorageError,
    },

    #[error("could not write {entry}: {reason}")]
    Write { entry: String, reason: String },
}

impl RepositoryError {
    pub(crate) fn storage(
        operation: &'static str,
        context: impl Into<String>,
        source: StorageError,
    ) -> Self {
        RepositoryError::Storage {
            operation,
            context: context.into(),
            source,
        }
    }

    pub(crate) fn write(entry: impl Into<String>, reason: impl ToString) -> Self {
        RepositoryError::Write {
            entry: entry.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the transport-facing error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            RepositoryError::Validation(_) => ErrorCode::ValidationFailed,
            RepositoryError::Decode(_) => ErrorCode::DecodeFailed,
            RepositoryError::Storage { source, .. } => match source {
                StorageError::NotFound(_) => ErrorCode::NotFound,
                StorageError::MultipleMatches { .. } => ErrorCode::AmbiguousMatch,
                StorageError::Backend(_) => ErrorCode::StorageError,
            },
            RepositoryError::Write { .. } => ErrorCode::WriteFailed,
        }
    }
}
