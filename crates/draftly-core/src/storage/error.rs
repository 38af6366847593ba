//! Storage error handling
//!
//! Provides typed errors for storage operations with descriptive messages.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Referenced document does not exist
    #[error("Document not found: {id}")]
    DocumentNotFound { id: Uuid },

    /// A share secret may never be empty; empty is the same as absent
    #[error("Share secret must not be empty")]
    EmptySecret,

    /// Stored row could not be decoded
    #[error("Invalid row in '{table}': {details}")]
    InvalidRow { table: &'static str, details: String },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_not_found_display() {
        let id = Uuid::new_v4();
        let err = StorageError::DocumentNotFound { id };

        let msg = err.to_string();
        assert!(msg.contains("Document not found"));
        assert!(msg.contains(&id.to_string()));
    }

    #[test]
    fn test_invalid_row_display() {
        let err = StorageError::InvalidRow {
            table: "documents",
            details: "bad status 'frozen'".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("documents"));
        assert!(msg.contains("frozen"));
    }

    #[test]
    fn test_database_error_conversion() {
        let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StorageError::Database(_)));
    }
}
