//! # Store Error Types
//!
//! Error types for snapshot loading and saving.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and categorization      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  anyhow::Error (in the CLI) ← Adds command context                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  User sees one line on stderr                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bad *values* inside a well-formed document (a text price, a missing
//! channel) are not errors. They are coerced during ingestion and counted in
//! [`crate::IngestReport`].

use thiserror::Error;

/// Snapshot store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot file does not exist.
    ///
    /// ## When This Occurs
    /// - Wrong `--data` path
    /// - Store opened without `create_if_missing` before the first seed
    #[error("Snapshot not found: {path}")]
    NotFound { path: String },

    /// Refusing to overwrite an existing snapshot.
    #[error("Snapshot already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: String },

    /// Reading the snapshot failed.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - Path is a directory
    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    /// Writing the snapshot failed.
    ///
    /// ## When This Occurs
    /// - Output directory not writable
    /// - Disk full
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    /// The document is not valid JSON, or its top-level shape is wrong.
    #[error("Malformed snapshot: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Creates a ReadFailed error for a path.
    pub fn read_failed(path: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::ReadFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a WriteFailed error for a path.
    pub fn write_failed(path: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::WriteFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::NotFound {
            path: "rekap.json".to_string(),
        };
        assert_eq!(err.to_string(), "Snapshot not found: rekap.json");

        let err = StoreError::read_failed("rekap.json", "permission denied");
        assert_eq!(err.to_string(), "Failed to read rekap.json: permission denied");
    }

    #[test]
    fn test_json_error_is_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
