//! # Export Error Types
//!
//! An export either produces a complete artifact or one of these errors.
//! A report with zero matching sales is a valid artifact, never an error.

use thiserror::Error;

/// Report export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The PDF could not be assembled.
    ///
    /// ## When This Occurs
    /// - Content stream encoding failed
    /// - Document serialization failed
    #[error("Failed to render report: {0}")]
    Render(String),

    /// The artifact could not be written.
    ///
    /// ## When This Occurs
    /// - Output path exists and is not a directory
    /// - Directory not writable
    /// - Disk full
    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}

impl ExportError {
    /// Creates a Write error for a path.
    pub fn write(path: impl Into<String>, reason: impl ToString) -> Self {
        ExportError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<lopdf::Error> for ExportError {
    fn from(err: lopdf::Error) -> Self {
        ExportError::Render(err.to_string())
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
