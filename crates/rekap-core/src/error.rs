//! # Error Types
//!
//! Domain-specific error types for rekap-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rekap-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input parsing failures (preset, section names) │
//! │                                                                         │
//! │  rekap-store errors (separate crate)                                   │
//! │  └── StoreError       - Snapshot load/save failures                    │
//! │                                                                         │
//! │  rekap-report errors (separate crate)                                  │
//! │  └── ExportError      - Rendering or writing the PDF failed            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → user               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error here
//! Filtering and aggregation are total functions. A bad price, a bad date
//! string or an unresolved reference is recovered with a safe default, and an
//! empty result set is a valid report. Errors in this crate only come from
//! parsing names typed by a user (`"mingguan"`, `"pelanggan"`, ...).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A custom report window whose start lies after its end.
    ///
    /// ## When This Occurs
    /// Only when a caller explicitly asks for a validated window. The
    /// resolver itself accepts the inverted range, which then matches nothing.
    #[error("Report window starts ({from}) after it ends ({to})")]
    InvertedWindow { from: String, to: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A value that does not parse, e.g. a date that is not `YYYY-MM-DD`.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a NotAllowed error from a static list of accepted names.
    pub fn not_allowed(field: impl Into<String>, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvertedWindow {
            from: "2024-03-10".to_string(),
            to: "2024-03-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Report window starts (2024-03-10) after it ends (2024-03-01)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::InvalidFormat {
            field: "today".to_string(),
            reason: "expected YYYY-MM-DD, got \"kemarin\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "today has invalid format: expected YYYY-MM-DD, got \"kemarin\""
        );

        let err = ValidationError::not_allowed("preset", &["daily", "weekly"]);
        assert_eq!(
            err.to_string(),
            "preset must be one of: [\"daily\", \"weekly\"]"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "preset".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
