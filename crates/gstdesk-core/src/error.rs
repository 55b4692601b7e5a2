//! # Error Types
//!
//! Domain-specific error types for gstdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gstdesk-core errors (this file)                                       │
//! │  ├── CoreError        - Pipeline failures (capacity, overflow, render) │
//! │  └── ValidationError  - Opt-in input validation failures               │
//! │                                                                         │
//! │  gstdesk-preview errors (app crate)                                    │
//! │  └── PreviewError     - Config, I/O, and wrapped CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PreviewError → CLI exit           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! - Missing or non-numeric quantity/price/rate: coerced to zero
//! - Negative amounts: passed through (see [`crate::validation`] for opt-in checks)
//! - A block taller than a page: placed alone on its own page

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core document pipeline errors.
///
/// Every variant is a programmer or input error surfaced immediately to the
/// caller, who owns the user-facing message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Page capacity must be at least one row slot.
    ///
    /// ## When This Occurs
    /// - A layout profile was configured with `capacity = 0`
    /// - A caller built a [`crate::pagination::PageBudget`] by hand with zero
    #[error("Page capacity must be positive, got {capacity}")]
    InvalidCapacity { capacity: u32 },

    /// A rendered block claimed zero vertical space.
    #[error("Row cost must be at least 1 slot")]
    ZeroRowCost,

    /// An amount left the range exact decimal arithmetic can hold
    /// (about ±7.9 × 10²⁸).
    ///
    /// ## When This Occurs
    /// - quantity × unit price of a row is too large
    /// - a row's tax, row total, or a document sum is too large
    #[error("Amount too large to compute {what}")]
    AmountOverflow { what: String },

    /// A persisted document record has an unusable shape.
    #[error("Malformed document record: {reason}")]
    MalformedRecord { reason: String },

    /// A fragment template failed to render.
    #[error("Failed to render {fragment}: {source}")]
    Render {
        fragment: &'static str,
        #[source]
        source: askama::Error,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied input doesn't meet requirements.
/// The tax engine never raises them on its own.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., HSN code with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::InvalidCapacity { capacity: 0 };
        assert_eq!(err.to_string(), "Page capacity must be positive, got 0");

        let err = CoreError::AmountOverflow {
            what: "taxable value of row 3".to_string(),
        };
        assert_eq!(err.to_string(), "Amount too large to compute taxable value of row 3");

        let err = CoreError::MalformedRecord {
            reason: "expected an object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed document record: expected an object"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");

        let err = ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(err.to_string(), "tax rate must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "description".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
