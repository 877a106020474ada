//! # Error Types
//!
//! Domain-specific error types for verdant-core.
//!
//! ## Error Hierarchy
//! ```text
//! verdant-core errors (this file)
//! ├── CoreError        - Business rule violations
//! └── ValidationError  - Input validation failures
//!
//! verdant-db errors (separate crate)
//! └── DbError          - Database operation failures
//!
//! HTTP API errors (in the server)
//! └── ApiError         - What the frontend sees (serialized)
//!
//! Flow: ValidationError → CoreError → DbError → ApiError → Frontend
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, range, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations. They are caught at the API
/// boundary and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted on a cart with no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A CSV export matched no sales in the requested range.
    ///
    /// Non-fatal: the user is told and no file is produced.
    #[error("no sales found in range '{range}'")]
    ExportEmpty { range: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when untyped boundary input doesn't meet the entity rules,
/// before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A monetary amount was negative where only zero-or-positive is valid.
    #[error("{field} must not be negative")]
    NegativeAmount { field: String },

    /// A count was zero or negative where only positive is valid.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. an unknown report range keyword).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::EmptyCart.to_string(), "cart is empty");

        let err = CoreError::ExportEmpty {
            range: "1day".to_string(),
        };
        assert_eq!(err.to_string(), "no sales found in range '1day'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::NegativeAmount {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "shop_name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
