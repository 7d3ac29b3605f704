//! # Error Types
//!
//! Domain-specific error types for comptoir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comptoir-core errors (this file)                                      │
//! │  ├── CoreError        - Catalog and sale rule violations               │
//! │  └── ValidationError  - Input shape failures                           │
//! │                                                                         │
//! │  comptoir-store errors (separate crate)                                │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  comptoir-engine errors                                                │
//! │  └── EngineError      - What callers see (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → UI alert            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and transaction rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No product with this id exists.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No category with this id exists (delete of an unknown category).
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// A product references a category id that does not exist.
    ///
    /// ## When This Occurs
    /// - `add_product` / `update_product` with a stale or mistyped category id
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Requested quantity exceeds the stock on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Record sale (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Cola", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Error alert: sale cancelled, nothing mutated
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Category still referenced by at least one product.
    #[error("Category {category} is used by {product_count} product(s)")]
    CategoryInUse {
        category: String,
        product_count: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be at least one.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value does not fit the integer range (price × quantity, sales counter).
    #[error("{field} is out of range")]
    OutOfRange { field: String },

    /// Invalid format (e.g. malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn negative(field: &str) -> Self {
        ValidationError::Negative {
            field: field.to_string(),
        }
    }

    pub(crate) fn out_of_range(field: &str) -> Self {
        ValidationError::OutOfRange {
            field: field.to_string(),
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
        let err = CoreError::InsufficientStock {
            product: "Cola".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Cola: available 3, requested 5"
        );

        let err = CoreError::CategoryInUse {
            category: "Boissons".to_string(),
            product_count: 2,
        };
        assert_eq!(err.to_string(), "Category Boissons is used by 2 product(s)");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::negative("stock").to_string(),
            "stock must not be negative"
        );
        assert_eq!(
            ValidationError::out_of_range("total").to_string(),
            "total is out of range"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
