//! # Engine Error Type
//!
//! The single error type callers of [`PosEngine`](crate::PosEngine) see.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Comptoir                               │
//! │                                                                         │
//! │  UI / CLI                     Engine                                    │
//! │  ────────                     ──────                                    │
//! │                                                                         │
//! │  engine.record_sale(req)                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<T, EngineError>                                          │  │
//! │  │         │                                                        │  │
//! │  │  Core rule broken? ── CoreError::InsufficientStock ──┐          │  │
//! │  │         │                                            │          │  │
//! │  │  Save failed? ─────── StoreError::Io ────────────────┤          │  │
//! │  │         │                                            ▼          │  │
//! │  │  Success ─────────────────────────────────────── EngineError ──►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "INSUFFICIENT_STOCK",                                        │
//! │    "message": "Insufficient stock for Cola: available 0, requested 1" } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use comptoir_core::CoreError;
use comptoir_store::StoreError;

/// Error returned from engine operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CATEGORY_IN_USE",
///   "message": "Category Boissons is used by 2 product(s)"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EngineError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for engine results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Bad input shape (blank name, quantity < 1, malformed email)
    ValidationError,

    /// Unknown product or category id
    NotFound,

    /// Sale quantity above the stock on hand
    InsufficientStock,

    /// Category still referenced by products
    CategoryInUse,

    /// The store refused or failed a save. The in-memory state already
    /// holds the change.
    PersistenceError,
}

impl EngineError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        EngineError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        EngineError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to engine errors.
impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductNotFound(id) => EngineError::not_found("Product", &id),
            CoreError::CategoryNotFound(id) => EngineError::not_found("Category", &id),
            CoreError::UnknownCategory(_) => EngineError::new(ErrorCode::NotFound, message),
            CoreError::InsufficientStock { .. } => {
                EngineError::new(ErrorCode::InsufficientStock, message)
            }
            CoreError::CategoryInUse { .. } => EngineError::new(ErrorCode::CategoryInUse, message),
            CoreError::Validation(e) => EngineError::validation(e.to_string()),
        }
    }
}

/// Converts store errors to engine errors.
impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::new(ErrorCode::PersistenceError, err.to_string())
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::ValidationError;

    #[test]
    fn test_core_error_mapping() {
        let err: EngineError = CoreError::ProductNotFound("p9".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: p9");

        let err: EngineError = CoreError::CategoryInUse {
            category: "Boissons".to_string(),
            product_count: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::CategoryInUse);

        let err: EngineError = CoreError::from(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_store_error_mapping() {
        let err: EngineError = StoreError::Unavailable("read-only".to_string()).into();
        assert_eq!(err.code, ErrorCode::PersistenceError);
    }

    #[test]
    fn test_serialization() {
        let err = EngineError::new(ErrorCode::InsufficientStock, "nope");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"INSUFFICIENT_STOCK","message":"nope"}"#);
    }
}
