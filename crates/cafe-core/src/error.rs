//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Where Errors Can Occur
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  reducer::reduce ............ never fails. Unknown ids are a silent    │
//! │                               no-op and the state comes back as-is.    │
//! │                                                                         │
//! │  validation .................. ValidationError, raised BEFORE an       │
//! │                               inventory edit is dispatched             │
//! │                                                                         │
//! │  lookups (bill requests) ..... CoreError, when a caller explicitly     │
//! │                               asks for something that must exist       │
//! │                                                                         │
//! │  cafe-store .................. StoreError wraps CoreError and adds    │
//! │                               config and bill-service failures        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Core business logic errors.
///
/// None of these come out of the reducer. They are raised by the read-side
/// helpers a caller uses when it needs a definite answer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Table not found: {0}")]
    TableNotFound(u32),

    /// The table exists but nobody is seated there.
    #[error("Table {0} has no active order")]
    TableHasNoOrder(u32),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Inventory item not found: {0}")]
    InventoryItemNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// The inventory form and the bill boundary reject bad input with these
/// before anything reaches the reducer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::TableHasNoOrder(4).to_string(),
            "Table 4 has no active order"
        );
        assert_eq!(
            CoreError::OrderNotFound("order-x".to_string()).to_string(),
            "Order not found: order-x"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "name must be at least 2 characters");

        let err = ValidationError::Negative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock cannot be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
