//! # Error Types
//!
//! Domain-specific error types for tradelink-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tradelink-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tradelink-api errors (separate crate)                                 │
//! │  └── ApiError         - HTTP transport and backend failures            │
//! │                                                                         │
//! │  tradelink-flow errors (separate crate)                                │
//! │  └── FlowError        - What the screen sees (action boundary)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → FlowError → Notification          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (order number, sale ids, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are raised before
/// any network call is issued and should be caught at the action boundary
/// and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order cannot be found in the local collection.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The order is in a terminal status; no further transitions exist.
    ///
    /// ## When This Occurs
    /// - Trying to update a delivered order
    /// - Trying to cancel an already cancelled order
    #[error("Order {order_id} is {status} and cannot change status")]
    TerminalStatus {
        order_id: String,
        status: OrderStatus,
    },

    /// The requested status is not in the allowed-next set of the current
    /// status. The transition table is the single source of truth here;
    /// the UI merely mirrors it when deciding which buttons to render.
    ///
    /// ## When This Occurs
    /// - A direct call skips intermediate states (pending → delivered)
    /// - A stale screen submits an action for an order that already moved
    #[error("Invalid status transition: {from} → {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A receipt must reference at least one sale.
    #[error("Receipt must contain at least one sale")]
    EmptyReceipt,

    /// Only completed sales can be aggregated into a receipt.
    #[error("Sale {sale_number} is {status} and cannot be receipted")]
    SaleNotEligible {
        sale_number: String,
        status: String,
    },

    /// One or more selected sales already belong to an existing receipt.
    ///
    /// ## When This Occurs
    /// Another actor receipted a sale between list-load and submit.
    /// The caller should refresh the available list and retry.
    #[error("Sales already receipted: {}", sale_numbers.join(", "))]
    SaleAlreadyClaimed { sale_numbers: Vec<String> },

    /// A selected sale id does not exist in the loaded collection.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
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
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed id).
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
        let err = CoreError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition: pending → delivered"
        );

        let err = CoreError::SaleAlreadyClaimed {
            sale_numbers: vec!["SAL-001".to_string(), "SAL-002".to_string()],
        };
        assert_eq!(err.to_string(), "Sales already receipted: SAL-001, SAL-002");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "orderId".to_string(),
        };
        assert_eq!(err.to_string(), "orderId is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "saleIds".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
