//! # tradelink-core: Pure Business Logic for the tradelink Client
//!
//! This crate is the **heart** of the tradelink client. It contains the
//! order-status transition table and the receipt reconciliation routines
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      tradelink Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Orders UI ──► Transporter Modal ──► Receipts UI             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tradelink-flow                               │   │
//! │  │    OrderStatusWorkflow, TransporterAssignmentFlow,             │   │
//! │  │    ReceiptAggregationEngine (the action boundary)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tradelink-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  status   │  │  receipt  │  │ validation│  │   │
//! │  │   │   Order   │  │ transition│  │  claimed  │  │   rules   │  │   │
//! │  │   │   Sale    │  │   table   │  │    set    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tradelink-api (REST client)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, Sale, Receipt, Transporter, etc.)
//! - [`status`] - The order-status transition table and supplier actions
//! - [`receipt`] - Claimed-set reconciliation and receipt aggregation
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`validation`] - Input validation, checked before any network call
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input =
//!    same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are integers in the smallest
//!    currency unit to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tradelink_core::status::validate_transition;
//! use tradelink_core::types::OrderStatus;
//!
//! // The transition table rejects skipped states at the call boundary
//! assert!(validate_transition("o1", OrderStatus::Pending, OrderStatus::Confirmed).is_ok());
//! assert!(validate_transition("o1", OrderStatus::Pending, OrderStatus::Delivered).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tradelink_core::Money` instead of
// `use tradelink_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{claimed_sale_ids, compute_available_sales, find_claimed, ReceiptDraft};
pub use status::{validate_transition, OrderAction};
pub use types::*;
pub use validation::{validate_id, validate_limit, validate_notes, validate_quantity};
