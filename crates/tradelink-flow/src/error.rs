//! # Workflow Error Types
//!
//! Everything a workflow can fail with, collapsed into one enum so a
//! screen has a single error type to render.
//!
//! ```text
//! ValidationError ──▶ CoreError ──┐
//!                                 ├──▶ FlowError
//! reqwest::Error ──▶ ApiError  ───┘
//! ```
//!
//! `NotReadyForAssignment` is the only failure born in this crate; the
//! rest bubble up from the layers below via `#[from]`. Concurrent
//! re-submission needs no error variant: every workflow entry point
//! takes `&mut self`, so a second call cannot start while one is on the
//! wire.

use thiserror::Error;
use tradelink_api::ApiError;
use tradelink_core::{CoreError, OrderStatus};

// ============================================================================
// FlowError
// ============================================================================

#[derive(Debug, Error)]
pub enum FlowError {
    /// Domain rule rejected the action before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend call failed; local state was left untouched.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transporter assignment opened for an order that is not ready.
    #[error("order {order_id} is not ready for delivery (current status: {status})")]
    NotReadyForAssignment {
        order_id: String,
        status: OrderStatus,
    },
}

impl FlowError {
    /// True when the session has expired and the user must sign in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, FlowError::Api(api) if api.is_auth())
    }
}

pub type FlowResult<T> = Result<T, FlowError>;

// ============================================================================
// Tests
// ============================================================================
