//! # Order Status Transition Table
//!
//! The order lifecycle as a first-class data structure.
//!
//! ## Why a Table?
//! The original screens encoded this graph implicitly, as "which buttons
//! render for which status". That hides the policy in the UI: a direct
//! call could skip states and nothing would reject it. Here the table is
//! the single source of truth, consulted by BOTH the affordance layer
//! (which actions to offer) and the mutation workflow (which transitions
//! to accept). Invalid transitions are rejected at the call boundary.
//!
//! ## The Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Lifecycle                                     │
//! │                                                                         │
//! │  pending ──► confirmed ──► in_production ──► ready_for_delivery        │
//! │                                                    │          │         │
//! │                                                    ▼          │         │
//! │                                   assigned_to_transporter     │         │
//! │                                                    │          │         │
//! │                                                    ▼          ▼         │
//! │                                                  shipped ◄────┘         │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                               delivered ✓ (terminal)    │
//! │                                                                         │
//! │  Any non-terminal state ──► cancelled ✗ (terminal)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::OrderStatus;

// =============================================================================
// Transition Table
// =============================================================================

impl OrderStatus {
    /// The allowed-next set for this status.
    ///
    /// `Cancelled` appears in every non-terminal row: an order can be
    /// rejected or withdrawn at any point before delivery.
    pub const fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::InProduction, OrderStatus::Cancelled],
            OrderStatus::InProduction => &[OrderStatus::ReadyForDelivery, OrderStatus::Cancelled],
            OrderStatus::ReadyForDelivery => &[
                OrderStatus::AssignedToTransporter,
                OrderStatus::Shipped,
                OrderStatus::Cancelled,
            ],
            OrderStatus::AssignedToTransporter => {
                &[OrderStatus::Shipped, OrderStatus::Cancelled]
            }
            OrderStatus::Shipped => &[OrderStatus::Delivered, OrderStatus::Cancelled],
            OrderStatus::Delivered => &[],
            OrderStatus::Cancelled => &[],
        }
    }

    /// Whether this status has no outgoing transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether `next` is a legal direct successor of this status.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }
}

/// Validates a transition against the table.
///
/// ## Errors
/// - [`CoreError::TerminalStatus`] when `from` is terminal
/// - [`CoreError::InvalidTransition`] when `to` is not in the allowed-next
///   set (e.g. `pending → delivered` skipping intermediate states)
pub fn validate_transition(order_id: &str, from: OrderStatus, to: OrderStatus) -> CoreResult<()> {
    if from.is_terminal() {
        return Err(CoreError::TerminalStatus {
            order_id: order_id.to_string(),
            status: from,
        });
    }

    if !from.can_transition_to(to) {
        return Err(CoreError::InvalidTransition { from, to });
    }

    Ok(())
}

// =============================================================================
// Supplier Actions (UI Affordance)
// =============================================================================

/// A supplier-facing action that triggers a status transition.
///
/// The dashboard renders one button per available action; the label and
/// the target status both derive from this enum, so the affordance layer
/// can never drift from the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    /// Accept a pending order.
    Confirm,
    /// Begin producing the goods.
    StartProduction,
    /// Mark the goods ready for delivery.
    MarkReady,
    /// Open the transporter assignment sub-flow.
    AssignTransporter,
    /// Ship the order (directly, or after assignment).
    Ship,
    /// Mark the order as delivered.
    MarkDelivered,
    /// Reject or withdraw the order.
    Cancel,
}

impl OrderAction {
    /// The status this action moves the order to.
    pub const fn target_status(&self) -> OrderStatus {
        match self {
            OrderAction::Confirm => OrderStatus::Confirmed,
            OrderAction::StartProduction => OrderStatus::InProduction,
            OrderAction::MarkReady => OrderStatus::ReadyForDelivery,
            OrderAction::AssignTransporter => OrderStatus::AssignedToTransporter,
            OrderAction::Ship => OrderStatus::Shipped,
            OrderAction::MarkDelivered => OrderStatus::Delivered,
            OrderAction::Cancel => OrderStatus::Cancelled,
        }
    }

    /// All actions, in display order.
    const ALL: [OrderAction; 7] = [
        OrderAction::Confirm,
        OrderAction::StartProduction,
        OrderAction::MarkReady,
        OrderAction::AssignTransporter,
        OrderAction::Ship,
        OrderAction::MarkDelivered,
        OrderAction::Cancel,
    ];

    /// The actions the dashboard should expose for an order in `status`.
    ///
    /// Derived from the transition table, never hand-maintained.
    pub fn available_for(status: OrderStatus) -> Vec<OrderAction> {
        OrderAction::ALL
            .into_iter()
            .filter(|action| status.can_transition_to(action.target_status()))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
