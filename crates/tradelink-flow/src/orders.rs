//! # Order Status Workflow
//!
//! The supplier's order dashboard: owns the local order collection,
//! exposes the available actions per order, and drives status updates
//! against the backend.
//!
//! ## Commit Discipline
//! ```text
//! update_status(order_id, new_status)
//!   │
//!   ├─ 1. find order locally          ──▶ OrderNotFound
//!   ├─ 2. validate_transition(table)  ──▶ TerminalStatus / InvalidTransition
//!   │      (rejected HERE, before any request leaves the process)
//!   ├─ 3. PUT /orders/:id/status
//!   │
//!   ├─ Ok  ──▶ commit local status, snapshot cache, notify success
//!   └─ Err ──▶ notify error, local state UNTOUCHED
//! ```
//!
//! There is no optimistic update: the collection only ever reflects
//! statuses the backend has acknowledged, so a failed request needs no
//! rollback. Every mutation takes `&mut self`, so submissions are
//! serialized statically; a second update cannot start while one is on
//! the wire.

use std::sync::Arc;

use tracing::{debug, instrument};

use tradelink_api::OrdersApi;
use tradelink_core::{
    validate_id, validate_transition, CoreError, Order, OrderAction, OrderStatus,
};

use crate::cache::{keys, OfflineCache};
use crate::error::FlowResult;
use crate::notify::NotificationSink;

// =============================================================================
// Workflow
// =============================================================================

pub struct OrderStatusWorkflow {
    api: Arc<dyn OrdersApi>,
    notifier: Arc<dyn NotificationSink>,
    cache: Arc<dyn OfflineCache>,
    orders: Vec<Order>,
}

impl OrderStatusWorkflow {
    pub fn new(
        api: Arc<dyn OrdersApi>,
        notifier: Arc<dyn NotificationSink>,
        cache: Arc<dyn OfflineCache>,
    ) -> Self {
        Self {
            api,
            notifier,
            cache,
            orders: Vec::new(),
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches the order list and replaces the local collection.
    ///
    /// On success the list is also snapshotted to the offline cache; on
    /// failure the previous collection stays in place.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> FlowResult<()> {
        match self.api.list_orders().await {
            Ok(orders) => {
                debug!(count = orders.len(), "order list loaded");
                if let Ok(json) = serde_json::to_string(&orders) {
                    self.cache.put(keys::ORDER_SNAPSHOT, json);
                }
                self.orders = orders;
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Failed to load orders: {err}"));
                Err(err.into())
            }
        }
    }

    /// Restores the last snapshotted order list from the offline cache.
    ///
    /// Returns `false` on a cache miss (or an unparsable snapshot, which
    /// is treated the same).
    pub fn restore_from_cache(&mut self) -> bool {
        let Some(json) = self.cache.get(keys::ORDER_SNAPSHOT) else {
            return false;
        };
        match serde_json::from_str::<Vec<Order>>(&json) {
            Ok(orders) => {
                self.orders = orders;
                true
            }
            Err(_) => false,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Mutable access for the transporter assignment sub-flow, which
    /// commits the assignment back into the dashboard's collection.
    pub fn order_mut(&mut self, order_id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == order_id)
    }

    /// The actions the dashboard should render for an order.
    ///
    /// Derived from the same transition table that guards
    /// [`Self::update_status`], so the buttons can never offer a
    /// transition the workflow would reject.
    pub fn available_actions(&self, order_id: &str) -> FlowResult<Vec<OrderAction>> {
        let order = self
            .order(order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;
        Ok(OrderAction::available_for(order.status))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Moves an order to `new_status`.
    ///
    /// The transition is validated locally first; the request only goes
    /// out for legal transitions, and the local collection is only
    /// updated after the backend acknowledges.
    ///
    /// ## Errors
    /// - [`CoreError::OrderNotFound`] - unknown order id
    /// - [`CoreError::TerminalStatus`] / [`CoreError::InvalidTransition`]
    /// - [`crate::FlowError::Api`] - the backend call failed
    #[instrument(skip(self, new_status), fields(status = %new_status))]
    pub async fn update_status(
        &mut self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> FlowResult<()> {
        if let Err(err) = self.try_update(order_id, new_status).await {
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        let order_number = self
            .order(order_id)
            .map(|o| o.order_number.clone())
            .unwrap_or_else(|| order_id.to_string());
        self.notifier.success(&format!(
            "Order {order_number} is now {new_status}"
        ));
        Ok(())
    }

    async fn try_update(&mut self, order_id: &str, new_status: OrderStatus) -> FlowResult<()> {
        validate_id("orderId", order_id).map_err(CoreError::from)?;

        let current = self
            .order(order_id)
            .map(|o| o.status)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;
        validate_transition(order_id, current, new_status)?;

        self.api.update_order_status(order_id, new_status).await?;

        // Backend acknowledged; commit and re-snapshot.
        if let Some(order) = self.order_mut(order_id) {
            order.status = new_status;
        }
        if let Ok(json) = serde_json::to_string(&self.orders) {
            self.cache.put(keys::ORDER_SNAPSHOT, json);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
