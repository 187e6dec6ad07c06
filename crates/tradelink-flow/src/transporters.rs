//! # Transporter Assignment Flow
//!
//! Sub-flow of the order dashboard: once an order is ready for delivery
//! the supplier either picks a specific online transporter or lets the
//! backend choose one.
//!
//! ## Flow
//! ```text
//! open(order)                      requires ready_for_delivery
//!   └─▶ GET /transporters/active   the pick list
//!
//! assign(order, transporter_id)    PUT .../assign-transporter
//! assign_any(order)                PUT .../assign-any-transporter
//!   └─ Ok(transporter) ──▶ order.assigned_transporter = Some(t)
//!                          order.status = assigned_to_transporter
//! ```
//!
//! Repeated assignment overwrites the previous transporter server-side
//! (last-write-wins), so an order that is already assigned may be
//! re-assigned; any other status is rejected. Failures leave the order
//! untouched and surface a notification, the same discipline as the
//! status workflow. The mutating entry points take `&mut self`, so two
//! assignments cannot be in flight at once.

use std::sync::Arc;

use tracing::instrument;

use tradelink_api::{OrdersApi, TransportersApi};
use tradelink_core::{validate_id, CoreError, Order, OrderStatus, Transporter};

use crate::error::{FlowError, FlowResult};
use crate::notify::NotificationSink;

// =============================================================================
// Flow
// =============================================================================

pub struct TransporterAssignmentFlow {
    orders_api: Arc<dyn OrdersApi>,
    transporters_api: Arc<dyn TransportersApi>,
    notifier: Arc<dyn NotificationSink>,
}

impl TransporterAssignmentFlow {
    pub fn new(
        orders_api: Arc<dyn OrdersApi>,
        transporters_api: Arc<dyn TransportersApi>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            orders_api,
            transporters_api,
            notifier,
        }
    }

    /// Opens the assignment flow for an order: checks eligibility and
    /// fetches the currently online transporters.
    ///
    /// ## Errors
    /// - [`FlowError::NotReadyForAssignment`] unless the order is
    ///   `ready_for_delivery` (or already assigned, for re-assignment)
    /// - [`FlowError::Api`] when the pick list cannot be fetched
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn open(&self, order: &Order) -> FlowResult<Vec<Transporter>> {
        self.check_assignable(order)?;

        match self.transporters_api.list_active().await {
            Ok(transporters) => Ok(transporters),
            Err(err) => {
                self.notifier
                    .error(&format!("Failed to load transporters: {err}"));
                Err(err.into())
            }
        }
    }

    /// Assigns a specific transporter to the order.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn assign(&mut self, order: &mut Order, transporter_id: &str) -> FlowResult<()> {
        validate_id("transporterId", transporter_id).map_err(CoreError::from)?;
        self.check_assignable(order)?;
        let order_id = order.id.clone();
        self.submit(order, |api| async move {
            api.assign_transporter(&order_id, transporter_id).await
        })
        .await
    }

    /// Lets the backend pick any online transporter.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn assign_any(&mut self, order: &mut Order) -> FlowResult<()> {
        self.check_assignable(order)?;
        let order_id = order.id.clone();
        self.submit(order, |api| async move {
            api.assign_any_transporter(&order_id).await
        })
        .await
    }

    fn check_assignable(&self, order: &Order) -> FlowResult<()> {
        match order.status {
            OrderStatus::ReadyForDelivery | OrderStatus::AssignedToTransporter => Ok(()),
            status => {
                let err = FlowError::NotReadyForAssignment {
                    order_id: order.id.clone(),
                    status,
                };
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn submit<F, Fut>(&self, order: &mut Order, call: F) -> FlowResult<()>
    where
        F: FnOnce(Arc<dyn OrdersApi>) -> Fut,
        Fut: std::future::Future<Output = tradelink_api::ApiResult<Transporter>>,
    {
        match call(self.orders_api.clone()).await {
            Ok(transporter) => {
                self.notifier.success(&format!(
                    "Order {} assigned to {}",
                    order.order_number,
                    transporter.display_name()
                ));
                order.assigned_transporter = Some(transporter);
                order.status = OrderStatus::AssignedToTransporter;
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Failed to assign transporter: {err}"));
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
