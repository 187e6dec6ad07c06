//! # API Port Traits
//!
//! One trait per backend resource. The workflows in `tradelink-flow`
//! depend on these traits, never on [`crate::RestClient`] directly, so
//! every workflow is testable against an in-memory fake.

use async_trait::async_trait;

use tradelink_core::{Order, OrderStatus, Receipt, ReceiptDraft, Sale, Transporter, Wholesaler};

use crate::error::ApiResult;

/// Supplier order operations.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `GET /api/supplier/orders` (populated).
    async fn list_orders(&self) -> ApiResult<Vec<Order>>;

    /// `PUT /api/supplier/orders/:id/status`.
    ///
    /// The backend persists the new status; the caller owns the local
    /// commit. Transition legality is checked by the workflow before this
    /// call AND enforced authoritatively server-side.
    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ApiResult<()>;

    /// `PUT /api/supplier/orders/:id/assign-transporter`.
    ///
    /// Returns the bound transporter. Repeated calls overwrite the prior
    /// assignment (last-write-wins).
    async fn assign_transporter(
        &self,
        order_id: &str,
        transporter_id: &str,
    ) -> ApiResult<Transporter>;

    /// `PUT /api/supplier/orders/:id/assign-any-transporter`.
    ///
    /// The backend picks any online transporter and returns it.
    async fn assign_any_transporter(&self, order_id: &str) -> ApiResult<Transporter>;
}

/// Transporter directory operations.
#[async_trait]
pub trait TransportersApi: Send + Sync {
    /// `GET /api/transporters/active` - currently online transporters.
    async fn list_active(&self) -> ApiResult<Vec<Transporter>>;
}

/// Supplier sales operations.
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// `GET /api/supplier-sales?limit=N`.
    async fn list_sales(&self, limit: u32) -> ApiResult<Vec<Sale>>;
}

/// Supplier receipt operations.
#[async_trait]
pub trait ReceiptsApi: Send + Sync {
    /// `GET /api/supplier-receipts?limit=N&status=active`.
    async fn list_active_receipts(&self, limit: u32) -> ApiResult<Vec<Receipt>>;

    /// `POST /api/supplier-receipts` with `{saleIds, notes, receiptDate}`.
    ///
    /// The server-side uniqueness constraint on sale membership is the
    /// authoritative duplicate guard; a violation comes back as
    /// [`crate::ApiError::Conflict`].
    async fn create_receipt(&self, draft: &ReceiptDraft) -> ApiResult<Receipt>;
}

/// Wholesaler directory operations.
#[async_trait]
pub trait WholesalersApi: Send + Sync {
    /// `GET /api/supplier/wholesalers`.
    async fn list_wholesalers(&self) -> ApiResult<Vec<Wholesaler>>;
}
