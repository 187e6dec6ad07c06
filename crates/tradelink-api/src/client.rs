//! # REST Client
//!
//! [`RestClient`] implements every API port trait over a shared
//! [`HttpClient`]. Endpoint payloads follow the backend's envelope
//! convention:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Success:  { "success": true,  "orders": [...] }                        │
//! │  Rejected: { "success": false, "message": "..." }  (2xx!)               │
//! │  Failure:  non-2xx status + error body (see http.rs)                    │
//! │                                                                         │
//! │  A success:false envelope on a 2xx maps to ApiError::Rejected;          │
//! │  there is no silent partial success.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use tradelink_core::{Order, OrderStatus, Receipt, ReceiptDraft, Sale, Transporter, Wholesaler};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::session::SessionEvents;
use crate::traits::{OrdersApi, ReceiptsApi, SalesApi, TransportersApi, WholesalersApi};

// =============================================================================
// Envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    success: bool,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransporterEnvelope {
    success: bool,
    #[serde(default)]
    transporter: Option<Transporter>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransportersEnvelope {
    success: bool,
    #[serde(default)]
    transporters: Vec<Transporter>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SalesEnvelope {
    success: bool,
    #[serde(default)]
    sales: Vec<Sale>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReceiptsEnvelope {
    success: bool,
    #[serde(default)]
    receipts: Vec<Receipt>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReceiptEnvelope {
    success: bool,
    #[serde(default)]
    receipt: Option<Receipt>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WholesalersEnvelope {
    success: bool,
    #[serde(default)]
    wholesalers: Vec<Wholesaler>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps a `success: false` envelope to [`ApiError::Rejected`].
fn rejected(message: Option<String>) -> ApiError {
    ApiError::Rejected(message.unwrap_or_else(|| "Request rejected by server".to_string()))
}

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStatusRequest {
    status: OrderStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignTransporterRequest<'a> {
    transporter_id: &'a str,
}

/// Create payload: the backend recomputes totals; only the member set,
/// the notes, and the date travel on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateReceiptRequest<'a> {
    sale_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
    receipt_date: DateTime<Utc>,
}

// =============================================================================
// Rest Client
// =============================================================================

/// The production implementation of the API port traits.
#[derive(Clone)]
pub struct RestClient {
    http: HttpClient,
}

impl RestClient {
    /// Builds a client from configuration and a session-events sink.
    pub fn new(config: &ApiConfig, session: std::sync::Arc<dyn SessionEvents>) -> ApiResult<Self> {
        Ok(RestClient {
            http: HttpClient::new(config, session)?,
        })
    }
}

#[async_trait]
impl OrdersApi for RestClient {
    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        let env: OrdersEnvelope = self
            .http
            .get("/api/supplier/orders?populate=wholesaler,assignedTransporter")
            .await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        Ok(env.orders)
    }

    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ApiResult<()> {
        let env: AckEnvelope = self
            .http
            .put(
                &format!("/api/supplier/orders/{}/status", order_id),
                &UpdateStatusRequest { status },
            )
            .await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        info!(order_id, status = %status, "Order status persisted");
        Ok(())
    }

    async fn assign_transporter(
        &self,
        order_id: &str,
        transporter_id: &str,
    ) -> ApiResult<Transporter> {
        let env: TransporterEnvelope = self
            .http
            .put(
                &format!("/api/supplier/orders/{}/assign-transporter", order_id),
                &AssignTransporterRequest { transporter_id },
            )
            .await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        env.transporter
            .ok_or_else(|| ApiError::InvalidResponse("Missing transporter in response".to_string()))
    }

    async fn assign_any_transporter(&self, order_id: &str) -> ApiResult<Transporter> {
        let env: TransporterEnvelope = self
            .http
            .put_empty(&format!(
                "/api/supplier/orders/{}/assign-any-transporter",
                order_id
            ))
            .await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        env.transporter
            .ok_or_else(|| ApiError::InvalidResponse("Missing transporter in response".to_string()))
    }
}

#[async_trait]
impl TransportersApi for RestClient {
    async fn list_active(&self) -> ApiResult<Vec<Transporter>> {
        let env: TransportersEnvelope = self.http.get("/api/transporters/active").await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        Ok(env.transporters)
    }
}

#[async_trait]
impl SalesApi for RestClient {
    async fn list_sales(&self, limit: u32) -> ApiResult<Vec<Sale>> {
        let env: SalesEnvelope = self
            .http
            .get(&format!("/api/supplier-sales?limit={}", limit))
            .await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        Ok(env.sales)
    }
}

#[async_trait]
impl ReceiptsApi for RestClient {
    async fn list_active_receipts(&self, limit: u32) -> ApiResult<Vec<Receipt>> {
        let env: ReceiptsEnvelope = self
            .http
            .get(&format!("/api/supplier-receipts?limit={}&status=active", limit))
            .await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        Ok(env.receipts)
    }

    async fn create_receipt(&self, draft: &ReceiptDraft) -> ApiResult<Receipt> {
        let body = CreateReceiptRequest {
            sale_ids: &draft.sale_ids,
            notes: draft.notes.as_deref(),
            receipt_date: draft.receipt_date,
        };
        let env: ReceiptEnvelope = self.http.post("/api/supplier-receipts", &body).await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        let receipt = env
            .receipt
            .ok_or_else(|| ApiError::InvalidResponse("Missing receipt in response".to_string()))?;
        info!(
            receipt_number = %receipt.receipt_number,
            sales = draft.sale_ids.len(),
            total = %draft.total_amount,
            "Receipt created"
        );
        Ok(receipt)
    }
}

#[async_trait]
impl WholesalersApi for RestClient {
    async fn list_wholesalers(&self) -> ApiResult<Vec<Wholesaler>> {
        let env: WholesalersEnvelope = self.http.get("/api/supplier/wholesalers").await?;
        if !env.success {
            return Err(rejected(env.message));
        }
        Ok(env.wholesalers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
