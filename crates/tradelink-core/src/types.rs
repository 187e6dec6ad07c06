//! # Domain Types
//!
//! Core domain types for the tradelink client. These are the wire types of
//! the supplier REST API: field names follow the backend's camelCase JSON,
//! statuses are snake_case strings, amounts are bare integers (see
//! [`crate::money::Money`]).
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │      Sale       │   │    Receipt      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  order_number   │   │  sale_number    │   │  receipt_number │       │
//! │  │  status         │   │  status         │   │  sales: SaleRef │       │
//! │  │  items          │   │  items          │   │  totals         │       │
//! │  └────────┬────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │ assigned_transporter (0..1)                                │
//! │  ┌────────▼────────┐   ┌─────────────────┐                             │
//! │  │  Transporter    │   │    Product      │  (referenced, not owned)    │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual Representation of Receipt Membership
//! The backend returns `Receipt.sales` elements as either a bare sale id or
//! an embedded sale object, depending on the populate level of the query.
//! [`SaleRef`] absorbs both at the deserialization boundary so the rest of
//! the codebase only ever sees ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of a wholesaler order, from the supplier's side.
///
/// The transition rules live in [`crate::status`] as a first-class table;
/// this enum only names the states. `Delivered` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by the wholesaler, awaiting supplier confirmation.
    Pending,
    /// Supplier accepted the order.
    Confirmed,
    /// Supplier started producing the ordered goods.
    InProduction,
    /// Goods are ready; a transporter can be assigned or the order shipped.
    ReadyForDelivery,
    /// A transporter has been bound to the order.
    AssignedToTransporter,
    /// The order left the supplier.
    Shipped,
    /// The order reached the wholesaler (terminal).
    Delivered,
    /// The order was rejected or withdrawn (terminal).
    Cancelled,
}

impl OrderStatus {
    /// The wire string the backend uses for this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProduction => "in_production",
            OrderStatus::ReadyForDelivery => "ready_for_delivery",
            OrderStatus::AssignedToTransporter => "assigned_to_transporter",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A wholesaler order as seen by the supplier dashboard.
///
/// Created by the backend when a wholesaler places an order; mutated by
/// supplier-side status updates and transporter assignment; never deleted
/// client-side.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier.
    pub id: String,

    /// Business identifier, unique per tenant.
    pub order_number: String,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Ordered line items.
    pub items: Vec<OrderItem>,

    /// The wholesaler who placed the order.
    pub wholesaler: PartyRef,

    /// Transporter bound to the order, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_transporter: Option<Transporter>,

    /// Sum of line totals.
    pub total_amount: Money,

    /// Discounts applied by the supplier.
    #[serde(default)]
    pub discounts: Money,

    /// Tax computed by the backend.
    #[serde(default)]
    pub tax_amount: Money,

    /// Authoritative grand total from the backend.
    pub final_amount: Money,

    /// Where the order ships to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,

    /// Free-text notes from the wholesaler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_notes: Option<String>,

    /// When the order was placed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Recomputes `total_amount - discounts + tax_amount`.
    ///
    /// Display-level only: the backend's `final_amount` is authoritative.
    /// A mismatch means the local copy is stale and should be refreshed,
    /// never silently corrected.
    pub fn expected_final_amount(&self) -> Money {
        self.total_amount - self.discounts + self.tax_amount
    }
}

/// A line item on an order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    /// Product name at time of ordering (frozen).
    pub product_name: String,
    /// Quantity ordered, always > 0.
    pub quantity: i64,
    /// Unit price at time of ordering (frozen).
    pub unit_price: Money,
}

/// A lightweight reference to another party (wholesaler, retailer).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PartyRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

// =============================================================================
// Transporter
// =============================================================================

/// A transporter available for delivery assignment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transporter {
    pub id: String,

    /// Registered business name, if the transporter is a company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    /// Personal names, if the transporter is an individual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,

    /// Whether the transporter is currently online and taking jobs.
    #[serde(default)]
    pub is_online: bool,
}

impl Transporter {
    /// Human-readable name: business name first, then personal names.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.business_name {
            return name.clone();
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.id.clone(),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// The status of a retail sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Paid and finalized. The only status eligible for receipting.
    Completed,
    /// Cancelled before completion.
    Cancelled,
    /// Refunded after completion.
    Refunded,
}

impl SaleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
            SaleStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed (or voided) retail sale, the unit of receipt aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub sale_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<CustomerDetails>,
    pub items: Vec<SaleItem>,
    pub total_amount: Money,
    pub total_profit: Money,
    pub status: SaleStatus,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
}

impl Sale {
    /// Total quantity across all line items.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Only completed sales may be aggregated into a receipt.
    pub fn is_receiptable(&self) -> bool {
        self.status == SaleStatus::Completed
    }
}

/// A line item on a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// Cost of production, for profit calculation.
    #[serde(default)]
    pub production_price: Money,
    pub total_price: Money,
    #[serde(default)]
    pub profit: Money,
}

/// Customer contact details attached to a sale or receipt.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// =============================================================================
// Receipt
// =============================================================================

/// The status of a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Active,
    Refunded,
}

/// A reference to a sale inside a receipt.
///
/// The API response is heterogeneous: depending on the populate level the
/// element is either the bare sale id or an embedded sale object. The
/// untagged deserialization absorbs both; [`SaleRef::sale_id`] is the one
/// normalized access path.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum SaleRef {
    /// Bare sale id.
    Id(String),
    /// Embedded sale object (only the fields we read are modeled).
    Embedded(EmbeddedSale),
}

impl SaleRef {
    /// The referenced sale id, regardless of representation.
    pub fn sale_id(&self) -> &str {
        match self {
            SaleRef::Id(id) => id,
            SaleRef::Embedded(sale) => &sale.id,
        }
    }
}

/// The subset of sale fields present when a receipt embeds its sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedSale {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Money>,
}

/// An aggregation of one or more completed sales into a single billable
/// document. The member set is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub receipt_number: String,
    /// Member sales, as ids or embedded objects (see [`SaleRef`]).
    pub sales: Vec<SaleRef>,
    pub total_amount: Money,
    pub total_profit: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub receipt_date: DateTime<Utc>,
    pub status: ReceiptStatus,
}

impl Receipt {
    /// Normalized member sale ids, in response order.
    pub fn sale_ids(&self) -> impl Iterator<Item = &str> {
        self.sales.iter().map(|s| s.sale_id())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the supplier's catalogue. Referenced by order and sale
/// line items; not owned by the workflows in this workspace.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub selling_price: Money,
    #[serde(default)]
    pub production_price: Money,
    pub quantity: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

// =============================================================================
// Wholesaler Directory
// =============================================================================

/// A wholesaler in the supplier's client directory.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Wholesaler {
    pub id: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
