//! # TradeLink Flow
//!
//! Screen-level workflows for the supplier client: the order dashboard,
//! the transporter assignment sub-flow, the receipt aggregation engine,
//! and the wholesaler directory.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        tradelink-flow (this crate)                      │
//! │   OrderStatusWorkflow · TransporterAssignmentFlow                       │
//! │   ReceiptAggregationEngine · WholesalerDirectory                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │   tradelink-api      HTTP client + port traits (OrdersApi, ...)         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │   tradelink-core     pure domain: transition table, receipt math        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Workflows own local state, validate against tradelink-core before any
//! request leaves the process, and commit local updates only after the
//! backend acknowledges. Outcomes surface through [`NotificationSink`];
//! snapshots for offline fallback go through [`OfflineCache`].

pub mod cache;
pub mod error;
pub mod notify;
pub mod orders;
pub mod receipts;
pub mod transporters;
pub mod wholesalers;

// Re-export the main types at the crate root
pub use cache::{keys, MemoryCache, OfflineCache};
pub use error::{FlowError, FlowResult};
pub use notify::{NotificationSink, RecordingNotifier, Severity, TracingNotifier};
pub use orders::OrderStatusWorkflow;
pub use receipts::{ReceiptAggregationEngine, DEFAULT_FETCH_LIMIT};
pub use transporters::TransporterAssignmentFlow;
pub use wholesalers::WholesalerDirectory;
