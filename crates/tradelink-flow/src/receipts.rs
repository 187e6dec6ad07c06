//! # Receipt Aggregation Engine
//!
//! Aggregates completed supplier sales into receipts while preventing
//! the same sale from being receipted twice.
//!
//! ## Duplicate Prevention, Three Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Filtering    available = completed ∧ not in claimed set             │
//! │                  (claimed = union of sale ids over active receipts)     │
//! │                                                                         │
//! │  2. Pre-submit   refresh the claimed set from a FRESH receipt fetch;    │
//! │     re-check     abort with the offending sale numbers if any slipped   │
//! │                  in since the list was loaded                           │
//! │                                                                         │
//! │  3. Server       uniqueness constraint on sale membership; violations   │
//! │     constraint   come back as a structured conflict and are folded      │
//! │                  into the local claimed set                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degraded Mode
//! When the receipt fetch fails but the sales fetch succeeds, the engine
//! still loads: the claimed set is empty, every completed sale shows as
//! available, and layer 2/3 carry the duplicate guarantee alone. The
//! caller is warned and can surface the weaker state.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use tradelink_api::{ApiError, ReceiptsApi, SalesApi};
use tradelink_core::{
    claimed_sale_ids, compute_available_sales, find_claimed, validate_limit, CoreError, Receipt,
    ReceiptDraft, Sale,
};

use crate::error::FlowResult;
use crate::notify::NotificationSink;

/// Default page size for the sales / receipts fetches.
pub const DEFAULT_FETCH_LIMIT: u32 = 200;

// =============================================================================
// Engine
// =============================================================================

pub struct ReceiptAggregationEngine {
    sales_api: Arc<dyn SalesApi>,
    receipts_api: Arc<dyn ReceiptsApi>,
    notifier: Arc<dyn NotificationSink>,
    fetch_limit: u32,
    sales: Vec<Sale>,
    claimed: HashSet<String>,
    degraded: bool,
}

impl ReceiptAggregationEngine {
    pub fn new(
        sales_api: Arc<dyn SalesApi>,
        receipts_api: Arc<dyn ReceiptsApi>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            sales_api,
            receipts_api,
            notifier,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            sales: Vec::new(),
            claimed: HashSet::new(),
            degraded: false,
        }
    }

    /// Overrides the fetch page size (1..=500).
    pub fn with_fetch_limit(mut self, limit: u32) -> FlowResult<Self> {
        validate_limit(limit).map_err(CoreError::from)?;
        self.fetch_limit = limit;
        Ok(self)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches sales and active receipts, rebuilding the claimed set.
    ///
    /// A failed sales fetch is fatal to the load. A failed receipt fetch
    /// degrades instead: the engine keeps the sales, clears the claimed
    /// set, and relies on the pre-submit re-check plus the server
    /// constraint for duplicate prevention.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> FlowResult<()> {
        let sales = match self.sales_api.list_sales(self.fetch_limit).await {
            Ok(sales) => sales,
            Err(err) => {
                self.notifier
                    .error(&format!("Failed to load sales: {err}"));
                return Err(err.into());
            }
        };

        match self.receipts_api.list_active_receipts(self.fetch_limit).await {
            Ok(receipts) => {
                self.claimed = claimed_sale_ids(&receipts);
                self.degraded = false;
                debug!(
                    sales = sales.len(),
                    claimed = self.claimed.len(),
                    "receipt engine loaded"
                );
            }
            Err(err) if err.is_auth() => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "receipt fetch failed, entering degraded mode");
                self.claimed.clear();
                self.degraded = true;
                self.notifier.warning(
                    "Existing receipts could not be loaded; duplicate checking is reduced until the next refresh",
                );
            }
        }

        self.sales = sales;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Sales that can go on a new receipt: completed and unclaimed.
    pub fn available_sales(&self) -> Vec<&Sale> {
        compute_available_sales(&self.sales, &self.claimed)
    }

    /// Whether the last load ran without the receipt list.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Creates a receipt over the selected sales.
    ///
    /// Totals are computed locally as exact integer sums; the claimed
    /// set is re-verified against a fresh receipt fetch immediately
    /// before submit. On success the new receipt's sales join the local
    /// claimed set so they disappear from [`Self::available_sales`]
    /// without a full reload.
    ///
    /// ## Errors
    /// - [`CoreError::SaleNotFound`] - a selected id is not in the
    ///   loaded collection
    /// - [`CoreError::EmptyReceipt`] / [`CoreError::SaleNotEligible`]
    /// - [`CoreError::SaleAlreadyClaimed`] - pre-submit re-check or the
    ///   server constraint caught a duplicate; refresh and retry
    ///
    /// Takes `&mut self`, so submissions are serialized statically; a
    /// second create cannot start while one is on the wire.
    #[instrument(skip(self, sale_ids, notes), fields(selected = sale_ids.len()))]
    pub async fn create_receipt(
        &mut self,
        sale_ids: &[String],
        notes: Option<String>,
    ) -> FlowResult<Receipt> {
        match self.try_create(sale_ids, notes).await {
            Ok(receipt) => {
                self.notifier.success(&format!(
                    "Receipt {} created over {} sale(s)",
                    receipt.receipt_number,
                    receipt.sales.len()
                ));
                Ok(receipt)
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn try_create(
        &mut self,
        sale_ids: &[String],
        notes: Option<String>,
    ) -> FlowResult<Receipt> {
        let selection = self.resolve_selection(sale_ids)?;
        let draft = ReceiptDraft::from_sales(&selection, notes, Utc::now())?;

        // Pre-submit re-check against a fresh claimed set. A failed
        // fetch here keeps the current set; the server constraint still
        // backstops the window.
        match self.receipts_api.list_active_receipts(self.fetch_limit).await {
            Ok(receipts) => {
                self.claimed = claimed_sale_ids(&receipts);
                self.degraded = false;
            }
            Err(err) => warn!(error = %err, "pre-submit receipt refresh failed"),
        }

        let offenders = find_claimed(&selection, &self.claimed);
        if !offenders.is_empty() {
            return Err(CoreError::SaleAlreadyClaimed {
                sale_numbers: offenders.iter().map(|s| s.sale_number.clone()).collect(),
            }
            .into());
        }

        match self.receipts_api.create_receipt(&draft).await {
            Ok(receipt) => {
                self.claimed.extend(draft.sale_ids);
                Ok(receipt)
            }
            Err(ApiError::Conflict {
                sale_ids: conflicted,
                message,
                ..
            }) => {
                // Fold the server's verdict into the local set so the
                // offenders vanish from the available list immediately.
                self.claimed.extend(conflicted.iter().cloned());
                let sale_numbers = if conflicted.is_empty() {
                    vec![message]
                } else {
                    conflicted
                        .iter()
                        .map(|id| self.sale_number_for(id))
                        .collect()
                };
                Err(CoreError::SaleAlreadyClaimed { sale_numbers }.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn resolve_selection(&self, sale_ids: &[String]) -> FlowResult<Vec<Sale>> {
        sale_ids
            .iter()
            .map(|id| {
                self.sales
                    .iter()
                    .find(|s| &s.id == id)
                    .cloned()
                    .ok_or_else(|| CoreError::SaleNotFound(id.clone()).into())
            })
            .collect()
    }

    fn sale_number_for(&self, sale_id: &str) -> String {
        self.sales
            .iter()
            .find(|s| s.id == sale_id)
            .map(|s| s.sale_number.clone())
            .unwrap_or_else(|| sale_id.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
