//! # Receipt Aggregation
//!
//! Pure reconciliation routines for grouping completed sales into receipts.
//!
//! ## The Duplicate-Prevention Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A sale may belong to AT MOST ONE receipt.                              │
//! │                                                                         │
//! │  all sales ────────┐                                                    │
//! │                    ▼                                                    │
//! │  all receipts ──► claimed_sale_ids ──► compute_available_sales          │
//! │  (membership as    (normalized id      (completed ∧ unclaimed,          │
//! │   ids OR embedded   set, union over     insertion order preserved)      │
//! │   objects)          every receipt)                                      │
//! │                                                                         │
//! │  The server-side uniqueness constraint is the real backstop; these     │
//! │  routines close the window client-side so the user is told BEFORE      │
//! │  submitting, not after.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in this module is a pure function of its inputs: calling it
//! twice with the same data yields the same result.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Receipt, Sale};
use crate::validation::validate_notes;

// =============================================================================
// Claimed-Set Reconciliation
// =============================================================================

/// The union of all sale ids referenced by any receipt.
///
/// Membership representation is heterogeneous in the API response (bare id
/// or embedded object); normalization happens once here, not at use sites.
pub fn claimed_sale_ids(receipts: &[Receipt]) -> HashSet<String> {
    receipts
        .iter()
        .flat_map(|r| r.sale_ids())
        .map(str::to_string)
        .collect()
}

/// Sales eligible for a new receipt: completed and not yet claimed.
///
/// Preserves the insertion order of the API response; no further ordering
/// is imposed.
pub fn compute_available_sales<'a>(
    sales: &'a [Sale],
    claimed: &HashSet<String>,
) -> Vec<&'a Sale> {
    sales
        .iter()
        .filter(|s| s.is_receiptable() && !claimed.contains(&s.id))
        .collect()
}

/// The subset of a selection that is already claimed, reported by sale
/// number (what the user sees on screen).
pub fn find_claimed<'a>(selection: &'a [Sale], claimed: &HashSet<String>) -> Vec<&'a Sale> {
    selection.iter().filter(|s| claimed.contains(&s.id)).collect()
}

// =============================================================================
// Receipt Draft
// =============================================================================

/// A validated, fully-aggregated receipt ready to submit to the backend.
///
/// ## Numeric Aggregation
/// - `total_amount = Σ sale.totalAmount`
/// - `total_profit = Σ sale.totalProfit`
/// - `total_items  = Σ Σ item.quantity`
///
/// Integer sums over [`Money`]; exact, no rounding ambiguity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDraft {
    pub sale_ids: Vec<String>,
    pub total_amount: Money,
    pub total_profit: Money,
    pub total_items: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub receipt_date: DateTime<Utc>,
}

impl ReceiptDraft {
    /// Builds a draft from a user-chosen selection of sales.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyReceipt`] for an empty selection — no receipt
    ///   is ever created with zero sales
    /// - [`CoreError::SaleNotEligible`] when a selected sale is not
    ///   `completed`
    ///
    /// This does NOT check the claimed set: the caller re-verifies against
    /// a fresh fetch immediately before submit (the check-then-create
    /// window belongs to the workflow, not to pure math).
    pub fn from_sales(
        selection: &[Sale],
        notes: Option<String>,
        receipt_date: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if selection.is_empty() {
            return Err(CoreError::EmptyReceipt);
        }

        if let Some(notes) = &notes {
            validate_notes(notes)?;
        }

        for sale in selection {
            if !sale.is_receiptable() {
                return Err(CoreError::SaleNotEligible {
                    sale_number: sale.sale_number.clone(),
                    status: sale.status.to_string(),
                });
            }
        }

        Ok(ReceiptDraft {
            sale_ids: selection.iter().map(|s| s.id.clone()).collect(),
            total_amount: selection.iter().map(|s| s.total_amount).sum(),
            total_profit: selection.iter().map(|s| s.total_profit).sum(),
            total_items: selection.iter().map(|s| s.total_items()).sum(),
            notes,
            receipt_date,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
