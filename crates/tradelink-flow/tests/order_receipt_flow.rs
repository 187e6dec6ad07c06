//! End-to-end workflow tests against a stateful in-memory backend.
//!
//! One `FakeServer` implements every API port and keeps its own
//! authoritative state, so these tests exercise the workflows the way a
//! real session does: load, act, and observe both the local collections
//! and the server's records.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use tradelink_flow::OfflineCache;

use tradelink_api::{
    ApiError, ApiResult, OrdersApi, ReceiptsApi, SalesApi, TransportersApi, WholesalersApi,
};
use tradelink_core::{
    claimed_sale_ids, CoreError, Money, Order, OrderAction, OrderStatus, PartyRef, Receipt,
    ReceiptDraft, ReceiptStatus, Sale, SaleItem, SaleRef, SaleStatus, Transporter, Wholesaler,
};
use tradelink_flow::{
    FlowError, MemoryCache, OrderStatusWorkflow, ReceiptAggregationEngine, RecordingNotifier,
    TransporterAssignmentFlow, WholesalerDirectory,
};

// ============================================================================
// Fake Server
// ============================================================================

#[derive(Default)]
struct ServerState {
    orders: Vec<Order>,
    transporters: Vec<Transporter>,
    sales: Vec<Sale>,
    receipts: Vec<Receipt>,
    wholesalers: Vec<Wholesaler>,
    receipt_seq: u32,
}

#[derive(Default)]
struct FakeServer {
    state: Mutex<ServerState>,
}

impl FakeServer {
    fn order_status(&self, order_id: &str) -> Option<OrderStatus> {
        self.state
            .lock()
            .unwrap()
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .map(|o| o.status)
    }

    fn receipt_count(&self) -> usize {
        self.state.lock().unwrap().receipts.len()
    }
}

#[async_trait]
impl OrdersApi for FakeServer {
    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.state.lock().unwrap().orders.clone())
    }

    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "order not found".to_string(),
            })?;
        // The server enforces the same lifecycle independently.
        if !order.status.can_transition_to(status) {
            return Err(ApiError::Validation(format!(
                "cannot move {} to {status}",
                order.status
            )));
        }
        order.status = status;
        Ok(())
    }

    async fn assign_transporter(
        &self,
        order_id: &str,
        transporter_id: &str,
    ) -> ApiResult<Transporter> {
        let mut state = self.state.lock().unwrap();
        let transporter = state
            .transporters
            .iter()
            .find(|t| t.id == transporter_id)
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "transporter not found".to_string(),
            })?;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "order not found".to_string(),
            })?;
        order.assigned_transporter = Some(transporter.clone());
        order.status = OrderStatus::AssignedToTransporter;
        Ok(transporter)
    }

    async fn assign_any_transporter(&self, order_id: &str) -> ApiResult<Transporter> {
        let id = self
            .state
            .lock()
            .unwrap()
            .transporters
            .iter()
            .find(|t| t.is_online)
            .map(|t| t.id.clone())
            .ok_or_else(|| ApiError::Rejected("no transporter online".to_string()))?;
        self.assign_transporter(order_id, &id).await
    }
}

#[async_trait]
impl TransportersApi for FakeServer {
    async fn list_active(&self) -> ApiResult<Vec<Transporter>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .transporters
            .iter()
            .filter(|t| t.is_online)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SalesApi for FakeServer {
    async fn list_sales(&self, limit: u32) -> ApiResult<Vec<Sale>> {
        let state = self.state.lock().unwrap();
        Ok(state.sales.iter().take(limit as usize).cloned().collect())
    }
}

#[async_trait]
impl ReceiptsApi for FakeServer {
    async fn list_active_receipts(&self, limit: u32) -> ApiResult<Vec<Receipt>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .receipts
            .iter()
            .filter(|r| r.status == ReceiptStatus::Active)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create_receipt(&self, draft: &ReceiptDraft) -> ApiResult<Receipt> {
        let mut state = self.state.lock().unwrap();
        let claimed: HashSet<String> = claimed_sale_ids(&state.receipts);
        let conflicted: Vec<String> = draft
            .sale_ids
            .iter()
            .filter(|id| claimed.contains(*id))
            .cloned()
            .collect();
        if !conflicted.is_empty() {
            let receipt_numbers = state
                .receipts
                .iter()
                .filter(|r| r.sale_ids().any(|id| conflicted.iter().any(|c| c.as_str() == id)))
                .map(|r| r.receipt_number.clone())
                .collect();
            return Err(ApiError::Conflict {
                message: "sales already belong to a receipt".to_string(),
                sale_ids: conflicted,
                receipt_numbers,
            });
        }

        state.receipt_seq += 1;
        let receipt = Receipt {
            id: format!("rcp-{}", state.receipt_seq),
            receipt_number: format!("RCP-{:03}", state.receipt_seq),
            sales: draft
                .sale_ids
                .iter()
                .map(|id| SaleRef::Id(id.clone()))
                .collect(),
            total_amount: draft.total_amount,
            total_profit: draft.total_profit,
            customer_details: None,
            notes: draft.notes.clone(),
            receipt_date: draft.receipt_date,
            status: ReceiptStatus::Active,
        };
        state.receipts.push(receipt.clone());
        Ok(receipt)
    }
}

#[async_trait]
impl WholesalersApi for FakeServer {
    async fn list_wholesalers(&self) -> ApiResult<Vec<Wholesaler>> {
        Ok(self.state.lock().unwrap().wholesalers.clone())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        order_number: format!("ORD-{id}"),
        status,
        items: vec![],
        wholesaler: PartyRef {
            id: "wh-1".to_string(),
            business_name: Some("Kisumu General Traders".to_string()),
        },
        assigned_transporter: None,
        total_amount: Money::from_minor(340_000),
        discounts: Money::from_minor(10_000),
        tax_amount: Money::from_minor(20_000),
        final_amount: Money::from_minor(350_000),
        shipping_address: Some("Warehouse 4, Industrial Area".to_string()),
        order_notes: None,
        created_at: Utc::now(),
    }
}

fn sale(id: &str, number: &str, amount: i64, profit: i64, qty: i64) -> Sale {
    Sale {
        id: id.to_string(),
        sale_number: number.to_string(),
        customer_details: None,
        items: vec![SaleItem {
            product_id: format!("p-{id}"),
            product_name: "Cooking oil 20L".to_string(),
            quantity: qty,
            unit_price: Money::from_minor(amount / qty.max(1)),
            production_price: Money::zero(),
            total_price: Money::from_minor(amount),
            profit: Money::from_minor(profit),
        }],
        total_amount: Money::from_minor(amount),
        total_profit: Money::from_minor(profit),
        status: SaleStatus::Completed,
        sale_date: Utc::now(),
    }
}

fn transporter(id: &str, name: &str, online: bool) -> Transporter {
    Transporter {
        id: id.to_string(),
        business_name: Some(name.to_string()),
        first_name: None,
        last_name: None,
        vehicle_type: Some("lorry".to_string()),
        is_online: online,
    }
}

fn server() -> Arc<FakeServer> {
    let server = FakeServer::default();
    {
        let mut state = server.state.lock().unwrap();
        state.orders = vec![order("o1", OrderStatus::Pending)];
        state.transporters = vec![
            transporter("t1", "Swift Haulage", true),
            transporter("t2", "Coast Cargo", false),
        ];
        state.sales = vec![
            sale("s1", "SAL-001", 50_000, 15_000, 5),
            sale("s2", "SAL-002", 200_000, 60_000, 10),
            sale("s3", "SAL-003", 90_000, 20_000, 3),
        ];
        state.wholesalers = vec![Wholesaler {
            id: "wh-1".to_string(),
            business_name: "Kisumu General Traders".to_string(),
            email: Some("orders@kisumutraders.example".to_string()),
            phone: None,
        }];
    }
    Arc::new(server)
}

// ============================================================================
// Order Lifecycle
// ============================================================================

#[tokio::test]
async fn full_order_lifecycle_with_transporter() {
    let server = server();
    let notifier = Arc::new(RecordingNotifier::new());
    let cache = Arc::new(MemoryCache::new());
    let mut orders =
        OrderStatusWorkflow::new(server.clone(), notifier.clone(), cache);
    let mut assignment =
        TransporterAssignmentFlow::new(server.clone(), server.clone(), notifier.clone());

    orders.load().await.unwrap();

    // pending → confirmed → in_production → ready_for_delivery
    orders
        .update_status("o1", OrderStatus::Confirmed)
        .await
        .unwrap();
    orders
        .update_status("o1", OrderStatus::InProduction)
        .await
        .unwrap();
    orders
        .update_status("o1", OrderStatus::ReadyForDelivery)
        .await
        .unwrap();

    // The dashboard now offers the assignment sub-flow.
    let actions = orders.available_actions("o1").unwrap();
    assert!(actions.contains(&OrderAction::AssignTransporter));

    // Only the online transporter shows up in the pick list.
    let order = orders.order("o1").unwrap().clone();
    let pick_list = assignment.open(&order).await.unwrap();
    assert_eq!(pick_list.len(), 1);
    assert_eq!(pick_list[0].id, "t1");

    let order = orders.order_mut("o1").unwrap();
    assignment.assign(order, "t1").await.unwrap();
    assert_eq!(order.status, OrderStatus::AssignedToTransporter);
    assert_eq!(order.assigned_transporter.as_ref().unwrap().id, "t1");
    assert_eq!(
        server.order_status("o1"),
        Some(OrderStatus::AssignedToTransporter)
    );

    // assigned → shipped → delivered
    orders
        .update_status("o1", OrderStatus::Shipped)
        .await
        .unwrap();
    orders
        .update_status("o1", OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(server.order_status("o1"), Some(OrderStatus::Delivered));

    // Delivered is terminal: nothing left to offer, nothing accepted.
    assert!(orders.available_actions("o1").unwrap().is_empty());
    let err = orders
        .update_status("o1", OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::Core(CoreError::TerminalStatus { .. })
    ));
}

#[tokio::test]
async fn skipped_states_never_reach_the_server() {
    let server = server();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut orders = OrderStatusWorkflow::new(
        server.clone(),
        notifier,
        Arc::new(MemoryCache::new()),
    );
    orders.load().await.unwrap();

    let err = orders
        .update_status("o1", OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::Core(CoreError::InvalidTransition { .. })
    ));
    assert_eq!(server.order_status("o1"), Some(OrderStatus::Pending));
}

#[tokio::test]
async fn cancel_is_available_from_any_non_terminal_state() {
    let server = server();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut orders = OrderStatusWorkflow::new(
        server.clone(),
        notifier,
        Arc::new(MemoryCache::new()),
    );
    orders.load().await.unwrap();

    orders
        .update_status("o1", OrderStatus::Confirmed)
        .await
        .unwrap();
    orders
        .update_status("o1", OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(server.order_status("o1"), Some(OrderStatus::Cancelled));
}

// ============================================================================
// Receipt Aggregation
// ============================================================================

#[tokio::test]
async fn receipt_totals_and_claim_tracking() {
    let server = server();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut engine =
        ReceiptAggregationEngine::new(server.clone(), server.clone(), notifier);
    engine.load().await.unwrap();
    assert_eq!(engine.available_sales().len(), 3);

    let receipt = engine
        .create_receipt(
            &["s1".to_string(), "s2".to_string()],
            Some("Week 35 settlement".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(receipt.total_amount, Money::from_minor(250_000));
    assert_eq!(receipt.total_profit, Money::from_minor(75_000));
    assert_eq!(receipt.notes.as_deref(), Some("Week 35 settlement"));

    // s1 and s2 are claimed now; only s3 remains available.
    let available = engine.available_sales();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, "s3");
}

#[tokio::test]
async fn double_receipting_is_blocked_and_nothing_is_created() {
    let server = server();

    // Session A receipts s1.
    let notifier_a = Arc::new(RecordingNotifier::new());
    let mut engine_a =
        ReceiptAggregationEngine::new(server.clone(), server.clone(), notifier_a);
    engine_a.load().await.unwrap();
    engine_a
        .create_receipt(&["s1".to_string()], None)
        .await
        .unwrap();
    assert_eq!(server.receipt_count(), 1);

    // Session B loaded before that and still sees s1 as available.
    let notifier_b = Arc::new(RecordingNotifier::new());
    let mut engine_b =
        ReceiptAggregationEngine::new(server.clone(), server.clone(), notifier_b);
    // (load happened conceptually earlier; the fake serves current sales
    // but engine B's claimed set is rebuilt on load, so force the race
    // by loading first and receipting from A afterwards)
    engine_b.load().await.unwrap();
    engine_a
        .create_receipt(&["s2".to_string()], None)
        .await
        .unwrap();
    assert_eq!(server.receipt_count(), 2);

    // B tries to receipt s2: the pre-submit re-check catches it.
    let err = engine_b
        .create_receipt(&["s2".to_string(), "s3".to_string()], None)
        .await
        .unwrap_err();
    match err {
        FlowError::Core(CoreError::SaleAlreadyClaimed { sale_numbers }) => {
            assert_eq!(sale_numbers, vec!["SAL-002".to_string()]);
        }
        other => panic!("expected SaleAlreadyClaimed, got {other:?}"),
    }
    // No partial receipt was created for s3.
    assert_eq!(server.receipt_count(), 2);
}

// ============================================================================
// Wholesaler Directory
// ============================================================================

#[tokio::test]
async fn wholesaler_directory_loads_and_snapshots() {
    let server = server();
    let notifier = Arc::new(RecordingNotifier::new());
    let cache = Arc::new(MemoryCache::new());
    let mut directory =
        WholesalerDirectory::new(server, cache.clone(), notifier);

    let list = directory.load().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].business_name, "Kisumu General Traders");
    assert!(!directory.is_stale());

    // The snapshot landed in the cache for the next offline session.
    assert!(cache
        .get(tradelink_flow::keys::WHOLESALER_SNAPSHOT)
        .is_some());
}
