//! Walks the supplier workflows against a live backend.
//!
//! ```text
//! TRADELINK_API_URL=http://localhost:5000 \
//! TRADELINK_API_TOKEN=... \
//! cargo run -p tradelink-flow --bin walkthrough
//! ```
//!
//! Read-only: loads orders, sales, receipts and wholesalers, then prints
//! what actions each order currently offers. No mutations are issued.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tradelink_api::{ApiConfig, LoggingSession, RestClient};
use tradelink_flow::{
    MemoryCache, OrderStatusWorkflow, ReceiptAggregationEngine, TracingNotifier,
    WholesalerDirectory,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env_or(None, None);
    info!(base_url = %config.base_url, "connecting");

    let client = Arc::new(RestClient::new(&config, Arc::new(LoggingSession))?);
    let notifier = Arc::new(TracingNotifier);
    let cache = Arc::new(MemoryCache::new());

    // Orders and their available actions.
    let mut orders = OrderStatusWorkflow::new(client.clone(), notifier.clone(), cache.clone());
    orders.load().await?;
    info!(count = orders.orders().len(), "orders loaded");
    for order in orders.orders() {
        let actions = orders.available_actions(&order.id)?;
        info!(
            order = %order.order_number,
            status = %order.status,
            wholesaler = %order.wholesaler.business_name.as_deref().unwrap_or("-"),
            ?actions,
            "order"
        );
    }

    // Sales available for receipting.
    let mut receipts =
        ReceiptAggregationEngine::new(client.clone(), client.clone(), notifier.clone());
    receipts.load().await?;
    let available = receipts.available_sales();
    info!(
        available = available.len(),
        degraded = receipts.is_degraded(),
        "sales ready for receipting"
    );
    for sale in available {
        info!(
            sale = %sale.sale_number,
            amount = %sale.total_amount,
            items = sale.total_items(),
            "available sale"
        );
    }

    // Wholesaler directory with retry and cache fallback.
    let mut wholesalers = WholesalerDirectory::new(client, cache, notifier);
    let list = wholesalers.load().await?;
    info!(count = list.len(), stale = wholesalers.is_stale(), "wholesalers loaded");

    Ok(())
}
