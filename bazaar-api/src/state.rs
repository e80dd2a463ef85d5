use std::sync::Arc;
use bazaar_catalog::{PricingConfig, PricingEngine};
use bazaar_core::MarketplaceBackend;
use bazaar_order::{Checkout, EscrowPolicy, OrderBook};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn MarketplaceBackend>,
    pub checkout: Arc<Checkout>,
    pub orders: Arc<RwLock<OrderBook>>,
}

impl AppState {
    pub fn new(backend: Arc<dyn MarketplaceBackend>, pricing: PricingConfig, escrow: EscrowPolicy) -> Self {
        Self {
            backend,
            checkout: Arc::new(Checkout::new(PricingEngine::new(pricing), escrow)),
            orders: Arc::new(RwLock::new(OrderBook::new())),
        }
    }

    /// Replace the order book with an empty one holding at most `max_orders`.
    pub fn with_order_limit(mut self, max_orders: usize) -> Self {
        self.orders = Arc::new(RwLock::new(OrderBook::with_capacity_limit(max_orders)));
        self
    }

    pub fn pricing(&self) -> &PricingEngine {
        self.checkout.pricing()
    }
}
