use crate::models::OrderConfirmation;
use std::collections::HashMap;
use uuid::Uuid;

/// Confirmations kept before new placements are refused.
pub const DEFAULT_ORDER_CAPACITY: usize = 100_000;

/// Keeps placed orders exactly as they were confirmed.
///
/// Nothing is evicted; once full, new orders are refused.
pub struct OrderBook {
    orders: HashMap<Uuid, OrderConfirmation>,
    capacity: usize,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_capacity_limit(DEFAULT_ORDER_CAPACITY)
    }

    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            orders: HashMap::new(),
            capacity,
        }
    }

    /// Record a confirmation. An id already present is left untouched.
    pub fn record(&mut self, confirmation: OrderConfirmation) -> Result<(), OrderError> {
        if self.orders.contains_key(&confirmation.order_id) {
            return Err(OrderError::AlreadyRecorded(confirmation.order_id.to_string()));
        }
        if self.orders.len() >= self.capacity {
            return Err(OrderError::BookFull(self.capacity));
        }
        self.orders.insert(confirmation.order_id, confirmation);
        Ok(())
    }

    pub fn get(&self, order_id: &Uuid) -> Result<&OrderConfirmation, OrderError> {
        self.orders
            .get(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order already recorded: {0}")]
    AlreadyRecorded(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Order book is full ({0} orders)")]
    BookFull(usize),

    #[error("Escrow window out of range: {0} days")]
    EscrowOutOfRange(u64),
}
