//! In-memory order repository

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::OrderRepository;
use crate::error::Result;
use crate::order::{NewOrder, Order, OrderId};

/// Keeps active orders in a vector guarded by an async RwLock
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active orders
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: NewOrder) -> Result<Order> {
        let order = order.with_id(OrderId::new());
        self.orders.write().await.push(order.clone());
        debug!(order_id = %order.id, "Order stored");
        Ok(order)
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let mut orders = self.orders.write().await;
        match orders.iter().position(|order| order.id == id) {
            Some(index) => {
                orders.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn scan(&self) -> Result<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }
}
