//! Order repository
//!
//! The service only talks to storage through [`OrderRepository`], so the
//! backing store can be swapped without touching the order board.

mod memory;

pub use memory::InMemoryOrderRepository;

use async_trait::async_trait;

use crate::error::Result;
use crate::order::{NewOrder, Order, OrderId};

/// Storage for active orders
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store a new order and return it with its assigned identifier
    async fn insert(&self, order: NewOrder) -> Result<Order>;

    /// Remove an order. Returns `false` when nothing matched.
    async fn delete(&self, id: OrderId) -> Result<bool>;

    /// Every active order in insertion order, as one consistent snapshot
    async fn scan(&self) -> Result<Vec<Order>>;
}
