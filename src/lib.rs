//! Silver Order Board - order recording and live market depth
//!
//! This crate records buy/sell orders for a commodity and aggregates the
//! active set into an order board: total quantity per price level, sells
//! cheapest first and buys highest first.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod order;
pub mod orderbook;
pub mod repository;
pub mod service;
pub mod telemetry;

pub use config::Config;
pub use error::{OrderBoardError, Result};
pub use order::{NewOrder, Order, OrderId, OrderRequest, OrderView, Side};
pub use orderbook::{summarize, OrderBoard, OrderBoardMetrics, PriceLevel};
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
pub use telemetry::ServiceMetrics;

/// Application state shared across request handlers
pub struct AppState {
    pub service: OrderService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the service to a repository handle with a fresh metrics registry
    pub fn new(config: Config, repository: Arc<dyn OrderRepository>) -> Result<Self> {
        let metrics = Arc::new(ServiceMetrics::new()?);
        Ok(Self {
            service: OrderService::new(repository, metrics),
            config: Arc::new(config),
        })
    }
}
