//! Order service
//!
//! Submission, cancellation, listing and summary over an injected repository.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{OrderBoardError, Result};
use crate::order::{Order, OrderId, OrderRequest, OrderView};
use crate::orderbook::{summarize, OrderBoard, OrderBoardMetrics};
use crate::repository::OrderRepository;
use crate::telemetry::ServiceMetrics;

/// Use cases behind the HTTP routes
#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    metrics: Arc<ServiceMetrics>,
}

impl OrderService {
    /// Create a service over a repository handle
    pub fn new(repository: Arc<dyn OrderRepository>, metrics: Arc<ServiceMetrics>) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    /// Validate and store a new order
    pub async fn submit(&self, request: OrderRequest) -> Result<Order> {
        let new_order = match request.validate() {
            Ok(order) => order,
            Err(e) => {
                self.metrics.orders_rejected.inc();
                warn!(error = %e, "Order rejected");
                return Err(e);
            }
        };

        let order = self.repository.insert(new_order).await?;
        self.metrics.record_submitted(order.side);

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            side = %order.side,
            price_per_kg = order.price_per_kg,
            quantity_kg = order.quantity_kg,
            "Order submitted"
        );
        Ok(order)
    }

    /// Cancel an active order
    ///
    /// A malformed identifier, an unknown one and an already-cancelled one
    /// all fail the same way with [`OrderBoardError::NotFound`].
    pub async fn cancel(&self, raw_id: &str) -> Result<()> {
        let removed = match raw_id.parse::<OrderId>() {
            Ok(id) => self.repository.delete(id).await?,
            Err(_) => false,
        };

        if !removed {
            self.metrics.cancel_not_found.inc();
            debug!(order_id = %raw_id, "Cancel matched no active order");
            return Err(OrderBoardError::NotFound(raw_id.to_string()));
        }

        self.metrics.record_cancelled();
        info!(order_id = %raw_id, "Order cancelled");
        Ok(())
    }

    /// Every active order, identifiers stripped
    pub async fn list(&self) -> Result<Vec<OrderView>> {
        let orders = self.repository.scan().await?;
        Ok(orders.iter().map(OrderView::from).collect())
    }

    /// Aggregate the current snapshot into an order board
    pub async fn summary(&self) -> Result<OrderBoard> {
        let orders = self.repository.scan().await?;
        let board = summarize(&orders);
        self.metrics.summary_requests.inc();

        debug!(
            orders = orders.len(),
            sell_levels = board.sell.len(),
            buy_levels = board.buy.len(),
            "Order board summarized"
        );
        Ok(board)
    }

    /// Depth metrics for the current board
    pub async fn board_metrics(&self) -> Result<OrderBoardMetrics> {
        let metrics = self.summary().await?.metrics();
        if metrics.is_crossed() {
            warn!(
                best_bid = ?metrics.best_bid,
                best_ask = ?metrics.best_ask,
                "Order board is crossed"
            );
        }
        Ok(metrics)
    }
}
