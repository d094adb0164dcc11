//! Prometheus metrics for the order service

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::error::{OrderBoardError, Result};
use crate::order::Side;

/// Counters and gauges exported at `/metrics`
#[derive(Clone)]
pub struct ServiceMetrics {
    registry: Registry,
    pub orders_submitted: IntCounterVec,
    pub orders_rejected: IntCounter,
    pub orders_cancelled: IntCounter,
    pub cancel_not_found: IntCounter,
    pub summary_requests: IntCounter,
    pub active_orders: IntGauge,
}

impl ServiceMetrics {
    /// Create and register all metrics in a fresh registry
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let orders_submitted = IntCounterVec::new(
            Opts::new("orders_submitted_total", "Orders accepted, by side"),
            &["side"],
        )?;
        let orders_rejected =
            IntCounter::new("orders_rejected_total", "Order submissions that failed validation")?;
        let orders_cancelled = IntCounter::new("orders_cancelled_total", "Orders cancelled")?;
        let cancel_not_found = IntCounter::new(
            "cancel_not_found_total",
            "Cancellations that matched no active order",
        )?;
        let summary_requests =
            IntCounter::new("summary_requests_total", "Order board summaries computed")?;
        let active_orders = IntGauge::new("active_orders", "Orders currently on the board")?;

        registry.register(Box::new(orders_submitted.clone()))?;
        registry.register(Box::new(orders_rejected.clone()))?;
        registry.register(Box::new(orders_cancelled.clone()))?;
        registry.register(Box::new(cancel_not_found.clone()))?;
        registry.register(Box::new(summary_requests.clone()))?;
        registry.register(Box::new(active_orders.clone()))?;

        Ok(Self {
            registry,
            orders_submitted,
            orders_rejected,
            orders_cancelled,
            cancel_not_found,
            summary_requests,
            active_orders,
        })
    }

    pub fn record_submitted(&self, side: Side) {
        self.orders_submitted.with_label_values(&[side.as_str()]).inc();
        self.active_orders.inc();
    }

    pub fn record_cancelled(&self) {
        self.orders_cancelled.inc();
        self.active_orders.dec();
    }

    /// Render the registry in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| OrderBoardError::Metrics(e.to_string()))
    }
}
