//! Order board module
//!
//! Aggregates the active order set into per-side price levels.

mod board;
mod metrics;

pub use board::{summarize, BoardBuilder};
pub use metrics::OrderBoardMetrics;

use serde::{Deserialize, Serialize};

use crate::order::Side;

/// Total quantity resting at one exact price on one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price_per_kg: f64,
    #[serde(rename = "order_quantity_kg")]
    pub total_quantity_kg: f64,
}

/// Market depth view published by the summary endpoint
///
/// Both sides are always serialized, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBoard {
    /// Sell levels, cheapest first
    #[serde(rename = "SELL")]
    pub sell: Vec<PriceLevel>,
    /// Buy levels, highest first
    #[serde(rename = "BUY")]
    pub buy: Vec<PriceLevel>,
}

impl OrderBoard {
    /// Levels for one side, in board order
    pub fn levels(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Sell => &self.sell,
            Side::Buy => &self.buy,
        }
    }

    /// Lowest price a seller will accept
    pub fn best_ask(&self) -> Option<f64> {
        self.sell.first().map(|level| level.price_per_kg)
    }

    /// Highest price a buyer will pay
    pub fn best_bid(&self) -> Option<f64> {
        self.buy.first().map(|level| level.price_per_kg)
    }

    pub fn is_empty(&self) -> bool {
        self.sell.is_empty() && self.buy.is_empty()
    }

    /// Derived depth figures for this board
    pub fn metrics(&self) -> OrderBoardMetrics {
        OrderBoardMetrics::from_board(self)
    }
}
