//! Order board depth metrics

use serde::{Deserialize, Serialize};

use super::OrderBoard;

/// Figures derived from an order board
///
/// Anything that needs both sides is `None` while either side is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBoardMetrics {
    /// Lowest sell price
    pub best_ask: Option<f64>,

    /// Highest buy price
    pub best_bid: Option<f64>,

    /// best_ask - best_bid
    pub spread: Option<f64>,

    /// Average of best bid and ask
    pub mid_price: Option<f64>,

    /// Simple imbalance: (buy_depth - sell_depth) / (buy_depth + sell_depth)
    pub imbalance: Option<f64>,

    /// Total quantity offered for sale, in kg
    pub sell_depth_kg: f64,

    /// Total quantity bid for, in kg
    pub buy_depth_kg: f64,

    pub sell_levels: usize,
    pub buy_levels: usize,
}

impl OrderBoardMetrics {
    /// Compute metrics for a board
    pub fn from_board(board: &OrderBoard) -> Self {
        let best_ask = board.best_ask();
        let best_bid = board.best_bid();
        let sell_depth_kg: f64 = board.sell.iter().map(|l| l.total_quantity_kg).sum();
        let buy_depth_kg: f64 = board.buy.iter().map(|l| l.total_quantity_kg).sum();

        let (spread, mid_price) = match (best_ask, best_bid) {
            (Some(ask), Some(bid)) => (Some(ask - bid), Some((ask + bid) / 2.0)),
            _ => (None, None),
        };

        let total = sell_depth_kg + buy_depth_kg;
        let imbalance = if !board.sell.is_empty() && !board.buy.is_empty() && total > 0.0 {
            Some((buy_depth_kg - sell_depth_kg) / total)
        } else {
            None
        };

        Self {
            best_ask,
            best_bid,
            spread,
            mid_price,
            imbalance,
            sell_depth_kg,
            buy_depth_kg,
            sell_levels: board.sell.len(),
            buy_levels: board.buy.len(),
        }
    }

    /// Both sides carry at least one level
    pub fn is_two_sided(&self) -> bool {
        self.sell_levels > 0 && self.buy_levels > 0
    }

    /// A buyer bids at or above the cheapest seller. Orders are never
    /// matched, so this can persist.
    pub fn is_crossed(&self) -> bool {
        matches!(self.spread, Some(spread) if spread <= 0.0)
    }
}
