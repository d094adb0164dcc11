//! Order board aggregation
//!
//! Uses one BTreeMap per side keyed by exact price, so grouping and
//! ordering happen in the same pass.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::{OrderBoard, PriceLevel};
use crate::order::{Order, Side};

/// Accumulates orders into per-side price levels
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    /// Buy quantities sorted by price descending (highest first)
    bids: BTreeMap<Reverse<OrderedFloat<f64>>, f64>,
    /// Sell quantities sorted by price ascending (lowest first)
    asks: BTreeMap<OrderedFloat<f64>, f64>,
}

impl BoardBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one order's quantity to the level at its price
    pub fn add(&mut self, order: &Order) {
        let price = OrderedFloat(order.price_per_kg);
        let total = match order.side {
            Side::Buy => self.bids.entry(Reverse(price)).or_insert(0.0),
            Side::Sell => self.asks.entry(price).or_insert(0.0),
        };
        *total += order.quantity_kg;
    }

    /// Number of distinct price levels on a side
    pub fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bids.len(),
            Side::Sell => self.asks.len(),
        }
    }

    /// Produce the board: sells ascending, buys descending
    pub fn build(&self) -> OrderBoard {
        OrderBoard {
            sell: self
                .asks
                .iter()
                .map(|(p, q)| PriceLevel {
                    price_per_kg: p.into_inner(),
                    total_quantity_kg: *q,
                })
                .collect(),
            buy: self
                .bids
                .iter()
                .map(|(Reverse(p), q)| PriceLevel {
                    price_per_kg: p.into_inner(),
                    total_quantity_kg: *q,
                })
                .collect(),
        }
    }
}

impl<'a> Extend<&'a Order> for BoardBuilder {
    fn extend<I: IntoIterator<Item = &'a Order>>(&mut self, orders: I) {
        for order in orders {
            self.add(order);
        }
    }
}

/// Summarize a snapshot of active orders into an order board
pub fn summarize<'a, I>(orders: I) -> OrderBoard
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut builder = BoardBuilder::new();
    builder.extend(orders);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderId;

    fn order(user: &str, quantity_kg: f64, price_per_kg: f64, side: Side) -> Order {
        Order {
            id: OrderId::new(),
            user_id: user.to_string(),
            quantity_kg,
            price_per_kg,
            side,
        }
    }

    fn level(price_per_kg: f64, total_quantity_kg: f64) -> PriceLevel {
        PriceLevel {
            price_per_kg,
            total_quantity_kg,
        }
    }

    fn fixture() -> Vec<Order> {
        vec![
            order("user1", 3.5, 306.0, Side::Sell),
            order("user2", 1.2, 310.0, Side::Sell),
            order("user3", 1.5, 307.0, Side::Sell),
            order("user4", 2.0, 306.0, Side::Sell),
            order("user1", 3.5, 50.0, Side::Buy),
            order("user2", 3.7, 134.0, Side::Buy),
            order("user3", 0.3, 50.0, Side::Buy),
            order("user4", 1.0, 134.0, Side::Buy),
        ]
    }

    #[test]
    fn test_fixture_board() {
        let board = summarize(&fixture());

        assert_eq!(
            board.sell,
            vec![level(306.0, 5.5), level(307.0, 1.5), level(310.0, 1.2)]
        );
        assert_eq!(board.buy, vec![level(134.0, 4.7), level(50.0, 3.8)]);
    }

    #[test]
    fn test_best_prices() {
        let board = summarize(&fixture());
        assert_eq!(board.best_ask(), Some(306.0));
        assert_eq!(board.best_bid(), Some(134.0));
    }

    #[test]
    fn test_empty_sides_keep_their_keys() {
        let board = summarize(&[]);
        assert!(board.is_empty());

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json, serde_json::json!({ "SELL": [], "BUY": [] }));

        let only_buys = vec![order("user1", 1.0, 10.0, Side::Buy)];
        let board = summarize(&only_buys);
        assert!(board.sell.is_empty());
        assert_eq!(board.buy, vec![level(10.0, 1.0)]);
    }

    #[test]
    fn test_sides_never_merge() {
        let orders = vec![
            order("user1", 2.0, 100.0, Side::Buy),
            order("user2", 3.0, 100.0, Side::Sell),
        ];

        let board = summarize(&orders);
        assert_eq!(board.sell, vec![level(100.0, 3.0)]);
        assert_eq!(board.buy, vec![level(100.0, 2.0)]);
    }

    #[test]
    fn test_fractional_prices_group_exactly() {
        let orders = vec![
            order("user1", 1.0, 10.25, Side::Sell),
            order("user2", 2.0, 10.25, Side::Sell),
            order("user3", 4.0, 10.250000001, Side::Sell),
            order("user4", 8.0, 0.1 + 0.2, Side::Buy),
            order("user5", 16.0, 0.3, Side::Buy),
        ];

        let board = summarize(&orders);
        assert_eq!(
            board.sell,
            vec![level(10.25, 3.0), level(10.250000001, 4.0)]
        );
        // 0.1 + 0.2 and 0.3 are different f64 values
        assert_eq!(board.buy, vec![level(0.1 + 0.2, 8.0), level(0.3, 16.0)]);
    }

    #[test]
    fn test_negative_prices_are_ordered() {
        let orders = vec![
            order("user1", 1.0, -5.0, Side::Sell),
            order("user2", 1.0, 5.0, Side::Sell),
            order("user3", 1.0, -5.0, Side::Buy),
            order("user4", 1.0, 0.0, Side::Buy),
        ];

        let board = summarize(&orders);
        assert_eq!(board.sell, vec![level(-5.0, 1.0), level(5.0, 1.0)]);
        assert_eq!(board.buy, vec![level(0.0, 1.0), level(-5.0, 1.0)]);
    }

    #[test]
    fn test_levels_are_complete_ordered_and_summed() {
        let orders: Vec<Order> = (0..200)
            .map(|i| {
                let side = if i % 3 == 0 { Side::Buy } else { Side::Sell };
                let price = ((i * 37) % 23) as f64 + 0.5;
                let quantity = (i % 7 + 1) as f64 * 0.25;
                order("user", quantity, price, side)
            })
            .collect();

        let board = summarize(&orders);

        for side in [Side::Sell, Side::Buy] {
            let levels = board.levels(side);

            let mut prices: Vec<f64> = orders
                .iter()
                .filter(|o| o.side == side)
                .map(|o| o.price_per_kg)
                .collect();
            prices.sort_by(|a, b| a.partial_cmp(b).unwrap());
            prices.dedup();
            assert_eq!(levels.len(), prices.len());

            for pair in levels.windows(2) {
                match side {
                    Side::Sell => assert!(pair[0].price_per_kg < pair[1].price_per_kg),
                    Side::Buy => assert!(pair[0].price_per_kg > pair[1].price_per_kg),
                }
            }

            for lvl in levels {
                let expected: f64 = orders
                    .iter()
                    .filter(|o| o.side == side && o.price_per_kg == lvl.price_per_kg)
                    .map(|o| o.quantity_kg)
                    .sum();
                assert_eq!(lvl.total_quantity_kg, expected);
            }
        }
    }

    #[test]
    fn test_summarize_is_repeatable() {
        let orders = fixture();
        assert_eq!(summarize(&orders), summarize(&orders));
    }

    #[test]
    fn test_builder_counts_levels() {
        let mut builder = BoardBuilder::new();
        builder.extend(&fixture());
        assert_eq!(builder.level_count(Side::Sell), 3);
        assert_eq!(builder.level_count(Side::Buy), 2);
    }
}
