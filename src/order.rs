//! Order records and submission payloads
//!
//! Field names on the wire follow the board's JSON contract: quantities travel
//! as `order_quantity_kg` and the side as `order_type`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{OrderBoardError, Result};

/// Side of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Canonical uppercase token
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = OrderBoardError;

    /// Case-insensitive: "buy", "Buy" and "BUY" all parse to `Side::Buy`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(OrderBoardError::Validation(format!(
                "unrecognized order_type {:?}, expected BUY or SELL",
                s
            ))),
        }
    }
}

/// Identifier assigned to an order by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Raw submission payload, as received from a client
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub user_id: String,

    #[serde(rename = "order_quantity_kg")]
    pub quantity_kg: f64,

    pub price_per_kg: f64,

    /// Side token in any casing
    #[serde(rename = "order_type")]
    pub side: String,
}

impl OrderRequest {
    /// Validate the payload and normalize its side
    pub fn validate(self) -> Result<NewOrder> {
        let side: Side = self.side.parse()?;

        if !self.quantity_kg.is_finite() || self.quantity_kg <= 0.0 {
            return Err(OrderBoardError::Validation(format!(
                "order_quantity_kg must be a positive number, got {}",
                self.quantity_kg
            )));
        }

        if !self.price_per_kg.is_finite() {
            return Err(OrderBoardError::Validation(format!(
                "price_per_kg must be a finite number, got {}",
                self.price_per_kg
            )));
        }

        Ok(NewOrder {
            user_id: self.user_id,
            quantity_kg: self.quantity_kg,
            price_per_kg: self.price_per_kg,
            side,
        })
    }
}

/// A validated order that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
    pub side: Side,
}

impl NewOrder {
    /// Attach a repository-assigned identifier
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            user_id: self.user_id,
            quantity_kg: self.quantity_kg,
            price_per_kg: self.price_per_kg,
            side: self.side,
        }
    }
}

/// An active order held by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,

    pub user_id: String,

    #[serde(rename = "order_quantity_kg")]
    pub quantity_kg: f64,

    pub price_per_kg: f64,

    #[serde(rename = "order_type")]
    pub side: Side,
}

/// An order with its identifier stripped, as returned by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub user_id: String,

    #[serde(rename = "order_quantity_kg")]
    pub quantity_kg: f64,

    pub price_per_kg: f64,

    #[serde(rename = "order_type")]
    pub side: Side,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            user_id: order.user_id.clone(),
            quantity_kg: order.quantity_kg,
            price_per_kg: order.price_per_kg,
            side: order.side,
        }
    }
}
