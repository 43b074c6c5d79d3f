//! Order types
//!
//! `OrderRequest` is the raw, unchecked input handed to the engine by the
//! order-event source. `OrderRecord` is the checked order that rests in a
//! book once admitted.

use crate::ids::{OrderId, Symbol};
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => f.write_str("BUY"),
            Side::SELL => f.write_str("SELL"),
        }
    }
}

/// Time-in-force policy for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good-For-Day: rests until filled or explicitly canceled
    #[default]
    GFD,
    /// Immediate-Or-Cancel: match immediately, discard the remainder
    IOC,
}

impl TimeInForce {
    /// Whether an unfilled remainder may rest in the book
    pub fn can_rest(&self) -> bool {
        matches!(self, TimeInForce::GFD)
    }
}

/// An admitted order
///
/// Everything except `remaining` is fixed once admitted. A modify does
/// not mutate a record: it removes it and admits a replacement with a
/// fresh sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub symbol: Symbol,
    pub side: Side,
    pub price: Price,
    /// Quantity at admission
    pub quantity: Quantity,
    /// Quantity still open; reduced only by matching
    pub remaining: Quantity,
    pub time_in_force: TimeInForce,
    /// Arrival sequence; lower means earlier (time priority)
    pub sequence: u64,
}

impl OrderRecord {
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: Side,
        price: Price,
        quantity: Quantity,
        time_in_force: TimeInForce,
        sequence: u64,
    ) -> Self {
        Self {
            id,
            symbol,
            side,
            price,
            quantity,
            remaining: quantity,
            time_in_force,
            sequence,
        }
    }

    /// Reduce the open quantity by a fill
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining quantity
    pub fn fill(&mut self, fill_quantity: Quantity) {
        assert!(
            fill_quantity <= self.remaining,
            "Fill would exceed remaining quantity"
        );
        self.remaining -= fill_quantity;
    }

    pub fn is_filled(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.quantity - self.remaining
    }
}

/// NEW request as received from the event source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub id: String,
    /// Empty routes to the engine's default symbol
    #[serde(default)]
    pub symbol: String,
    pub side: Side,
    pub price: Decimal,
    #[serde(rename = "qty")]
    pub quantity: i64,
    #[serde(rename = "type", default)]
    pub time_in_force: TimeInForce,
}

/// CANCEL request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub id: String,
}

/// MODIFY request: replaces price, quantity and side of a resting order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyOrder {
    pub id: String,
    pub side: Side,
    pub price: Decimal,
    #[serde(rename = "qty")]
    pub quantity: i64,
}

/// One order event
///
/// Tagged by `op` since NEW already uses `type` for its time-in-force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "UPPERCASE")]
pub enum OrderRequest {
    New(NewOrder),
    Cancel(CancelOrder),
    Modify(ModifyOrder),
}

impl OrderRequest {
    /// Build a NEW request
    pub fn new_order(
        id: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        price: Decimal,
        quantity: i64,
        time_in_force: TimeInForce,
    ) -> Self {
        OrderRequest::New(NewOrder {
            id: id.into(),
            symbol: symbol.into(),
            side,
            price,
            quantity,
            time_in_force,
        })
    }

    /// Build a CANCEL request
    pub fn cancel(id: impl Into<String>) -> Self {
        OrderRequest::Cancel(CancelOrder { id: id.into() })
    }

    /// Build a MODIFY request
    pub fn modify(id: impl Into<String>, side: Side, price: Decimal, quantity: i64) -> Self {
        OrderRequest::Modify(ModifyOrder {
            id: id.into(),
            side,
            price,
            quantity,
        })
    }

    /// The raw identifier carried by the request
    pub fn id(&self) -> &str {
        match self {
            OrderRequest::New(o) => &o.id,
            OrderRequest::Cancel(o) => &o.id,
            OrderRequest::Modify(o) => &o.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OrderRequest::New(_) => "NEW",
            OrderRequest::Cancel(_) => "CANCEL",
            OrderRequest::Modify(_) => "MODIFY",
        }
    }
}
