//! Aggregated view of an order book

use serde::{Deserialize, Serialize};
use std::fmt;
use types::ids::Symbol;
use types::numeric::{Price, Quantity};

use super::price_level::PriceLevel;

/// One aggregated price level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: Price,
    pub quantity: Quantity,
    pub order_count: usize,
}

impl From<&PriceLevel> for LevelSnapshot {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: level.price(),
            quantity: level.total_quantity(),
            order_count: level.order_count(),
        }
    }
}

/// Order book snapshot for market data
///
/// Both sides are listed best level first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub symbol: Symbol,
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl OrderBookSnapshot {
    pub fn best_bid(&self) -> Option<&LevelSnapshot> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&LevelSnapshot> {
        self.asks.first()
    }
}

/// Book printout: asks then bids, each listed from the highest price down
/// so the spread sits in the middle.
///
/// ```text
/// SELL:
/// 1200 20
/// 1100 10
/// BUY:
/// 1000 5
/// ```
impl fmt::Display for OrderBookSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SELL:")?;
        for level in self.asks.iter().rev() {
            writeln!(f, "{} {}", level.price, level.quantity)?;
        }
        writeln!(f, "BUY:")?;
        for level in &self.bids {
            writeln!(f, "{} {}", level.price, level.quantity)?;
        }
        Ok(())
    }
}
