//! One side (bids or asks) of an order book
//!
//! Price levels live in a BTreeMap keyed by price, which gives
//! deterministic iteration and O(log n) access to the best level from
//! either end: the highest key for bids, the lowest for asks.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::{OrderRecord, Side};

use super::price_level::PriceLevel;

/// Resting orders for one side of one instrument
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    /// Price levels sorted ascending; "best" depends on `side`
    levels: BTreeMap<Price, PriceLevel>,
}

impl BookSide {
    /// Create a new empty book side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Append an order at the tail of its price level, creating the level
    /// if this is the first order at that price
    pub fn insert(&mut self, order: OrderRecord) {
        debug_assert_eq!(order.side, self.side, "Order inserted on the wrong side");
        self.levels
            .entry(order.price)
            .or_insert_with(|| PriceLevel::new(order.price))
            .push_back(order);
    }

    /// Remove an order located by price and arrival sequence
    ///
    /// Drops the price level once its last order is gone.
    pub fn remove(&mut self, price: Price, sequence: u64) -> Option<OrderRecord> {
        let level = self.levels.get_mut(&price)?;
        let order = level.remove(sequence)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(order)
    }

    /// Get an order located by price and arrival sequence
    pub fn get(&self, price: Price, sequence: u64) -> Option<&OrderRecord> {
        self.levels.get(&price)?.get(sequence)
    }

    /// Best price: highest bid or lowest ask
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::BUY => self.levels.keys().next_back().copied(),
            Side::SELL => self.levels.keys().next().copied(),
        }
    }

    /// Best price and the total quantity resting there
    pub fn best(&self) -> Option<(Price, Quantity)> {
        self.best_level()
            .map(|level| (level.price(), level.total_quantity()))
    }

    pub fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::BUY => self.levels.values().next_back(),
            Side::SELL => self.levels.values().next(),
        }
    }

    pub(crate) fn best_level_mut(&mut self) -> Option<&mut PriceLevel> {
        match self.side {
            Side::BUY => self.levels.values_mut().next_back(),
            Side::SELL => self.levels.values_mut().next(),
        }
    }

    /// Drop a price level if it no longer holds any order
    pub(crate) fn prune_level(&mut self, price: Price) {
        if self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&price);
        }
    }

    /// Levels from best to worst
    pub fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::BUY => Box::new(self.levels.values().rev()),
            Side::SELL => Box::new(self.levels.values()),
        }
    }

    /// Get depth snapshot (top N price levels, best first)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .take(depth)
            .map(|level| (level.price(), level.total_quantity()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }
}
