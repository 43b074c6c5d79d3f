//! Order id → location lookup
//!
//! The index never holds a reference into the book. It stores the
//! (side, price, arrival sequence) key, which is enough to reach the
//! record through `BookSide::get`/`remove` in O(log n).

use std::collections::HashMap;
use types::ids::OrderId;
use types::numeric::Price;
use types::order::{OrderRecord, Side};

/// Where a resting order lives in its book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLocation {
    pub side: Side,
    pub price: Price,
    pub sequence: u64,
}

impl OrderLocation {
    pub fn of(order: &OrderRecord) -> Self {
        Self {
            side: order.side,
            price: order.price,
            sequence: order.sequence,
        }
    }
}

/// One entry per resting order
#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    locations: HashMap<OrderId, OrderLocation>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly resting order
    ///
    /// Returns false and leaves the existing entry untouched if the id is
    /// already indexed.
    pub fn insert(&mut self, order: &OrderRecord) -> bool {
        if self.locations.contains_key(&order.id) {
            return false;
        }
        self.locations
            .insert(order.id.clone(), OrderLocation::of(order));
        true
    }

    pub fn remove(&mut self, id: &OrderId) -> Option<OrderLocation> {
        self.locations.remove(id)
    }

    pub fn get(&self, id: &OrderId) -> Option<OrderLocation> {
        self.locations.get(id).copied()
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.locations.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &OrderId> {
        self.locations.keys()
    }
}
