//! Price level implementation with FIFO ordering
//!
//! A price level holds every resting order at one price. Orders are stored
//! by value, keyed by their arrival sequence, so iteration order is arrival
//! order and the head is always the oldest order (time priority).

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::OrderRecord;

/// All resting orders at a single price
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    /// Orders keyed by arrival sequence (FIFO order)
    orders: BTreeMap<u64, OrderRecord>,
    /// Total open quantity at this level
    total_quantity: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: BTreeMap::new(),
            total_quantity: Quantity::zero(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append an order at the back of the queue
    ///
    /// # Panics
    /// Panics if the order is priced differently, or if its sequence does
    /// not come after every order already queued
    pub fn push_back(&mut self, order: OrderRecord) {
        assert_eq!(order.price, self.price, "Order price does not match level");
        if let Some((&last, _)) = self.orders.last_key_value() {
            assert!(order.sequence > last, "Order sequence is not monotonic");
        }
        self.total_quantity += order.remaining;
        self.orders.insert(order.sequence, order);
    }

    /// Remove an order by its arrival sequence
    ///
    /// The relative order of the remaining entries is unchanged.
    pub fn remove(&mut self, sequence: u64) -> Option<OrderRecord> {
        let order = self.orders.remove(&sequence)?;
        self.total_quantity -= order.remaining;
        Some(order)
    }

    /// Peek at the oldest order
    pub fn front(&self) -> Option<&OrderRecord> {
        self.orders.first_key_value().map(|(_, order)| order)
    }

    /// Fill the oldest order by up to `quantity`
    ///
    /// Returns the filled quantity, and the order itself once it is
    /// exhausted and has been removed from the level.
    pub fn fill_front(&mut self, quantity: Quantity) -> Option<(Quantity, Option<OrderRecord>)> {
        let mut entry = self.orders.first_entry()?;
        let order = entry.get_mut();
        let matched = quantity.min(order.remaining);

        order.fill(matched);
        self.total_quantity -= matched;

        let removed = if order.is_filled() {
            Some(entry.remove())
        } else {
            None
        };
        Some((matched, removed))
    }

    pub fn get(&self, sequence: u64) -> Option<&OrderRecord> {
        self.orders.get(&sequence)
    }

    /// Orders in time priority
    pub fn iter(&self) -> impl Iterator<Item = &OrderRecord> {
        self.orders.values()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}
