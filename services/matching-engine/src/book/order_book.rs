//! Order book for a single instrument
//!
//! Holds the bid side, the ask side and the order index, and implements
//! price-time priority matching:
//!
//! 1. An incoming order trades against the best opposite level while its
//!    limit crosses, always taking the oldest order at that level first.
//! 2. Each trade executes at the resting order's price.
//! 3. A GFD remainder rests at the tail of its price level; an IOC
//!    remainder is discarded.
//!
//! The index is updated in the same step as every side mutation, so after
//! each call every resting order has exactly one index entry.

use tracing::debug;
use types::errors::OrderError;
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{OrderRecord, Side};
use types::trade::Trade;

use super::book_side::BookSide;
use super::order_index::OrderIndex;
use super::snapshot::{LevelSnapshot, OrderBookSnapshot};
use crate::matching::{crossing, MatchExecutor};

/// Result of submitting an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Remainder was added to the book (possibly after some fills)
    Resting { trades: Vec<Trade>, remaining: Quantity },
    /// Order was completely filled
    Filled { trades: Vec<Trade> },
    /// IOC remainder was discarded
    Killed { trades: Vec<Trade>, discarded: Quantity },
}

impl SubmitResult {
    pub fn trades(&self) -> &[Trade] {
        match self {
            SubmitResult::Resting { trades, .. }
            | SubmitResult::Filled { trades }
            | SubmitResult::Killed { trades, .. } => trades,
        }
    }

    pub fn into_trades(self) -> Vec<Trade> {
        match self {
            SubmitResult::Resting { trades, .. }
            | SubmitResult::Filled { trades }
            | SubmitResult::Killed { trades, .. } => trades,
        }
    }

    pub fn is_resting(&self) -> bool {
        matches!(self, SubmitResult::Resting { .. })
    }

    /// Sum of all trade quantities
    pub fn filled_quantity(&self) -> Quantity {
        self.trades()
            .iter()
            .fold(Quantity::zero(), |acc, t| acc + t.quantity)
    }
}

/// Order book for a single symbol
#[derive(Debug, Clone)]
pub struct OrderBook {
    symbol: Symbol,
    bids: BookSide,
    asks: BookSide,
    index: OrderIndex,
}

impl OrderBook {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            bids: BookSide::new(Side::BUY),
            asks: BookSide::new(Side::SELL),
            index: OrderIndex::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Match an admitted order against the book, then rest or discard the
    /// remainder according to its time-in-force
    ///
    /// The caller assigns `order.sequence`; it must be greater than the
    /// sequence of every order already resting.
    pub fn submit(
        &mut self,
        mut order: OrderRecord,
        executor: &mut MatchExecutor,
    ) -> Result<SubmitResult, OrderError> {
        if self.index.contains(&order.id) {
            return Err(OrderError::DuplicateIdentifier {
                order_id: order.id.to_string(),
            });
        }
        debug_assert_eq!(order.symbol, self.symbol, "Order routed to the wrong book");

        let trades = self.match_order(&mut order, executor);

        if order.is_filled() {
            return Ok(SubmitResult::Filled { trades });
        }

        if !order.time_in_force.can_rest() {
            debug!(
                symbol = %self.symbol,
                order_id = %order.id,
                discarded = %order.remaining,
                "IOC remainder discarded"
            );
            return Ok(SubmitResult::Killed {
                trades,
                discarded: order.remaining,
            });
        }

        let remaining = order.remaining;
        debug!(
            symbol = %self.symbol,
            order_id = %order.id,
            side = %order.side,
            price = %order.price,
            remaining = %remaining,
            sequence = order.sequence,
            "Order resting"
        );
        self.index.insert(&order);
        self.side_mut(order.side).insert(order);

        Ok(SubmitResult::Resting { trades, remaining })
    }

    /// Trade `order` against the opposite side while prices cross
    fn match_order(&mut self, order: &mut OrderRecord, executor: &mut MatchExecutor) -> Vec<Trade> {
        let mut trades = Vec::new();
        let (opposite, index) = match order.side {
            Side::BUY => (&mut self.asks, &mut self.index),
            Side::SELL => (&mut self.bids, &mut self.index),
        };

        while !order.is_filled() {
            let Some(level) = opposite.best_level_mut() else {
                break;
            };
            let level_price = level.price();
            if !crossing::crosses(order.side, order.price, level_price) {
                break;
            }

            let Some(resting_id) = level.front().map(|resting| resting.id.clone()) else {
                break;
            };
            let Some((matched, exhausted)) = level.fill_front(order.remaining) else {
                break;
            };

            // Execution price is the resting order's price
            let trade = executor.execute_trade(order, resting_id, level_price, matched);
            order.fill(matched);

            debug!(
                symbol = %trade.symbol,
                trade_id = %trade.trade_id,
                aggressor = %trade.aggressor_order_id,
                resting = %trade.resting_order_id,
                price = %trade.price,
                quantity = %trade.quantity,
                "Trade executed"
            );
            trades.push(trade);

            if let Some(filled) = exhausted {
                index.remove(&filled.id);
                opposite.prune_level(level_price);
            }
        }

        trades
    }

    /// Cancel a resting order
    ///
    /// Returns false if the id is not resting in this book.
    pub fn cancel(&mut self, id: &OrderId) -> bool {
        self.remove(id).is_some()
    }

    /// Remove a resting order and return it
    pub fn remove(&mut self, id: &OrderId) -> Option<OrderRecord> {
        let location = self.index.get(id)?;
        let order = self
            .side_mut(location.side)
            .remove(location.price, location.sequence)?;
        self.index.remove(id);

        debug!(
            symbol = %self.symbol,
            order_id = %order.id,
            remaining = %order.remaining,
            "Order removed"
        );
        Some(order)
    }

    /// Replace a resting order's price, quantity and side
    ///
    /// The replacement keeps the id, symbol and time-in-force, takes a new
    /// arrival sequence (losing time priority even at the same price), and
    /// goes through full matching, so it may trade immediately.
    ///
    /// Only resting time-in-forces may be modified. `submit` never rests an
    /// IOC order, so the `NonModifiableOrder` branch guards records placed
    /// on a side by other means.
    pub fn modify(
        &mut self,
        id: &OrderId,
        price: Price,
        quantity: Quantity,
        side: Side,
        executor: &mut MatchExecutor,
    ) -> Result<SubmitResult, OrderError> {
        let current = self.order(id).ok_or_else(|| OrderError::UnknownIdentifier {
            order_id: id.to_string(),
        })?;
        if !current.time_in_force.can_rest() {
            return Err(OrderError::NonModifiableOrder {
                order_id: id.to_string(),
            });
        }

        let previous = self.remove(id).ok_or_else(|| OrderError::UnknownIdentifier {
            order_id: id.to_string(),
        })?;

        let replacement = OrderRecord::new(
            previous.id,
            previous.symbol,
            side,
            price,
            quantity,
            previous.time_in_force,
            executor.next_order_sequence(),
        );
        self.submit(replacement, executor)
    }

    /// Look up a resting order
    pub fn order(&self, id: &OrderId) -> Option<&OrderRecord> {
        let location = self.index.get(id)?;
        self.side(location.side).get(location.price, location.sequence)
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.index.contains(id)
    }

    /// Best bid price and the quantity resting there
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best()
    }

    /// Best ask price and the quantity resting there
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best()
    }

    /// Best ask minus best bid, when both sides are present
    pub fn spread(&self) -> Option<rust_decimal::Decimal> {
        let bid = self.bids.best_price()?;
        let ask = self.asks.best_price()?;
        Some(ask.as_decimal() - bid.as_decimal())
    }

    /// True if the best bid reaches the best ask
    ///
    /// Never true between calls; exposed for invariant checks.
    pub fn is_crossed(&self) -> bool {
        crossing::is_crossed(self.bids.best_price(), self.asks.best_price())
    }

    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Ids of every resting order, in no particular order
    pub fn order_ids(&self) -> impl Iterator<Item = &OrderId> {
        self.index.ids()
    }

    /// Get order book snapshot (top `depth` levels per side)
    pub fn depth_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            bids: self.bids.levels().take(depth).map(LevelSnapshot::from).collect(),
            asks: self.asks.levels().take(depth).map(LevelSnapshot::from).collect(),
        }
    }

    fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::BUY => &self.bids,
            Side::SELL => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::BUY => &mut self.bids,
            Side::SELL => &mut self.asks,
        }
    }
}
