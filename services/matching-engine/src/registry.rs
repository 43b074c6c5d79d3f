//! Book registry
//!
//! One order book per distinct symbol, created lazily on the first NEW
//! that names the symbol. Books are kept in symbol order so iteration is
//! deterministic.
//!
//! The registry also owns the engine-wide order map (`OrderId → Symbol`)
//! that routes CANCEL and MODIFY to their book in O(1). Every mutation of
//! a book goes through the registry so the map and the per-book indexes
//! never disagree.

use std::collections::{BTreeMap, HashMap};
use tracing::info;
use types::errors::OrderError;
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{OrderRecord, Side};

use crate::book::{OrderBook, SubmitResult};
use crate::matching::MatchExecutor;

/// Symbol → order book map owned by the engine
#[derive(Debug, Clone, Default)]
pub struct BookRegistry {
    books: BTreeMap<Symbol, OrderBook>,
    /// Book holding each resting order
    owners: HashMap<OrderId, Symbol>,
}

impl BookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the book for `symbol`, creating an empty one if needed
    ///
    /// Crate-internal: orders entering a book must go through
    /// [`BookRegistry::submit`] so the order map stays in step.
    pub(crate) fn get_or_create(&mut self, symbol: &Symbol) -> &mut OrderBook {
        self.books.entry(symbol.clone()).or_insert_with(|| {
            info!(symbol = %symbol, "Order book created");
            OrderBook::new(symbol.clone())
        })
    }

    /// Match an admitted order in its symbol's book, creating the book on
    /// first use
    pub fn submit(
        &mut self,
        order: OrderRecord,
        executor: &mut MatchExecutor,
    ) -> Result<SubmitResult, OrderError> {
        if self.owners.contains_key(&order.id) {
            return Err(OrderError::DuplicateIdentifier {
                order_id: order.id.to_string(),
            });
        }

        let id = order.id.clone();
        let symbol = order.symbol.clone();
        let result = self.get_or_create(&symbol).submit(order, executor)?;
        self.sync(&symbol, &id, &result);
        Ok(result)
    }

    /// Remove a resting order from whichever book holds it
    pub fn cancel(&mut self, id: &OrderId) -> Option<OrderRecord> {
        let symbol = self.owners.get(id)?;
        let order = self.books.get_mut(symbol)?.remove(id)?;
        self.owners.remove(id);
        Some(order)
    }

    /// Replace a resting order in whichever book holds it
    pub fn modify(
        &mut self,
        id: &OrderId,
        price: Price,
        quantity: Quantity,
        side: Side,
        executor: &mut MatchExecutor,
    ) -> Result<SubmitResult, OrderError> {
        let unknown = || OrderError::UnknownIdentifier {
            order_id: id.to_string(),
        };
        let symbol = self.owners.get(id).cloned().ok_or_else(unknown)?;
        let book = self.books.get_mut(symbol.as_str()).ok_or_else(unknown)?;

        let result = book.modify(id, price, quantity, side, executor)?;
        self.sync(&symbol, id, &result);
        Ok(result)
    }

    /// Bring the order map in line with `symbol`'s book after `id` was
    /// matched there: exhausted resting orders leave, a resting remainder
    /// of `id` enters
    fn sync(&mut self, symbol: &Symbol, id: &OrderId, result: &SubmitResult) {
        let Some(book) = self.books.get(symbol.as_str()) else {
            return;
        };
        for trade in result.trades() {
            if !book.contains(&trade.resting_order_id) {
                self.owners.remove(&trade.resting_order_id);
            }
        }
        if book.contains(id) {
            self.owners.insert(id.clone(), symbol.clone());
        } else {
            self.owners.remove(id);
        }
    }

    /// Get an existing book; never creates one
    pub fn get(&self, symbol: &str) -> Option<&OrderBook> {
        self.books.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.books.contains_key(symbol)
    }

    /// Drop a book and every order resting in it
    pub fn remove(&mut self, symbol: &str) -> Option<OrderBook> {
        let book = self.books.remove(symbol)?;
        for id in book.order_ids() {
            self.owners.remove(id);
        }
        info!(symbol = %symbol, orders = book.order_count(), "Order book removed");
        Some(book)
    }

    /// Symbols with a book, in ascending order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.books.keys()
    }

    pub fn books(&self) -> impl Iterator<Item = &OrderBook> {
        self.books.values()
    }

    /// Symbol of the book holding active order `id`
    pub fn locate(&self, id: &OrderId) -> Option<&Symbol> {
        self.owners.get(id)
    }

    pub fn contains_order(&self, id: &OrderId) -> bool {
        self.owners.contains_key(id)
    }

    /// Number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Active orders across all books
    pub fn order_count(&self) -> usize {
        self.owners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::TimeInForce;

    fn order(
        executor: &mut MatchExecutor,
        id: &str,
        symbol: &str,
        side: Side,
        price: u64,
        qty: u64,
    ) -> OrderRecord {
        OrderRecord::new(
            OrderId::from(id),
            Symbol::new(symbol),
            side,
            Price::from_u64(price),
            Quantity::new(qty),
            TimeInForce::GFD,
            executor.next_order_sequence(),
        )
    }

    fn rest(registry: &mut BookRegistry, executor: &mut MatchExecutor, id: &str, symbol: &str) {
        let order = order(executor, id, symbol, Side::BUY, 10, 1);
        registry.submit(order, executor).unwrap();
    }

    /// Every order map entry points at a book that holds the order, and
    /// every resting order has an entry
    fn assert_in_step(registry: &BookRegistry) {
        let mut resting = 0;
        for book in registry.books() {
            for id in book.order_ids() {
                assert_eq!(registry.locate(id), Some(book.symbol()));
                resting += 1;
            }
        }
        assert_eq!(registry.order_count(), resting);
    }

    #[test]
    fn test_get_does_not_create() {
        let registry = BookRegistry::new();
        assert!(registry.get("AAPL").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_submit_reuses_book() {
        let mut registry = BookRegistry::new();
        let mut executor = MatchExecutor::new(1, 1);
        rest(&mut registry, &mut executor, "A", "AAPL");
        rest(&mut registry, &mut executor, "B", "AAPL");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("AAPL").unwrap().order_count(), 2);
        assert_in_step(&registry);
    }

    #[test]
    fn test_locate_across_books() {
        let mut registry = BookRegistry::new();
        let mut executor = MatchExecutor::new(1, 1);
        rest(&mut registry, &mut executor, "A", "MSFT");
        rest(&mut registry, &mut executor, "B", "AAPL");

        assert_eq!(registry.locate(&OrderId::from("A")).map(Symbol::as_str), Some("MSFT"));
        assert_eq!(registry.locate(&OrderId::from("B")).map(Symbol::as_str), Some("AAPL"));
        assert!(!registry.contains_order(&OrderId::from("C")));

        let symbols: Vec<&str> = registry.symbols().map(Symbol::as_str).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
        assert_eq!(registry.order_count(), 2);
    }

    #[test]
    fn test_duplicate_across_books() {
        let mut registry = BookRegistry::new();
        let mut executor = MatchExecutor::new(1, 1);
        rest(&mut registry, &mut executor, "A", "AAPL");

        let dup = order(&mut executor, "A", "MSFT", Side::SELL, 10, 1);
        let err = registry.submit(dup, &mut executor).unwrap_err();
        assert!(matches!(err, OrderError::DuplicateIdentifier { .. }));
        assert!(!registry.contains("MSFT"));
    }

    #[test]
    fn test_fills_leave_order_map() {
        let mut registry = BookRegistry::new();
        let mut executor = MatchExecutor::new(1, 1);
        let s1 = order(&mut executor, "S1", "AAPL", Side::SELL, 10, 5);
        let s2 = order(&mut executor, "S2", "AAPL", Side::SELL, 11, 5);
        registry.submit(s1, &mut executor).unwrap();
        registry.submit(s2, &mut executor).unwrap();

        let buy = order(&mut executor, "B1", "AAPL", Side::BUY, 11, 8);
        let result = registry.submit(buy, &mut executor).unwrap();

        assert_eq!(result.trades().len(), 2);
        assert!(!registry.contains_order(&OrderId::from("S1")));
        assert!(registry.contains_order(&OrderId::from("S2")));
        assert!(!registry.contains_order(&OrderId::from("B1")));
        assert_in_step(&registry);
    }

    #[test]
    fn test_cancel_and_modify_keep_map_in_step() {
        let mut registry = BookRegistry::new();
        let mut executor = MatchExecutor::new(1, 1);
        rest(&mut registry, &mut executor, "A", "AAPL");
        rest(&mut registry, &mut executor, "B", "AAPL");
        let ask = order(&mut executor, "S", "AAPL", Side::SELL, 12, 3);
        registry.submit(ask, &mut executor).unwrap();

        assert!(registry.cancel(&OrderId::from("A")).is_some());
        assert!(registry.cancel(&OrderId::from("A")).is_none());

        // B crosses the ask and fills completely
        let result = registry
            .modify(&OrderId::from("B"), Price::from_u64(12), Quantity::new(3), Side::BUY, &mut executor)
            .unwrap();
        assert_eq!(result.trades().len(), 1);
        assert!(!registry.contains_order(&OrderId::from("B")));
        assert!(!registry.contains_order(&OrderId::from("S")));

        let err = registry
            .modify(&OrderId::from("B"), Price::from_u64(12), Quantity::new(3), Side::BUY, &mut executor)
            .unwrap_err();
        assert!(err.is_benign());
        assert_in_step(&registry);
        assert_eq!(registry.order_count(), 0);
    }

    #[test]
    fn test_remove_book() {
        let mut registry = BookRegistry::new();
        let mut executor = MatchExecutor::new(1, 1);
        rest(&mut registry, &mut executor, "A", "AAPL");

        let book = registry.remove("AAPL").unwrap();
        assert_eq!(book.order_count(), 1);
        assert!(!registry.contains("AAPL"));
        assert!(!registry.contains_order(&OrderId::from("A")));
    }
}
