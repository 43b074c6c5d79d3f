//! Matching engine core
//!
//! Main coordinator: validates each request, routes it to its symbol's
//! book and turns the outcome into output events. Requests are handled
//! strictly one at a time; a request is fully matched and indexed before
//! the next is looked at.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use types::errors::{ConfigError, EngineError, OrderError};
use types::ids::Symbol;
use types::order::{CancelOrder, ModifyOrder, NewOrder, OrderRecord, OrderRequest, Side, TimeInForce};

use crate::book::{OrderBook, OrderBookSnapshot, SubmitResult};
use crate::config::EngineConfig;
use crate::events::{EngineEvent, EngineStats};
use crate::matching::MatchExecutor;
use crate::registry::BookRegistry;
use crate::validation;

/// Main matching engine
pub struct MatchingEngine {
    config: EngineConfig,
    default_symbol: Symbol,
    /// Order books per symbol
    registry: BookRegistry,
    /// Arrival and trade sequence generation
    executor: MatchExecutor,
    stats: EngineStats,
}

impl MatchingEngine {
    /// Create a new matching engine, failing on an invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let default_symbol =
            Symbol::try_new(config.default_symbol.trim()).ok_or_else(|| ConfigError::InvalidValue {
                field: "default_symbol".to_string(),
                reason: "must not be empty".to_string(),
            })?;

        info!(
            starting_order_sequence = config.starting_order_sequence,
            starting_trade_sequence = config.starting_trade_sequence,
            default_symbol = %default_symbol,
            "MatchingEngine initialized"
        );

        Ok(Self {
            executor: MatchExecutor::new(config.starting_order_sequence, config.starting_trade_sequence),
            registry: BookRegistry::new(),
            stats: EngineStats::default(),
            default_symbol,
            config,
        })
    }

    /// Create a new matching engine with default configuration
    pub fn with_defaults() -> Self {
        let config = EngineConfig::default();
        Self {
            executor: MatchExecutor::new(config.starting_order_sequence, config.starting_trade_sequence),
            registry: BookRegistry::new(),
            stats: EngineStats::default(),
            default_symbol: Symbol::new(config.default_symbol.clone()),
            config,
        }
    }

    /// Process one request
    ///
    /// Returns the trades in execution order followed by an `Ack` for an
    /// accepted NEW or MODIFY, a single `Cancelled` for an accepted CANCEL,
    /// or a single `Rejected`.
    pub fn process(&mut self, request: OrderRequest) -> Vec<EngineEvent> {
        let outcome = match &request {
            OrderRequest::New(new) => self.handle_new(new),
            OrderRequest::Cancel(cancel) => self.handle_cancel(cancel),
            OrderRequest::Modify(modify) => self.handle_modify(modify),
        };

        match outcome {
            Ok(events) => {
                self.stats.accepted += 1;
                events
            }
            Err(reason) => {
                self.stats.rejected += 1;
                log_reject(&request, &reason);
                vec![EngineEvent::Rejected {
                    order_id: request.id().to_string(),
                    reason,
                }]
            }
        }
    }

    /// Process one request, returning a reject as an error instead of a
    /// `Rejected` event
    pub fn try_process(&mut self, request: OrderRequest) -> Result<Vec<EngineEvent>, EngineError> {
        let mut events = self.process(request);
        match events.pop() {
            Some(EngineEvent::Rejected { reason, .. }) => Err(reason.into()),
            Some(last) => {
                events.push(last);
                Ok(events)
            }
            None => Ok(events),
        }
    }

    /// Process requests in order, concatenating their events
    pub fn process_all<I>(&mut self, requests: I) -> Vec<EngineEvent>
    where
        I: IntoIterator<Item = OrderRequest>,
    {
        requests
            .into_iter()
            .flat_map(|request| self.process(request))
            .collect()
    }

    /// Submit a NEW request
    pub fn submit(
        &mut self,
        id: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        price: Decimal,
        quantity: i64,
        time_in_force: TimeInForce,
    ) -> Vec<EngineEvent> {
        self.process(OrderRequest::new_order(id, symbol, side, price, quantity, time_in_force))
    }

    /// Submit a CANCEL request
    pub fn cancel(&mut self, id: impl Into<String>) -> Vec<EngineEvent> {
        self.process(OrderRequest::cancel(id))
    }

    /// Submit a MODIFY request
    pub fn modify(
        &mut self,
        id: impl Into<String>,
        side: Side,
        price: Decimal,
        quantity: i64,
    ) -> Vec<EngineEvent> {
        self.process(OrderRequest::modify(id, side, price, quantity))
    }

    fn handle_new(&mut self, request: &NewOrder) -> Result<Vec<EngineEvent>, OrderError> {
        let order = validation::validate_new(request, &self.registry, &self.default_symbol)?;

        debug!(
            order_id = %order.id,
            symbol = %order.symbol,
            side = %order.side,
            price = %order.price,
            quantity = %order.quantity,
            time_in_force = ?order.time_in_force,
            "Order accepted"
        );

        let record = OrderRecord::new(
            order.id,
            order.symbol.clone(),
            order.side,
            order.price,
            order.quantity,
            order.time_in_force,
            self.executor.next_order_sequence(),
        );
        let order_id = record.id.clone();

        let result = self.registry.submit(record, &mut self.executor)?;
        Ok(self.acknowledge(order_id, order.symbol, result))
    }

    fn handle_cancel(&mut self, request: &CancelOrder) -> Result<Vec<EngineEvent>, OrderError> {
        let cancel = validation::validate_cancel(request, &self.registry)?;

        if self.registry.cancel(&cancel.id).is_none() {
            return Err(OrderError::UnknownIdentifier {
                order_id: cancel.id.to_string(),
            });
        }

        self.stats.cancelled += 1;
        debug!(order_id = %cancel.id, symbol = %cancel.symbol, "Order cancelled");
        Ok(vec![EngineEvent::Cancelled {
            order_id: cancel.id,
            symbol: cancel.symbol,
        }])
    }

    fn handle_modify(&mut self, request: &ModifyOrder) -> Result<Vec<EngineEvent>, OrderError> {
        let modify = validation::validate_modify(request, &self.registry)?;

        let result = self.registry.modify(
            &modify.id,
            modify.price,
            modify.quantity,
            modify.side,
            &mut self.executor,
        )?;

        debug!(
            order_id = %modify.id,
            symbol = %modify.symbol,
            side = %modify.side,
            price = %modify.price,
            quantity = %modify.quantity,
            "Order modified"
        );
        Ok(self.acknowledge(modify.id, modify.symbol, result))
    }

    fn acknowledge(
        &mut self,
        order_id: types::ids::OrderId,
        symbol: Symbol,
        result: SubmitResult,
    ) -> Vec<EngineEvent> {
        let resting = result.is_resting();
        let trades = result.into_trades();
        self.stats.trades += trades.len() as u64;

        let mut events: Vec<EngineEvent> = trades.into_iter().map(EngineEvent::Trade).collect();
        events.push(EngineEvent::Ack {
            order_id,
            symbol,
            resting,
        });
        events
    }

    /// Get the book for a symbol, if one has been created
    pub fn book(&self, symbol: &str) -> Option<&OrderBook> {
        self.registry.get(symbol)
    }

    pub fn registry(&self) -> &BookRegistry {
        &self.registry
    }

    /// Get order book snapshot; depth 0 means the configured default
    pub fn snapshot(&self, symbol: &str, depth: usize) -> Option<OrderBookSnapshot> {
        let depth = if depth == 0 { self.config.snapshot_depth } else { depth };
        self.registry.get(symbol).map(|book| book.depth_snapshot(depth))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn default_symbol(&self) -> &Symbol {
        &self.default_symbol
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn log_reject(request: &OrderRequest, reason: &OrderError) {
    match reason {
        // Expected traffic: the order filled or was cancelled first
        OrderError::UnknownIdentifier { .. } => {
            debug!(op = request.kind(), order_id = request.id(), %reason, "Order not found")
        }
        _ => warn!(op = request.kind(), order_id = request.id(), %reason, "Request rejected"),
    }
}
