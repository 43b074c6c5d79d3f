//! Trade execution and sequencing
//!
//! The executor owns the two engine-wide counters: the arrival sequence
//! that gives orders their time priority, and the trade sequence that
//! identifies executions. Both are strictly increasing.

use types::ids::{OrderId, TradeId};
use types::numeric::{Price, Quantity};
use types::order::OrderRecord;
use types::trade::Trade;

/// Sequence generation and trade construction
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    order_sequence: u64,
    trade_sequence: u64,
}

impl MatchExecutor {
    /// Create a new executor with starting sequence numbers
    pub fn new(starting_order_sequence: u64, starting_trade_sequence: u64) -> Self {
        Self {
            order_sequence: starting_order_sequence,
            trade_sequence: starting_trade_sequence,
        }
    }

    /// Next arrival sequence (monotonically increasing)
    pub fn next_order_sequence(&mut self) -> u64 {
        let seq = self.order_sequence;
        self.order_sequence += 1;
        seq
    }

    fn next_trade_sequence(&mut self) -> u64 {
        let seq = self.trade_sequence;
        self.trade_sequence += 1;
        seq
    }

    /// Number the next trade between an aggressor and a resting order
    ///
    /// `price` is the resting order's price.
    pub fn execute_trade(
        &mut self,
        aggressor: &OrderRecord,
        resting_order_id: OrderId,
        price: Price,
        quantity: Quantity,
    ) -> Trade {
        Trade {
            trade_id: TradeId::from_sequence(self.next_trade_sequence()),
            symbol: aggressor.symbol.clone(),
            aggressor_order_id: aggressor.id.clone(),
            resting_order_id,
            aggressor_side: aggressor.side,
            aggressor_price: aggressor.price,
            price,
            quantity,
        }
    }
}
