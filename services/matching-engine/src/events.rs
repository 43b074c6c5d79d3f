//! Event structures for matching engine
//!
//! Every processed request yields one of:
//! - zero or more `Trade` events followed by one `Ack` (NEW, MODIFY)
//! - one `Cancelled` (CANCEL)
//! - one `Rejected` (any request that failed validation)

use serde::{Deserialize, Serialize};
use types::errors::OrderError;
use types::ids::{OrderId, Symbol};
use types::trade::Trade;

/// Output event of the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineEvent {
    /// Execution between an aggressor and a resting order
    Trade(Trade),
    /// NEW or MODIFY accepted; `resting` is true if a remainder is now on
    /// the book
    Ack {
        order_id: OrderId,
        symbol: Symbol,
        resting: bool,
    },
    /// Resting order removed by CANCEL
    Cancelled { order_id: OrderId, symbol: Symbol },
    /// Request refused with no state change
    Rejected { order_id: String, reason: OrderError },
}

impl EngineEvent {
    pub fn as_trade(&self) -> Option<&Trade> {
        match self {
            EngineEvent::Trade(trade) => Some(trade),
            _ => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, EngineEvent::Rejected { .. })
    }
}

/// Running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Requests accepted (NEW, CANCEL, MODIFY)
    pub accepted: u64,
    /// Requests rejected
    pub rejected: u64,
    /// Trades executed
    pub trades: u64,
    /// Orders removed by CANCEL
    pub cancelled: u64,
}
