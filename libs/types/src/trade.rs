//! Trade execution types

use crate::ids::{OrderId, Symbol, TradeId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One execution between an incoming (aggressor) order and a resting order
///
/// The execution price is always the resting order's price, so any price
/// improvement goes to the aggressor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub symbol: Symbol,

    // Order references
    pub aggressor_order_id: OrderId,
    pub resting_order_id: OrderId,

    /// Side of the aggressor
    pub aggressor_side: Side,
    /// Limit price of the aggressor
    pub aggressor_price: Price,

    // Execution
    pub price: Price,
    pub quantity: Quantity,
}

impl Trade {
    /// Engine-wide trade sequence
    pub fn sequence(&self) -> u64 {
        self.trade_id.sequence()
    }

    /// Traded notional (price × quantity)
    pub fn trade_value(&self) -> Decimal {
        self.price.as_decimal() * Decimal::from(self.quantity.value())
    }
}

/// Report line: `TRADE <resting> <price> <qty> <aggressor> <price> <qty>`
///
/// The earlier (resting) order is listed first, each with its own price.
impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRADE {} {} {} {} {} {}",
            self.resting_order_id,
            self.price,
            self.quantity,
            self.aggressor_order_id,
            self.aggressor_price,
            self.quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trade {
        Trade {
            trade_id: TradeId::from_sequence(7),
            symbol: Symbol::new("AAPL"),
            aggressor_order_id: OrderId::from("B1"),
            resting_order_id: OrderId::from("S1"),
            aggressor_side: Side::BUY,
            aggressor_price: Price::from_u64(11),
            price: Price::from_u64(10),
            quantity: Quantity::new(30),
        }
    }

    #[test]
    fn test_trade_value() {
        assert_eq!(sample().trade_value(), Decimal::from(300));
        assert_eq!(sample().sequence(), 7);
    }

    #[test]
    fn test_trade_report_line() {
        assert_eq!(sample().to_string(), "TRADE S1 10 30 B1 11 30");
    }

    #[test]
    fn test_trade_serialization() {
        let trade = sample();
        let json = serde_json::to_string(&trade).unwrap();
        let deserialized: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deserialized);
    }
}
