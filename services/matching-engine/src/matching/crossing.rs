//! Crossing detection logic
//!
//! Determines when an incoming order's limit permits a trade against the
//! best opposite price.

use types::numeric::Price;
use types::order::Side;

/// A bid and an ask can trade when the bid is at or above the ask
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order crosses a resting price on the other side
pub fn crosses(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::BUY => can_match(incoming_price, resting_price),
        Side::SELL => can_match(resting_price, incoming_price),
    }
}

/// A book is crossed when its best bid reaches its best ask
pub fn is_crossed(best_bid: Option<Price>, best_ask: Option<Price>) -> bool {
    match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => can_match(bid, ask),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: u64) -> Price {
        Price::from_u64(value)
    }

    #[test]
    fn test_can_match() {
        assert!(can_match(px(50), px(49)), "Bid above ask should match");
        assert!(can_match(px(50), px(50)), "Equal prices should match");
        assert!(!can_match(px(49), px(50)), "Bid below ask should not match");
    }

    #[test]
    fn test_incoming_buy_crosses() {
        assert!(crosses(Side::BUY, px(11), px(10)));
        assert!(crosses(Side::BUY, px(10), px(10)));
        assert!(!crosses(Side::BUY, px(9), px(10)));
    }

    #[test]
    fn test_incoming_sell_crosses() {
        assert!(crosses(Side::SELL, px(9), px(10)));
        assert!(crosses(Side::SELL, px(10), px(10)));
        assert!(!crosses(Side::SELL, px(11), px(10)));
    }

    #[test]
    fn test_is_crossed() {
        assert!(!is_crossed(None, Some(px(10))));
        assert!(!is_crossed(Some(px(9)), Some(px(10))));
        assert!(is_crossed(Some(px(10)), Some(px(10))));
    }
}
