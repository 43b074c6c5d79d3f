//! Request validation
//!
//! Turns raw requests into checked values before anything touches a book.
//! A rejected request leaves every book unchanged.
//!
//! Checks are applied in order and the first failure wins:
//! 1. Identifier is non-empty
//! 2. Price is positive and quantity is in `1..=Quantity::MAX_ORDER`
//!    (NEW, MODIFY)
//! 3. Identifier is not already active (NEW) or is active (CANCEL, MODIFY)

use rust_decimal::Decimal;
use types::errors::OrderError;
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{CancelOrder, ModifyOrder, NewOrder, Side, TimeInForce};

use crate::registry::BookRegistry;

/// Admitted NEW request
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedNew {
    pub id: OrderId,
    pub symbol: Symbol,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub time_in_force: TimeInForce,
}

/// Admitted CANCEL request, resolved to the book holding the order
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCancel {
    pub id: OrderId,
    pub symbol: Symbol,
}

/// Admitted MODIFY request, resolved to the book holding the order
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedModify {
    pub id: OrderId,
    pub symbol: Symbol,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

/// Validate a NEW request
///
/// An empty symbol routes to `default_symbol`.
pub fn validate_new(
    request: &NewOrder,
    registry: &BookRegistry,
    default_symbol: &Symbol,
) -> Result<ValidatedNew, OrderError> {
    let id = check_id(&request.id)?;
    let price = check_price(request.price)?;
    let quantity = check_quantity(request.quantity)?;

    if registry.contains_order(&id) {
        return Err(OrderError::DuplicateIdentifier {
            order_id: request.id.clone(),
        });
    }

    let symbol = Symbol::try_new(request.symbol.as_str()).unwrap_or_else(|| default_symbol.clone());

    Ok(ValidatedNew {
        id,
        symbol,
        side: request.side,
        price,
        quantity,
        time_in_force: request.time_in_force,
    })
}

/// Validate a CANCEL request
pub fn validate_cancel(
    request: &CancelOrder,
    registry: &BookRegistry,
) -> Result<ValidatedCancel, OrderError> {
    let id = check_id(&request.id)?;
    let symbol = locate(registry, &id)?;
    Ok(ValidatedCancel { id, symbol })
}

/// Validate a MODIFY request
pub fn validate_modify(
    request: &ModifyOrder,
    registry: &BookRegistry,
) -> Result<ValidatedModify, OrderError> {
    let id = check_id(&request.id)?;
    let price = check_price(request.price)?;
    let quantity = check_quantity(request.quantity)?;
    let symbol = locate(registry, &id)?;

    Ok(ValidatedModify {
        id,
        symbol,
        side: request.side,
        price,
        quantity,
    })
}

fn check_id(raw: &str) -> Result<OrderId, OrderError> {
    OrderId::try_new(raw).ok_or(OrderError::EmptyIdentifier)
}

fn check_price(raw: Decimal) -> Result<Price, OrderError> {
    Price::try_new(raw).ok_or_else(|| OrderError::InvalidPrice {
        price: raw.to_string(),
    })
}

fn check_quantity(raw: i64) -> Result<Quantity, OrderError> {
    Quantity::try_new(raw).ok_or(OrderError::InvalidQuantity { quantity: raw })
}

fn locate(registry: &BookRegistry, id: &OrderId) -> Result<Symbol, OrderError> {
    registry
        .locate(id)
        .cloned()
        .ok_or_else(|| OrderError::UnknownIdentifier {
            order_id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchExecutor;
    use types::order::OrderRecord;

    fn default_symbol() -> Symbol {
        Symbol::new("DEFAULT")
    }

    fn new_request(id: &str, price: Decimal, quantity: i64) -> NewOrder {
        NewOrder {
            id: id.to_string(),
            symbol: "AAPL".to_string(),
            side: Side::BUY,
            price,
            quantity,
            time_in_force: TimeInForce::GFD,
        }
    }

    fn registry_with(id: &str) -> BookRegistry {
        let mut registry = BookRegistry::new();
        let mut executor = MatchExecutor::new(1, 1);
        let symbol = Symbol::new("AAPL");
        let order = OrderRecord::new(
            OrderId::from(id),
            symbol.clone(),
            Side::SELL,
            Price::from_u64(10),
            Quantity::new(5),
            TimeInForce::GFD,
            executor.next_order_sequence(),
        );
        registry.submit(order, &mut executor).unwrap();
        registry
    }

    #[test]
    fn test_new_accepted() {
        let validated =
            validate_new(&new_request("A", Decimal::new(105, 1), 10), &BookRegistry::new(), &default_symbol())
                .unwrap();
        assert_eq!(validated.id.as_str(), "A");
        assert_eq!(validated.price.to_string(), "10.5");
        assert_eq!(validated.quantity, Quantity::new(10));
        assert_eq!(validated.symbol.as_str(), "AAPL");
    }

    #[test]
    fn test_new_empty_symbol_uses_default() {
        let mut request = new_request("A", Decimal::from(10), 10);
        request.symbol.clear();
        let validated = validate_new(&request, &BookRegistry::new(), &default_symbol()).unwrap();
        assert_eq!(validated.symbol.as_str(), "DEFAULT");
    }

    #[test]
    fn test_new_rejects_malformed() {
        let registry = BookRegistry::new();
        let sym = default_symbol();

        let err = validate_new(&new_request("", Decimal::from(10), 10), &registry, &sym).unwrap_err();
        assert_eq!(err, OrderError::EmptyIdentifier);

        let err = validate_new(&new_request("A", Decimal::ZERO, 10), &registry, &sym).unwrap_err();
        assert!(matches!(err, OrderError::InvalidPrice { .. }));

        let err = validate_new(&new_request("A", Decimal::from(-3), 10), &registry, &sym).unwrap_err();
        assert!(matches!(err, OrderError::InvalidPrice { .. }));

        let err = validate_new(&new_request("A", Decimal::from(10), 0), &registry, &sym).unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { quantity: 0 });

        let err = validate_new(&new_request("A", Decimal::from(10), -5), &registry, &sym).unwrap_err();
        assert!(err.is_malformed());

        let err = validate_new(&new_request("A", Decimal::from(10), i64::MAX), &registry, &sym).unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { quantity: i64::MAX });
    }

    #[test]
    fn test_new_rejects_duplicate_in_any_book() {
        let registry = registry_with("A");
        let mut request = new_request("A", Decimal::from(10), 10);
        request.symbol = "MSFT".to_string();

        let err = validate_new(&request, &registry, &default_symbol()).unwrap_err();
        assert!(matches!(err, OrderError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn test_cancel_resolves_book() {
        let registry = registry_with("A");
        let validated = validate_cancel(&CancelOrder { id: "A".to_string() }, &registry).unwrap();
        assert_eq!(validated.symbol.as_str(), "AAPL");

        let err = validate_cancel(&CancelOrder { id: "B".to_string() }, &registry).unwrap_err();
        assert!(err.is_benign());

        let err = validate_cancel(&CancelOrder { id: String::new() }, &registry).unwrap_err();
        assert_eq!(err, OrderError::EmptyIdentifier);
    }

    #[test]
    fn test_modify_checks_fields_before_lookup() {
        let registry = registry_with("A");
        let request = ModifyOrder {
            id: "missing".to_string(),
            side: Side::BUY,
            price: Decimal::ZERO,
            quantity: 1,
        };
        let err = validate_modify(&request, &registry).unwrap_err();
        assert!(matches!(err, OrderError::InvalidPrice { .. }));

        let request = ModifyOrder {
            id: "A".to_string(),
            side: Side::BUY,
            price: Decimal::from(9),
            quantity: 3,
        };
        let validated = validate_modify(&request, &registry).unwrap();
        assert_eq!(validated.symbol.as_str(), "AAPL");
        assert_eq!(validated.side, Side::BUY);
    }
}
