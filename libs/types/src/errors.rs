//! Error types for the matching engine
//!
//! Every condition here is local and recoverable: the engine reports it
//! as a reject and moves on to the next event.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Order admission errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderError {
    #[error("Order identifier is empty")]
    EmptyIdentifier,

    #[error("Invalid price: {price}")]
    InvalidPrice { price: String },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Order already active: {order_id}")]
    DuplicateIdentifier { order_id: String },

    #[error("Order not found: {order_id}")]
    UnknownIdentifier { order_id: String },

    #[error("Order cannot be modified: {order_id}")]
    NonModifiableOrder { order_id: String },
}

impl OrderError {
    /// Benign errors are expected traffic (e.g. cancelling an order that
    /// just filled) rather than client faults
    pub fn is_benign(&self) -> bool {
        matches!(self, OrderError::UnknownIdentifier { .. })
    }

    /// Malformed input: empty id, non-positive price or quantity
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            OrderError::EmptyIdentifier
                | OrderError::InvalidPrice { .. }
                | OrderError::InvalidQuantity { .. }
        )
    }
}

/// Engine configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
