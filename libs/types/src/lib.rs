//! Types library for the limit order book
//!
//! Core type definitions shared by the book and the matching engine.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, TradeId, Symbol)
//! - `numeric`: Fixed-point price and integer quantity
//! - `order`: Order requests and admitted order records
//! - `trade`: Trade execution types
//! - `errors`: Error taxonomy

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
}
