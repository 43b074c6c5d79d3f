//! Matching Engine Service
//!
//! Limit order book with price-time priority matching across any number
//! of symbols.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Trades execute at the resting order's price
//! - Book never left crossed between requests
//! - Deterministic matching (same inputs → same outputs)
//! - Conservation of quantity

pub mod book;
pub mod config;
pub mod engine;
pub mod events;
pub mod matching;
pub mod registry;
pub mod validation;

pub use book::{OrderBook, OrderBookSnapshot, SubmitResult};
pub use config::EngineConfig;
pub use engine::MatchingEngine;
pub use events::{EngineEvent, EngineStats};
pub use registry::BookRegistry;
