//! Matching logic module
//!
//! Price-time priority crossing rules and trade sequencing

pub mod crossing;
pub mod executor;

pub use crossing::{can_match, crosses};
pub use executor::MatchExecutor;
