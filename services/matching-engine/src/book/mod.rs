//! Order book infrastructure module
//!
//! Price levels, the two book sides, the order index and the per-symbol
//! book that ties them together.

pub mod book_side;
pub mod order_book;
pub mod order_index;
pub mod price_level;
pub mod snapshot;

pub use book_side::BookSide;
pub use order_book::{OrderBook, SubmitResult};
pub use order_index::{OrderIndex, OrderLocation};
pub use price_level::PriceLevel;
pub use snapshot::{LevelSnapshot, OrderBookSnapshot};
