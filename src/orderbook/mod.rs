//! Order book for a single instrument.
//!
//! ## Architecture
//!
//! All order records live in one slab arena. Each container that can hold an
//! order is an intrusive [`OrderList`] over that arena:
//!
//! - [`PriceLevel`]: FIFO queue of open orders at one price, with a running
//!   total quantity
//! - staging: orders touched by the command currently executing
//! - archive: cancelled and filled orders, oldest first
//!
//! [`BookSides`] keys the levels of each side by price so the best level is
//! always the first entry.
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order (no cross) | O(log n) |
//! | Cancel order by ID | O(log n) |
//! | Same-price resize | O(log n) |
//! | Best bid/ask | O(log n) |
//! | Cross | O(k log n) |
//!
//! ## Example
//!
//! ```
//! use lob_engine::orderbook::OrderBook;
//! use lob_engine::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(10_000);
//! book.add_order(Order::new(1, 100, 5, Side::Buy)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(100));
//! ```

pub mod node;
pub mod list;
pub mod level;
pub mod sides;
pub mod book;
pub mod snapshot;
mod matching;
mod invariants;

pub use node::{Location, OrderNode};
pub use list::OrderList;
pub use level::PriceLevel;
pub use sides::BookSides;
pub use book::OrderBook;
pub use snapshot::{BookSnapshot, LevelSnapshot};
