//! # lob-engine
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Fill, ExecutionReceipt)
//! - **OrderBook**: slab arena, price levels and transactional commands
//! - **Engine**: command stream executor issuing receipts
//! - **Events**: injectable sink observing every state transition
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical command streams produce identical books
//! 2. **Integer prices**: prices are ticks, quantities are lots
//! 3. **Transactions**: every command stages, crosses and dispatches before
//!    returning; rejected commands change nothing
//! 4. **Fail-stop**: a broken invariant faults the book
//!
//! ## Example
//!
//! ```
//! use lob_engine::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//! book.add_order(Order::new(1, 100, 10, Side::Buy)).unwrap();
//! book.add_order(Order::new(2, 99, 4, Side::Sell)).unwrap();
//!
//! assert_eq!(book.fills()[0].price, 100);
//! assert_eq!(book.best_bid_level().unwrap().total_quantity(), 6);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Fill, ExecutionReceipt
pub mod types;

/// Order book: levels, staging, archive, crossing
pub mod orderbook;

/// Matching engine: command execution and receipts
pub mod engine;

/// Event sinks observing book transitions
pub mod events;

pub mod config;

pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{ExecutionReceipt, Fill, Order, OrderId, OrderStatus, Price, Quantity, Side};
pub use orderbook::{BookSnapshot, LevelSnapshot, OrderBook, PriceLevel};
pub use engine::{Command, MatchingEngine};
pub use events::{BookEvent, EventSink, NullSink, RecordingSink, TracingSink};
pub use config::BookConfig;
pub use error::{BookError, Result};
