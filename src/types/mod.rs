//! Core data types for the matching engine
//!
//! ## Types
//!
//! - [`Order`]: A limit order
//! - [`Side`]: Buy or Sell
//! - [`OrderStatus`]: Open, Cancelled or Filled
//! - [`Fill`]: An executed trade between a resting order and an aggressor
//! - [`ExecutionReceipt`]: Per-command execution summary
//!
//! Prices and quantities are plain signed integers (ticks and lots).

mod order;
mod fill;
mod receipt;

/// Caller-assigned order identifier
pub type OrderId = u64;

/// Price in ticks
pub type Price = i64;

/// Quantity in lots
pub type Quantity = i64;

// Re-export all types at module level
pub use order::{Order, OrderStatus, Side};
pub use fill::Fill;
pub use receipt::ExecutionReceipt;
