//! Matching engine front end.
//!
//! The [`MatchingEngine`] owns one [`OrderBook`](crate::OrderBook), applies
//! [`Command`]s to it and returns an
//! [`ExecutionReceipt`](crate::ExecutionReceipt) for every committed command.
//!
//! ## Error Policy
//!
//! - Recoverable errors (unknown id, terminal order, bad quantity) reject the
//!   single command and leave the book unchanged.
//! - Fatal errors fault the book; every later command fails.
//!
//! ## Example
//!
//! ```
//! use lob_engine::engine::{Command, MatchingEngine};
//! use lob_engine::types::Side;
//!
//! let mut engine = MatchingEngine::new();
//! engine.execute(Command::add(1, 100, 10, Side::Sell)).unwrap();
//!
//! let receipt = engine.execute(Command::add(2, 101, 4, Side::Buy)).unwrap();
//! assert_eq!(receipt.fills_emitted, 1);
//! assert_eq!(engine.book().best_ask(), Some(100));
//! ```

pub mod command;
pub mod matcher;

pub use command::Command;
pub use matcher::MatchingEngine;
