//! Error types for the order book.
//!
//! Errors fall into two classes:
//!
//! - **Recoverable** input errors (`UnknownOrder`, `OrderNotOpen`,
//!   `DuplicateOrder`, `InvalidQuantity`, `EmptyLevel`). The failing command is
//!   rejected before any state transfer, so the book is unchanged.
//! - **Fatal** engine errors (`InvariantViolation`, `Faulted`). These mean the
//!   book's own bookkeeping is corrupt. The book refuses further commands.

use thiserror::Error;

use crate::types::{OrderId, OrderStatus, Price, Quantity};

/// Errors returned by order book commands and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Update/cancel referencing an id the book has never seen.
    #[error("unknown order id {0}")]
    UnknownOrder(OrderId),

    /// Update/cancel referencing an order that is already terminal.
    #[error("order {id} is not open (status {status})")]
    OrderNotOpen { id: OrderId, status: OrderStatus },

    /// Best order requested from a level with no residents.
    #[error("price level {price} is empty")]
    EmptyLevel { price: Price },

    /// Add with an id the book already knows.
    #[error("order id {0} already exists")]
    DuplicateOrder(OrderId),

    /// Quantity outside the accepted range for the command.
    #[error("invalid quantity {quantity} for order {id}")]
    InvalidQuantity { id: OrderId, quantity: Quantity },

    /// The book's internal accounting is inconsistent.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A previous command hit an invariant violation; the book is unusable.
    #[error("order book is faulted by an earlier invariant violation")]
    Faulted,
}

impl BookError {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        BookError::InvariantViolation(msg.into())
    }

    /// Whether this error signals engine corruption rather than bad input
    pub fn is_fatal(&self) -> bool {
        matches!(self, BookError::InvariantViolation(_) | BookError::Faulted)
    }
}

pub type Result<T> = std::result::Result<T, BookError>;
