//! Commands accepted by the matching engine.

use std::fmt;

use crate::types::{OrderId, Price, Quantity, Side};

/// One instruction against the book.
///
/// ## Example
///
/// ```
/// use lob_engine::engine::Command;
/// use lob_engine::types::Side;
///
/// let cmd = Command::add(1, 100, 10, Side::Sell);
/// assert_eq!(cmd.order_id(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Submit a new limit order
    Add {
        id: OrderId,
        price: Price,
        quantity: Quantity,
        side: Side,
    },
    /// Reprice and/or resize an open order; zero quantity cancels
    Update {
        id: OrderId,
        price: Price,
        quantity: Quantity,
    },
    /// Cancel an open order
    Cancel { id: OrderId },
}

impl Command {
    pub fn add(id: OrderId, price: Price, quantity: Quantity, side: Side) -> Self {
        Self::Add {
            id,
            price,
            quantity,
            side,
        }
    }

    pub fn update(id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self::Update { id, price, quantity }
    }

    pub fn cancel(id: OrderId) -> Self {
        Self::Cancel { id }
    }

    /// Id of the order the command targets
    pub fn order_id(&self) -> OrderId {
        match *self {
            Self::Add { id, .. } | Self::Update { id, .. } | Self::Cancel { id } => id,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add {
                id,
                price,
                quantity,
                side,
            } => write!(f, "add {side} {id} {quantity}@{price}"),
            Self::Update { id, price, quantity } => write!(f, "update {id} {quantity}@{price}"),
            Self::Cancel { id } => write!(f, "cancel {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id() {
        assert_eq!(Command::add(3, 10, 1, Side::Buy).order_id(), 3);
        assert_eq!(Command::update(4, 10, 1).order_id(), 4);
        assert_eq!(Command::cancel(5).order_id(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::add(1, 100, 10, Side::Sell).to_string(), "add SELL 1 10@100");
        assert_eq!(Command::update(2, 99, 0).to_string(), "update 2 0@99");
        assert_eq!(Command::cancel(3).to_string(), "cancel 3");
    }
}
