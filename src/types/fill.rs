//! Fill type representing an executed match between two orders.

use std::fmt;

use crate::types::{OrderId, Price, Quantity, Side};

/// A fill records one trade between a resting order and an aggressor.
///
/// ## Terminology
///
/// - **Resting**: the order that was already in the book
/// - **Aggressor**: the order being added or re-priced that triggered the match
///
/// ## Price Discovery
///
/// The fill always executes at the resting order's price.
///
/// ## Example
///
/// ```
/// use lob_engine::types::{Fill, Side};
///
/// let fill = Fill::new(100, 5, Side::Buy, 1, 2);
/// assert_eq!(fill.notional(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fill {
    /// Execution price (the resting order's price)
    pub price: Price,

    /// Executed quantity
    pub quantity: Quantity,

    /// Side of the aggressor order
    pub aggressor_side: Side,

    /// ID of the resting order
    pub resting_order_id: OrderId,

    /// ID of the aggressor order
    pub aggressor_order_id: OrderId,
}

impl Fill {
    pub fn new(
        price: Price,
        quantity: Quantity,
        aggressor_side: Side,
        resting_order_id: OrderId,
        aggressor_order_id: OrderId,
    ) -> Self {
        Self {
            price,
            quantity,
            aggressor_side,
            resting_order_id,
            aggressor_order_id,
        }
    }

    /// Notional value of this fill (price * quantity)
    pub fn notional(&self) -> i128 {
        (self.price as i128) * (self.quantity as i128)
    }

    /// Canonical little-endian encoding, used for the book's state root
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.price.to_le_bytes());
        out.extend_from_slice(&self.quantity.to_le_bytes());
        out.push(self.aggressor_side.to_u8());
        out.extend_from_slice(&self.resting_order_id.to_le_bytes());
        out.extend_from_slice(&self.aggressor_order_id.to_le_bytes());
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(px:{},amt:{},side:{},book_id:{},new_id:{})",
            self.price,
            self.quantity,
            self.aggressor_side,
            self.resting_order_id,
            self.aggressor_order_id
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_new() {
        let fill = Fill::new(100, 5, Side::Sell, 1, 2);

        assert_eq!(fill.price, 100);
        assert_eq!(fill.quantity, 5);
        assert_eq!(fill.aggressor_side, Side::Sell);
        assert_eq!(fill.resting_order_id, 1);
        assert_eq!(fill.aggressor_order_id, 2);
    }

    #[test]
    fn test_fill_notional_negative_price() {
        let fill = Fill::new(-3, 4, Side::Buy, 1, 2);
        assert_eq!(fill.notional(), -12);
    }

    #[test]
    fn test_fill_encoding_size() {
        let mut bytes = Vec::new();
        Fill::new(100, 5, Side::Buy, 1, 2).encode(&mut bytes);

        // price + quantity + side + two ids
        assert_eq!(bytes.len(), 8 + 8 + 1 + 8 + 8);
    }

    #[test]
    fn test_fill_display() {
        let fill = Fill::new(100, 5, Side::Buy, 1, 2);
        assert_eq!(fill.to_string(), "(px:100,amt:5,side:BUY,book_id:1,new_id:2)");
    }
}
