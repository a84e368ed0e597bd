//! Order types for the matching engine.
//!
//! An [`Order`] is a plain value record. It has no behavior beyond a few
//! accessors; every state transition is driven by the order book.

use std::fmt;

use crate::types::{OrderId, Price, Quantity};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the asset
    #[default]
    Buy,
    /// Sell order (ask) - wants to sell the asset
    Sell,
}

impl Side {
    /// Convert to u8 for canonical encoding
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Lifecycle status of an order.
///
/// `Cancelled` and `Filled` are terminal: an order in either state lives in
/// the archive and is never mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Open,
    Cancelled,
    Filled,
}

impl OrderStatus {
    /// Convert to u8 for canonical encoding
    pub fn to_u8(self) -> u8 {
        match self {
            OrderStatus::Open => 0,
            OrderStatus::Cancelled => 1,
            OrderStatus::Filled => 2,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Open)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Open => f.write_str("OPEN"),
            OrderStatus::Cancelled => f.write_str("CANCELLED"),
            OrderStatus::Filled => f.write_str("FILLED"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// ## Example
///
/// ```
/// use lob_engine::types::{Order, OrderStatus, Side};
///
/// let order = Order::new(1, 100, 10, Side::Sell);
/// assert_eq!(order.status, OrderStatus::Open);
/// assert!(order.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Order {
    /// Caller-assigned order identifier
    pub id: OrderId,

    /// Limit price in ticks
    pub price: Price,

    /// Outstanding quantity, reduced as the order trades
    pub quantity: Quantity,

    /// Buy or Sell
    pub side: Side,

    /// Lifecycle status
    pub status: OrderStatus,
}

impl Order {
    /// Create a new open limit order
    pub fn new(id: OrderId, price: Price, quantity: Quantity, side: Side) -> Self {
        Self {
            id,
            price,
            quantity,
            side,
            status: OrderStatus::Open,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Whether this order and `other` can trade against each other.
    ///
    /// `self` is the aggressor: a buy crosses when its price is at or above
    /// the resting price, a sell when at or below.
    pub fn crosses(&self, other: &Order) -> bool {
        if self.side == other.side {
            return false;
        }
        match self.side {
            Side::Buy => self.price >= other.price,
            Side::Sell => self.price <= other.price,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(id:{},px:{},amt:{},side:{},status:{})",
            self.id, self.price, self.quantity, self.side, self.status
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
    fn test_side_conversion() {
        assert_eq!(Side::Buy.to_u8(), 0);
        assert_eq!(Side::Sell.to_u8(), 1);
        assert_eq!(Side::from_u8(0), Some(Side::Buy));
        assert_eq!(Side::from_u8(1), Some(Side::Sell));
        assert_eq!(Side::from_u8(2), None);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_new_is_open() {
        let order = Order::new(7, 101, 20, Side::Buy);

        assert_eq!(order.id, 7);
        assert_eq!(order.price, 101);
        assert_eq!(order.quantity, 20);
        assert_eq!(order.side, Side::Buy);
        assert!(order.is_open());
        assert!(!order.status.is_terminal());
    }

    #[test]
    fn test_status_terminal() {
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Filled.is_terminal());
        assert!(!OrderStatus::Open.is_terminal());
    }

    #[test]
    fn test_crosses() {
        let buy = Order::new(1, 100, 10, Side::Buy);
        let sell_at = Order::new(2, 100, 10, Side::Sell);
        let sell_above = Order::new(3, 101, 10, Side::Sell);
        let sell_below = Order::new(4, 99, 10, Side::Sell);

        assert!(buy.crosses(&sell_at));
        assert!(buy.crosses(&sell_below));
        assert!(!buy.crosses(&sell_above));

        assert!(sell_at.crosses(&buy));
        assert!(sell_below.crosses(&buy));
        assert!(!sell_above.crosses(&buy));
    }

    #[test]
    fn test_same_side_never_crosses() {
        let a = Order::new(1, 100, 10, Side::Buy);
        let b = Order::new(2, 90, 10, Side::Buy);
        assert!(!a.crosses(&b));
        assert!(!b.crosses(&a));
    }

    #[test]
    fn test_order_display() {
        let order = Order::new(3, 101, 20, Side::Sell);
        assert_eq!(order.to_string(), "(id:3,px:101,amt:20,side:SELL,status:OPEN)");
    }
}
