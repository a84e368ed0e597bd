//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers. Every
//! container in the book (price level queues, the staging queue, the
//! archive) is an [`OrderList`](crate::orderbook::OrderList) threaded through
//! these pointers, so moving an order between containers only relinks it.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - A key stays valid until `slab.remove()` is called on it
//!
//! The book never removes entries: terminal orders stay in the slab, linked
//! into the archive. A key handed out for an order is therefore valid for the
//! whole lifetime of the book.

use crate::types::{Order, OrderId, OrderStatus, Price, Quantity, Side};

/// Which container currently owns a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    /// Not linked into any list
    #[default]
    Detached,
    /// Pending placement in the current transaction
    Staging,
    /// Resting in the price level for the order's side and price
    Level,
    /// Terminal, kept for audit and lookup
    Archive,
}

/// Order node stored in the slab.
///
/// Contains the order data plus linked-list pointers for whichever list owns
/// it. The pointers are slab keys (`usize`), not direct references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The actual order data
    pub order: Order,

    /// Next order in the owning list (slab key)
    /// None if this is the tail (newest order)
    pub next: Option<usize>,

    /// Previous order in the owning list (slab key)
    /// None if this is the head (oldest order)
    pub prev: Option<usize>,

    /// Owning container, maintained by `OrderList`
    pub location: Location,
}

impl OrderNode {
    /// Create a new, detached order node
    ///
    /// # Example
    ///
    /// ```
    /// use lob_engine::orderbook::{Location, OrderNode};
    /// use lob_engine::types::{Order, Side};
    ///
    /// let node = OrderNode::new(Order::new(1, 100, 10, Side::Buy));
    ///
    /// assert!(node.next.is_none());
    /// assert!(node.prev.is_none());
    /// assert_eq!(node.location, Location::Detached);
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
            location: Location::Detached,
        }
    }

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order.id
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.order.price
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.order.quantity
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.order.side
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.order.status
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_node_new() {
        let order = Order::new(1, 100, 10, Side::Sell);
        let node = OrderNode::new(order.clone());

        assert_eq!(node.order, order);
        assert!(node.next.is_none());
        assert!(node.prev.is_none());
        assert_eq!(node.location, Location::Detached);
    }

    #[test]
    fn test_order_node_accessors() {
        let node = OrderNode::new(Order::new(42, -5, 30, Side::Buy));

        assert_eq!(node.order_id(), 42);
        assert_eq!(node.price(), -5);
        assert_eq!(node.quantity(), 30);
        assert_eq!(node.side(), Side::Buy);
        assert_eq!(node.status(), OrderStatus::Open);
    }
}
