//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resting orders at a single price point.
//! The orders form an [`OrderList`] (FIFO, price-time priority); the actual
//! order data lives in the slab.
//!
//! `total_quantity` is maintained incrementally on every insertion, removal
//! and resize. It is never recomputed by scanning, and a negative value is an
//! invariant violation.

use slab::Slab;

use crate::error::{BookError, Result};
use crate::orderbook::list::{self, Iter};
use crate::orderbook::{Location, OrderList, OrderNode};
use crate::types::{Price, Quantity};

/// A price level containing orders at a single price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,

    /// Sum of the outstanding quantity of every resident order
    total_quantity: Quantity,

    orders: OrderList,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_quantity: 0,
            orders: OrderList::new(Location::Level),
        }
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    #[inline]
    pub fn set_price(&mut self, price: Price) {
        self.price = price;
    }

    #[inline]
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Number of resident orders
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Transfer an order from `from` to the tail of this level.
    ///
    /// Arrival order is time priority, so the order is matched after every
    /// order already resident here.
    pub fn add_order(
        &mut self,
        key: usize,
        from: &mut OrderList,
        slab: &mut Slab<OrderNode>,
    ) -> Result<()> {
        let quantity = list::node(slab, key)?.quantity();
        self.adjust_total(quantity)?;
        self.orders.transfer(key, from, slab)
    }

    /// Resize a resident order in place, keeping its queue position.
    pub fn update_order(
        &mut self,
        key: usize,
        new_quantity: Quantity,
        slab: &mut Slab<OrderNode>,
    ) -> Result<()> {
        let resident = list::node(slab, key)?;
        if resident.location != Location::Level || resident.price() != self.price {
            return Err(BookError::invariant(format!(
                "order {} resized through level {} it does not rest in",
                resident.order_id(),
                self.price
            )));
        }
        let delta = new_quantity - resident.quantity();
        self.adjust_total(delta)?;
        list::node_mut(slab, key)?.order.quantity = new_quantity;
        Ok(())
    }

    /// Evict an order from this level into `destination`.
    ///
    /// Returns the order's key, which is unchanged by the move.
    pub fn move_order(
        &mut self,
        key: usize,
        destination: &mut OrderList,
        slab: &mut Slab<OrderNode>,
    ) -> Result<usize> {
        let resident = list::node(slab, key)?;
        let quantity = resident.quantity();
        if quantity < 0 {
            return Err(BookError::invariant(format!(
                "order {} carries negative quantity {}",
                resident.order_id(),
                quantity
            )));
        }
        self.adjust_total(-quantity)?;
        destination.transfer(key, &mut self.orders, slab)?;

        if self.orders.is_empty() && self.total_quantity != 0 {
            return Err(BookError::invariant(format!(
                "level {} drained with residual quantity {}",
                self.price, self.total_quantity
            )));
        }
        Ok(key)
    }

    /// Key of the oldest resident order (highest time priority)
    pub fn best_order(&self) -> Result<usize> {
        self.orders
            .head()
            .ok_or(BookError::EmptyLevel { price: self.price })
    }

    /// Resident orders, oldest first
    pub fn orders<'a>(&self, slab: &'a Slab<OrderNode>) -> Iter<'a> {
        self.orders.iter(slab)
    }

    fn adjust_total(&mut self, delta: Quantity) -> Result<()> {
        let next = self.total_quantity.checked_add(delta).ok_or_else(|| {
            BookError::invariant(format!("level {} quantity overflow", self.price))
        })?;
        if next < 0 {
            return Err(BookError::invariant(format!(
                "level {} total quantity would go negative ({} + {})",
                self.price, self.total_quantity, delta
            )));
        }
        self.total_quantity = next;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
