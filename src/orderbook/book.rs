//! Limit order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Slab**: every order record ever accepted, never removed
//! - **BookSides**: bid/ask `BTreeMap`s of [`PriceLevel`]
//! - **HashMap**: order id to slab key
//! - **Staging / archive**: [`OrderList`]s threaded through the same slab
//!
//! An order is always linked into exactly one of: a price level, the staging
//! queue, the archive. Moving it relinks the node; the slab key handed to the
//! lookup table keeps pointing at the same record for the lifetime of the book,
//! including after the order is archived.
//!
//! ## Transactions
//!
//! Each public command stages the orders it touches, runs the crossing
//! algorithm while the aggressor is still in staging, then dispatches
//! everything staged to a level or the archive before returning. Input
//! errors are detected before any state transfer, so a rejected command
//! leaves the book untouched.
//!
//! ## Example
//!
//! ```
//! use lob_engine::{OrderBook, Order, Side};
//!
//! let mut book = OrderBook::new();
//! book.add_order(Order::new(1, 100, 10, Side::Sell)).unwrap();
//! book.add_order(Order::new(2, 100, 4, Side::Buy)).unwrap();
//!
//! assert_eq!(book.fills().len(), 1);
//! assert_eq!(book.best_ask(), Some(100));
//! assert_eq!(book.best_ask_level().unwrap().total_quantity(), 6);
//! ```

use std::collections::HashMap;

use slab::Slab;
use tracing::{debug, error, trace};

use crate::config::BookConfig;
use crate::error::{BookError, Result};
use crate::events::{BookEvent, EventSink, NullSink};
use crate::orderbook::list;
use crate::orderbook::{BookSides, Location, OrderList, OrderNode, PriceLevel};
use crate::types::{Fill, Order, OrderId, OrderStatus, Price, Quantity, Side};

/// Central limit order book.
#[derive(Debug)]
pub struct OrderBook<S: EventSink = NullSink> {
    /// Order arena; keys are stable handles
    pub(crate) orders: Slab<OrderNode>,

    pub(crate) sides: BookSides,

    /// Order id to slab key; entries are never removed
    pub(crate) lookup: HashMap<OrderId, usize>,

    /// Orders pending placement in the current transaction
    pub(crate) staging: OrderList,

    /// Terminal orders, oldest first
    pub(crate) archive: OrderList,

    /// Trade log
    pub(crate) fills: Vec<Fill>,

    pub(crate) sink: S,

    config: BookConfig,

    /// Set once a command hits an invariant violation
    faulted: bool,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book with the default configuration
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create a book with pre-allocated order capacity
    ///
    /// ```
    /// use lob_engine::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(BookConfig::default().with_order_capacity(order_capacity))
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self::with_sink(config, NullSink)
    }
}

impl<S: EventSink> OrderBook<S> {
    /// Create a book that reports every transition to `sink`
    pub fn with_sink(config: BookConfig, sink: S) -> Self {
        Self {
            orders: Slab::with_capacity(config.order_capacity),
            sides: BookSides::new(),
            lookup: HashMap::with_capacity(config.order_capacity),
            staging: OrderList::new(Location::Staging),
            archive: OrderList::new(Location::Archive),
            fills: Vec::with_capacity(config.fill_capacity),
            sink,
            config,
            faulted: false,
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Add a new order and match it against the opposing side.
    ///
    /// Whatever quantity is left after crossing rests at the order's price.
    pub fn add_order(&mut self, order: Order) -> Result<()> {
        self.ensure_healthy()?;
        debug!(id = order.id, side = %order.side, price = order.price, quantity = order.quantity, "add");
        let staged = self.stage_add(order);
        self.commit(staged)
    }

    /// Change the price and/or quantity of an open order.
    ///
    /// - `new_quantity == 0` cancels the order.
    /// - A price change forfeits time priority and re-crosses the order.
    /// - A quantity change at the same price keeps the queue position.
    pub fn update_order(&mut self, id: OrderId, new_price: Price, new_quantity: Quantity) -> Result<()> {
        self.ensure_healthy()?;
        debug!(id, price = new_price, quantity = new_quantity, "update");
        let staged = self.stage_update(id, new_price, new_quantity);
        self.commit(staged)
    }

    /// Cancel an open order
    pub fn cancel_order(&mut self, id: OrderId) -> Result<()> {
        self.ensure_healthy()?;
        debug!(id, "cancel");
        let staged = self.stage_cancel(id);
        self.commit(staged)
    }

    fn ensure_healthy(&self) -> Result<()> {
        if self.faulted {
            return Err(BookError::Faulted);
        }
        Ok(())
    }

    /// Finish a command: dispatch staging, optionally validate, and fault the
    /// book on any fatal error.
    fn commit(&mut self, staged: Result<()>) -> Result<()> {
        let mut outcome = staged.and_then(|()| self.dispatch());
        if outcome.is_ok() && self.config.check_invariants {
            outcome = self.validate();
        }
        if let Err(err) = &outcome {
            if err.is_fatal() {
                error!(error = %err, "order book faulted");
                self.faulted = true;
            }
        }
        outcome
    }

    fn stage_add(&mut self, mut order: Order) -> Result<()> {
        if order.quantity <= 0 {
            return Err(BookError::InvalidQuantity {
                id: order.id,
                quantity: order.quantity,
            });
        }
        if self.lookup.contains_key(&order.id) {
            return Err(BookError::DuplicateOrder(order.id));
        }
        self.check_headroom(order.id, order.side, order.price, order.quantity, order.quantity)?;

        order.status = OrderStatus::Open;
        let event = BookEvent::OrderAccepted {
            id: order.id,
            side: order.side,
            price: order.price,
            quantity: order.quantity,
        };
        let key = self.orders.insert(OrderNode::new(order));
        self.staging.push_back(key, &mut self.orders)?;
        self.sink.on_event(&event);

        self.cross(key)
    }

    fn stage_update(&mut self, id: OrderId, new_price: Price, new_quantity: Quantity) -> Result<()> {
        if new_quantity < 0 {
            return Err(BookError::InvalidQuantity { id, quantity: new_quantity });
        }
        let key = self.resolve_open(id)?;
        let resident = list::node(&self.orders, key)?;
        let (side, old_price, old_quantity) = (resident.side(), resident.price(), resident.quantity());
        if new_quantity > 0 {
            let delta = if new_price == old_price {
                new_quantity - old_quantity
            } else {
                new_quantity
            };
            self.check_headroom(id, side, new_price, delta, new_quantity)?;
        }

        let level = self.sides.get_mut(side, old_price).ok_or_else(|| {
            BookError::invariant(format!("open order {id} has no level at {old_price}"))
        })?;

        if new_quantity == 0 {
            level.update_order(key, 0, &mut self.orders)?;
            list::node_mut(&mut self.orders, key)?.order.status = OrderStatus::Cancelled;
            self.evict(key, side, old_price)?;
            self.sink.on_event(&BookEvent::OrderCancelled { id });
            return Ok(());
        }

        if new_price != old_price {
            level.update_order(key, new_quantity, &mut self.orders)?;
            self.evict(key, side, old_price)?;
            list::node_mut(&mut self.orders, key)?.order.price = new_price;
            self.sink.on_event(&BookEvent::OrderRepriced {
                id,
                old_price,
                new_price,
                quantity: new_quantity,
            });
            return self.cross(key);
        }

        level.update_order(key, new_quantity, &mut self.orders)?;
        self.sink.on_event(&BookEvent::OrderResized {
            id,
            old_quantity,
            new_quantity,
        });
        Ok(())
    }

    fn stage_cancel(&mut self, id: OrderId) -> Result<()> {
        let key = self.resolve_open(id)?;
        let resident = list::node_mut(&mut self.orders, key)?;
        let (side, price) = (resident.side(), resident.price());
        resident.order.status = OrderStatus::Cancelled;
        self.evict(key, side, price)?;
        self.sink.on_event(&BookEvent::OrderCancelled { id });
        Ok(())
    }

    /// Reject a command whose quantity would push the level total at
    /// `(side, price)` past `Quantity::MAX`
    fn check_headroom(
        &self,
        id: OrderId,
        side: Side,
        price: Price,
        delta: Quantity,
        requested: Quantity,
    ) -> Result<()> {
        let total = self.sides.get(side, price).map_or(0, PriceLevel::total_quantity);
        if total.checked_add(delta).is_none() {
            return Err(BookError::InvalidQuantity { id, quantity: requested });
        }
        Ok(())
    }

    /// Slab key of an open, resting order
    fn resolve_open(&self, id: OrderId) -> Result<usize> {
        let key = *self.lookup.get(&id).ok_or(BookError::UnknownOrder(id))?;
        let found = list::node(&self.orders, key)?;
        if !found.order.is_open() {
            return Err(BookError::OrderNotOpen {
                id,
                status: found.status(),
            });
        }
        if found.location != Location::Level {
            return Err(BookError::invariant(format!(
                "open order {id} found in {:?} between commands",
                found.location
            )));
        }
        Ok(key)
    }

    /// Move a resting order into staging, removing its level if that drained it.
    ///
    /// Returns `true` when the level was removed.
    pub(crate) fn evict(&mut self, key: usize, side: Side, price: Price) -> Result<bool> {
        let level = self.sides.get_mut(side, price).ok_or_else(|| {
            BookError::invariant(format!("no {side} level at {price} to evict from"))
        })?;
        level.move_order(key, &mut self.staging, &mut self.orders)?;
        if !level.is_empty() {
            return Ok(false);
        }
        self.sides.remove(side, price);
        trace!(%side, price, "level removed");
        self.sink.on_event(&BookEvent::LevelRemoved { side, price });
        Ok(true)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Best bid price (highest buy price)
    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.sides.best_price(Side::Buy)
    }

    /// Best ask price (lowest sell price)
    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.sides.best_price(Side::Sell)
    }

    /// Best ask minus best bid, or None if either side is empty or the
    /// difference does not fit in a `Price`
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask.checked_sub(bid),
            _ => None,
        }
    }

    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.sides.best(Side::Buy)
    }

    pub fn best_ask_level(&self) -> Option<&PriceLevel> {
        self.sides.best(Side::Sell)
    }

    pub fn level(&self, side: Side, price: Price) -> Option<&PriceLevel> {
        self.sides.get(side, price)
    }

    /// Resident orders of the level at `(side, price)`, oldest first
    pub fn level_orders(&self, side: Side, price: Price) -> Vec<&Order> {
        self.sides
            .get(side, price)
            .map(|level| level.orders(&self.orders).map(|(_, order)| order).collect())
            .unwrap_or_default()
    }

    /// Levels on `side` from best to worst
    pub fn levels(&self, side: Side) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.sides.levels(side)
    }

    pub fn level_count(&self, side: Side) -> usize {
        self.sides.level_count(side)
    }

    /// Current record of an order, wherever it lives
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        let key = *self.lookup.get(&id)?;
        self.orders.get(key).map(|node| &node.order)
    }

    /// Fill log, oldest first
    #[inline]
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Terminal orders, in archival order
    pub fn archive(&self) -> impl Iterator<Item = &Order> + '_ {
        self.archive.iter(&self.orders).map(|(_, order)| order)
    }

    #[inline]
    pub fn archive_len(&self) -> usize {
        self.archive.len()
    }

    /// Number of open orders resting in levels
    pub fn resting_count(&self) -> usize {
        self.orders.len() - self.archive.len() - self.staging.len()
    }

    /// Arena capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    #[inline]
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
