//! Intrusive FIFO list of order handles.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Any order can be unlinked in O(1) using its slab key
//! - Transferring an order to another list relinks it; the `OrderNode`
//!   never moves inside the slab, so its key stays valid
//!
//! The list records a [`Location`] tag and stamps it on every node it
//! adopts, which lets the book check that each order has exactly one owner.

use slab::Slab;

use crate::error::{BookError, Result};
use crate::orderbook::{Location, OrderNode};
use crate::types::Order;

pub(crate) fn node<'a>(slab: &'a Slab<OrderNode>, key: usize) -> Result<&'a OrderNode> {
    slab.get(key)
        .ok_or_else(|| BookError::invariant(format!("dangling order handle {key}")))
}

pub(crate) fn node_mut<'a>(slab: &'a mut Slab<OrderNode>, key: usize) -> Result<&'a mut OrderNode> {
    slab.get_mut(key)
        .ok_or_else(|| BookError::invariant(format!("dangling order handle {key}")))
}

/// A doubly-linked list of slab keys.
#[derive(Debug, Clone)]
pub struct OrderList {
    location: Location,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl OrderList {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Oldest entry
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Newest entry
    #[inline]
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Append a detached node at the tail
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> Result<()> {
        let old_tail = self.tail;
        let adopted = node_mut(slab, key)?;
        if adopted.location != Location::Detached {
            return Err(BookError::invariant(format!(
                "order {} linked into {:?} while still owned by {:?}",
                adopted.order.id, self.location, adopted.location
            )));
        }
        adopted.prev = old_tail;
        adopted.next = None;
        adopted.location = self.location;

        match old_tail {
            Some(tail_key) => node_mut(slab, tail_key)?.next = Some(key),
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.len += 1;
        Ok(())
    }

    /// Unlink a node owned by this list, leaving it detached
    pub fn unlink(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> Result<()> {
        let target = node(slab, key)?;
        if target.location != self.location || self.len == 0 {
            return Err(BookError::invariant(format!(
                "order {} unlinked from {:?} but owned by {:?}",
                target.order.id, self.location, target.location
            )));
        }
        let prev_key = target.prev;
        let next_key = target.next;

        match prev_key {
            Some(prev) => node_mut(slab, prev)?.next = next_key,
            None => self.head = next_key,
        }
        match next_key {
            Some(next) => node_mut(slab, next)?.prev = prev_key,
            None => self.tail = prev_key,
        }

        let detached = node_mut(slab, key)?;
        detached.prev = None;
        detached.next = None;
        detached.location = Location::Detached;

        self.len -= 1;
        Ok(())
    }

    /// Move `key` from `from` to the tail of this list
    pub fn transfer(
        &mut self,
        key: usize,
        from: &mut OrderList,
        slab: &mut Slab<OrderNode>,
    ) -> Result<()> {
        from.unlink(key, slab)?;
        self.push_back(key, slab)
    }

    /// Iterate `(key, order)` pairs from head to tail
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> Iter<'a> {
        Iter {
            slab,
            cursor: self.head,
            remaining: self.len,
        }
    }
}

/// Iterator over an [`OrderList`], oldest first.
pub struct Iter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Order);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.cursor?;
        let slab = self.slab;
        let current = slab.get(key)?;
        self.cursor = current.next;
        self.remaining -= 1;
        Some((key, &current.order))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
