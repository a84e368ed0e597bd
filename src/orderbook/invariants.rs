//! Structural validation of the book between commands.
//!
//! Checked:
//!
//! 1. Every resident level is non-empty and its `total_quantity` equals the
//!    sum of its residents' quantities.
//! 2. Level keys are strictly ordered (bids descending, asks ascending) and
//!    every resident order is open, on the level's side and at its price.
//! 3. Every order in the arena is owned by exactly one of a level or the
//!    archive; staging is empty.
//! 4. The best bid is strictly below the best ask.
//! 5. Every lookup entry points at the record for that id.

use crate::error::{BookError, Result};
use crate::events::EventSink;
use crate::orderbook::{Location, OrderBook};
use crate::types::{Price, Side};

impl<S: EventSink> OrderBook<S> {
    /// Check every invariant, returning the first breach found
    pub fn validate(&self) -> Result<()> {
        let mut resident = 0usize;

        for side in [Side::Buy, Side::Sell] {
            let mut previous: Option<Price> = None;
            for level in self.sides.levels(side) {
                let price = level.price();
                if level.is_empty() {
                    return Err(BookError::invariant(format!("empty {side} level {price} in book")));
                }
                if let Some(prev) = previous {
                    let ordered = match side {
                        Side::Buy => price < prev,
                        Side::Sell => price > prev,
                    };
                    if !ordered {
                        return Err(BookError::invariant(format!(
                            "{side} level {price} out of order after {prev}"
                        )));
                    }
                }
                previous = Some(price);

                let mut sum = 0;
                let mut count = 0;
                for (key, order) in level.orders(&self.orders) {
                    let location = self.orders.get(key).map(|node| node.location);
                    if location != Some(Location::Level)
                        || order.side != side
                        || order.price != price
                        || !order.is_open()
                        || order.quantity <= 0
                    {
                        return Err(BookError::invariant(format!(
                            "order {order} does not belong in {side} level {price}"
                        )));
                    }
                    sum += order.quantity;
                    count += 1;
                }
                if count != level.len() {
                    return Err(BookError::invariant(format!(
                        "{side} level {price} links {count} orders but counts {}",
                        level.len()
                    )));
                }
                if sum != level.total_quantity() {
                    return Err(BookError::invariant(format!(
                        "{side} level {price} total {} but residents sum to {sum}",
                        level.total_quantity()
                    )));
                }
                resident += count;
            }
        }

        if !self.staging.is_empty() {
            return Err(BookError::invariant(format!(
                "{} orders left in staging",
                self.staging.len()
            )));
        }

        let mut archived = 0usize;
        let mut last = None;
        for (key, order) in self.archive.iter(&self.orders) {
            let location = self.orders.get(key).map(|node| node.location);
            if location != Some(Location::Archive) || !order.status.is_terminal() {
                return Err(BookError::invariant(format!("order {order} misfiled in archive")));
            }
            archived += 1;
            last = Some(key);
        }
        if archived != self.archive.len() || last != self.archive.tail() {
            return Err(BookError::invariant("archive link count mismatch"));
        }

        if resident + archived != self.orders.len() {
            return Err(BookError::invariant(format!(
                "{} orders stored but {resident} resting and {archived} archived",
                self.orders.len()
            )));
        }

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(BookError::invariant(format!(
                    "book left crossed: bid {bid} >= ask {ask}"
                )));
            }
        }

        for (&id, &key) in &self.lookup {
            match self.orders.get(key) {
                Some(node) if node.order.id == id => {}
                _ => {
                    return Err(BookError::invariant(format!(
                        "lookup entry for {id} points at a different record"
                    )))
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::orderbook::OrderBook;
    use crate::types::{Order, Side};

    #[test]
    fn test_validate_after_activity() {
        let mut book = OrderBook::new();
        book.add_order(Order::new(1, 100, 5, Side::Sell)).unwrap();
        book.add_order(Order::new(2, 99, 5, Side::Buy)).unwrap();
        book.add_order(Order::new(3, 100, 2, Side::Buy)).unwrap();
        book.cancel_order(2).unwrap();

        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_drifted_total() {
        let mut book = OrderBook::new();
        book.add_order(Order::new(1, 100, 5, Side::Sell)).unwrap();

        let key = book.lookup[&1];
        book.orders.get_mut(key).unwrap().order.quantity = 6;

        assert!(book.validate().unwrap_err().is_fatal());
    }

    #[test]
    fn test_validate_detects_stray_staging() {
        let mut book = OrderBook::new();
        book.add_order(Order::new(1, 100, 5, Side::Sell)).unwrap();

        let key = book.lookup[&1];
        book.evict(key, Side::Sell, 100).unwrap();

        assert!(book.validate().is_err());
    }
}
