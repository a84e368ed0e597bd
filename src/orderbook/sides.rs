//! The two price-ordered sides of the book.
//!
//! - **Bids** (buy orders): `BTreeMap<Reverse<Price>, _>`, best bid first
//! - **Asks** (sell orders): `BTreeMap<Price, _>`, best ask first
//!
//! Keeping both maps in one struct lets the book borrow the sides and the
//! order slab independently.

use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::orderbook::PriceLevel;
use crate::types::{Price, Side};

#[derive(Debug, Clone, Default)]
pub struct BookSides {
    bids: BTreeMap<Reverse<Price>, PriceLevel>,
    asks: BTreeMap<Price, PriceLevel>,
}

impl BookSides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side, price: Price) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.get(&Reverse(price)),
            Side::Sell => self.asks.get(&price),
        }
    }

    pub fn get_mut(&mut self, side: Side, price: Price) -> Option<&mut PriceLevel> {
        match side {
            Side::Buy => self.bids.get_mut(&Reverse(price)),
            Side::Sell => self.asks.get_mut(&price),
        }
    }

    /// Best level on `side`: highest bid or lowest ask
    pub fn best(&self, side: Side) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.values().next(),
            Side::Sell => self.asks.values().next(),
        }
    }

    pub fn best_mut(&mut self, side: Side) -> Option<&mut PriceLevel> {
        match side {
            Side::Buy => self.bids.values_mut().next(),
            Side::Sell => self.asks.values_mut().next(),
        }
    }

    #[inline]
    pub fn best_price(&self, side: Side) -> Option<Price> {
        self.best(side).map(PriceLevel::price)
    }

    /// Level at `(side, price)`, creating an empty one if absent.
    ///
    /// The flag is `true` when the level was created by this call.
    pub fn get_or_create(&mut self, side: Side, price: Price) -> (&mut PriceLevel, bool) {
        match side {
            Side::Buy => match self.bids.entry(Reverse(price)) {
                Entry::Occupied(slot) => (slot.into_mut(), false),
                Entry::Vacant(slot) => (slot.insert(PriceLevel::new(price)), true),
            },
            Side::Sell => match self.asks.entry(price) {
                Entry::Occupied(slot) => (slot.into_mut(), false),
                Entry::Vacant(slot) => (slot.insert(PriceLevel::new(price)), true),
            },
        }
    }

    pub fn remove(&mut self, side: Side, price: Price) -> Option<PriceLevel> {
        match side {
            Side::Buy => self.bids.remove(&Reverse(price)),
            Side::Sell => self.asks.remove(&price),
        }
    }

    /// Levels on `side` from best to worst
    pub fn levels(&self, side: Side) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match side {
            Side::Buy => Box::new(self.bids.values()),
            Side::Sell => Box::new(self.asks.values()),
        }
    }

    pub fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bids.len(),
            Side::Sell => self.asks.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_ask_ordering() {
        let mut sides = BookSides::new();
        for price in [99, 101, 100] {
            sides.get_or_create(Side::Buy, price);
            sides.get_or_create(Side::Sell, price);
        }

        assert_eq!(sides.best_price(Side::Buy), Some(101));
        assert_eq!(sides.best_price(Side::Sell), Some(99));

        let bids: Vec<Price> = sides.levels(Side::Buy).map(PriceLevel::price).collect();
        let asks: Vec<Price> = sides.levels(Side::Sell).map(PriceLevel::price).collect();
        assert_eq!(bids, vec![101, 100, 99]);
        assert_eq!(asks, vec![99, 100, 101]);
    }

    #[test]
    fn test_get_or_create_reports_creation() {
        let mut sides = BookSides::new();

        let (level, created) = sides.get_or_create(Side::Sell, 100);
        assert!(created);
        assert_eq!(level.price(), 100);
        assert_eq!(level.total_quantity(), 0);

        let (_, created) = sides.get_or_create(Side::Sell, 100);
        assert!(!created);
        assert_eq!(sides.level_count(Side::Sell), 1);
        assert_eq!(sides.level_count(Side::Buy), 0);
    }

    #[test]
    fn test_remove_level() {
        let mut sides = BookSides::new();
        sides.get_or_create(Side::Buy, 100);
        sides.get_or_create(Side::Buy, 98);

        assert!(sides.remove(Side::Buy, 100).is_some());
        assert_eq!(sides.best_price(Side::Buy), Some(98));
        assert!(sides.remove(Side::Buy, 100).is_none());
        assert!(sides.get(Side::Buy, 98).is_some());
    }
}
