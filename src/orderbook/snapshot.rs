//! Structural dumps of the book: snapshots, the state root and the text dump.

use std::fmt;

use crate::events::EventSink;
use crate::orderbook::{OrderBook, PriceLevel};
use crate::types::{ExecutionReceipt, Fill, Order, Price, Quantity, Side};

/// One price level with its resident orders, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub price: Price,
    pub total_quantity: Quantity,
    pub orders: Vec<Order>,
}

/// Owned copy of the whole book between commands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookSnapshot {
    /// Best bid first
    pub bids: Vec<LevelSnapshot>,
    /// Best ask first
    pub asks: Vec<LevelSnapshot>,
    pub archive: Vec<Order>,
    pub fills: Vec<Fill>,
}

impl<S: EventSink> OrderBook<S> {
    fn level_snapshot(&self, level: &PriceLevel) -> LevelSnapshot {
        LevelSnapshot {
            price: level.price(),
            total_quantity: level.total_quantity(),
            orders: level.orders(&self.orders).map(|(_, o)| o.clone()).collect(),
        }
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.levels(Side::Buy).map(|l| self.level_snapshot(l)).collect(),
            asks: self.levels(Side::Sell).map(|l| self.level_snapshot(l)).collect(),
            archive: self.archive().cloned().collect(),
            fills: self.fills.clone(),
        }
    }

    /// SHA-256 over the canonical encoding of levels, archive and fill log.
    ///
    /// Identical command streams yield identical roots.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut bytes = Vec::with_capacity(64 * (self.orders.len() + self.fills.len()));

        for side in [Side::Buy, Side::Sell] {
            bytes.push(side.to_u8());
            bytes.extend_from_slice(&(self.level_count(side) as u64).to_le_bytes());
            for level in self.levels(side) {
                bytes.extend_from_slice(&level.price().to_le_bytes());
                bytes.extend_from_slice(&level.total_quantity().to_le_bytes());
                bytes.extend_from_slice(&(level.len() as u64).to_le_bytes());
                for (_, order) in level.orders(&self.orders) {
                    bytes.extend_from_slice(&order.id.to_le_bytes());
                    bytes.extend_from_slice(&order.quantity.to_le_bytes());
                }
            }
        }

        bytes.extend_from_slice(&(self.archive_len() as u64).to_le_bytes());
        for order in self.archive() {
            bytes.extend_from_slice(&order.id.to_le_bytes());
            bytes.extend_from_slice(&order.price.to_le_bytes());
            bytes.extend_from_slice(&order.quantity.to_le_bytes());
            bytes.push(order.side.to_u8());
            bytes.push(order.status.to_u8());
        }

        bytes.extend_from_slice(&(self.fills.len() as u64).to_le_bytes());
        for fill in &self.fills {
            fill.encode(&mut bytes);
        }

        ExecutionReceipt::compute_hash(&bytes)
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.compute_state_root())
    }
}

impl<S: EventSink> fmt::Display for OrderBook<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Book:")?;
        for (label, side) in [("bids", Side::Buy), ("asks", Side::Sell)] {
            writeln!(f, "{label}:{{")?;
            for level in self.levels(side) {
                write!(f, "{},sz:{},{{", level.price(), level.total_quantity())?;
                for (_, order) in level.orders(&self.orders) {
                    write!(f, "{order},")?;
                }
                writeln!(f, "}},")?;
            }
            writeln!(f, "}}")?;
        }
        write!(f, "dones: {{")?;
        for order in self.archive() {
            write!(f, "{order},")?;
        }
        writeln!(f, "}}")?;
        write!(f, "fills:{{")?;
        for fill in &self.fills {
            write!(f, "{fill},")?;
        }
        writeln!(f, "}}")
    }
}
