//! Command executor over a single [`OrderBook`].

use tracing::{debug, warn};

use crate::config::BookConfig;
use crate::engine::Command;
use crate::error::Result;
use crate::events::{EventSink, NullSink};
use crate::orderbook::OrderBook;
use crate::types::{ExecutionReceipt, Order};

/// Applies [`Command`]s to a book and issues one receipt per committed command.
#[derive(Debug)]
pub struct MatchingEngine<S: EventSink = NullSink> {
    book: OrderBook<S>,
    /// Committed commands so far
    sequence: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::from_book(OrderBook::new())
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self::from_book(OrderBook::with_config(config))
    }
}

impl<S: EventSink> MatchingEngine<S> {
    pub fn from_book(book: OrderBook<S>) -> Self {
        Self { book, sequence: 0 }
    }

    /// Execute one command.
    ///
    /// A rejected command leaves the book and the sequence number unchanged.
    pub fn execute(&mut self, command: Command) -> Result<ExecutionReceipt> {
        let fills_before = self.book.fills().len();
        let archived_before = self.book.archive_len();

        match command {
            Command::Add {
                id,
                price,
                quantity,
                side,
            } => self.book.add_order(Order::new(id, price, quantity, side))?,
            Command::Update { id, price, quantity } => {
                self.book.update_order(id, price, quantity)?
            }
            Command::Cancel { id } => self.book.cancel_order(id)?,
        }

        self.sequence += 1;
        let receipt = ExecutionReceipt::new(
            self.sequence,
            self.book.fills().len() - fills_before,
            self.book.archive_len() - archived_before,
            self.book.compute_state_root(),
        );
        debug!(
            sequence = receipt.sequence,
            fills = receipt.fills_emitted,
            archived = receipt.orders_archived,
            "command committed"
        );
        Ok(receipt)
    }

    /// Execute a stream of commands in order.
    ///
    /// Recoverable rejections are logged and skipped. The first fatal error
    /// stops the batch and is returned.
    pub fn run_batch<I>(&mut self, commands: I) -> Result<Vec<ExecutionReceipt>>
    where
        I: IntoIterator<Item = Command>,
    {
        let mut receipts = Vec::new();
        for command in commands {
            match self.execute(command) {
                Ok(receipt) => receipts.push(receipt),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => warn!(id = command.order_id(), %command, error = %err, "command rejected"),
            }
        }
        Ok(receipts)
    }

    #[inline]
    pub fn book(&self) -> &OrderBook<S> {
        &self.book
    }

    #[inline]
    pub fn book_mut(&mut self) -> &mut OrderBook<S> {
        &mut self.book
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
