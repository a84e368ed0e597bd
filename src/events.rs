//! Structured events emitted by the order book.
//!
//! The book never writes diagnostics itself. Each state transition is described
//! by a [`BookEvent`] and handed to the [`EventSink`] the caller injected.
//! Events are delivered synchronously, in the order the transitions happen
//! inside the transaction.

use tracing::info;

use crate::types::{Fill, OrderId, OrderStatus, Price, Quantity, Side};

/// A single state transition inside a book transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    /// A new order entered staging
    OrderAccepted {
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    /// An open order was evicted for a price change and will be re-crossed
    OrderRepriced {
        id: OrderId,
        old_price: Price,
        new_price: Price,
        quantity: Quantity,
    },
    /// An open order was resized in place; queue position kept
    OrderResized {
        id: OrderId,
        old_quantity: Quantity,
        new_quantity: Quantity,
    },
    OrderCancelled { id: OrderId },
    Fill(Fill),
    OrderFilled { id: OrderId },
    /// Dispatch placed an open order in its level
    OrderRested {
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    /// Dispatch moved a terminal order to the archive
    OrderArchived { id: OrderId, status: OrderStatus },
    LevelCreated { side: Side, price: Price },
    LevelRemoved { side: Side, price: Price },
}

/// Receiver for book events.
pub trait EventSink {
    fn on_event(&mut self, event: &BookEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn on_event(&mut self, _event: &BookEvent) {}
}

/// Keeps every event in memory, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<BookEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BookEvent] {
        &self.events
    }

    /// Drain the recorded events
    pub fn take(&mut self) -> Vec<BookEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn on_event(&mut self, event: &BookEvent) {
        self.events.push(event.clone());
    }
}

/// Forwards every event to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&mut self, event: &BookEvent) {
        match event {
            BookEvent::Fill(fill) => info!(
                price = fill.price,
                quantity = fill.quantity,
                notional = %fill.notional(),
                side = %fill.aggressor_side,
                resting = fill.resting_order_id,
                aggressor = fill.aggressor_order_id,
                "fill"
            ),
            other => info!(event = ?other, "book event"),
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn on_event(&mut self, event: &BookEvent) {
        (**self).on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.on_event(&BookEvent::LevelCreated { side: Side::Buy, price: 10 });
        sink.on_event(&BookEvent::OrderCancelled { id: 4 });

        assert_eq!(
            sink.events(),
            &[
                BookEvent::LevelCreated { side: Side::Buy, price: 10 },
                BookEvent::OrderCancelled { id: 4 },
            ]
        );

        let drained = sink.take();
        assert_eq!(drained.len(), 2);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_tracing_sink_drives_a_book() {
        use crate::config::BookConfig;
        use crate::orderbook::OrderBook;
        use crate::types::Order;

        let mut book = OrderBook::with_sink(BookConfig::default(), TracingSink);
        book.add_order(Order::new(1, 100, 5, Side::Sell)).unwrap();
        book.add_order(Order::new(2, 100, 2, Side::Buy)).unwrap();

        assert_eq!(book.fills().len(), 1);
        assert_eq!(book.best_ask_level().unwrap().total_quantity(), 3);
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let mut boxed: Box<RecordingSink> = Box::default();
        boxed.on_event(&BookEvent::OrderFilled { id: 1 });
        assert_eq!(boxed.events().len(), 1);
    }
}
