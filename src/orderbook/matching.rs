//! Crossing and dispatch.
//!
//! ## Matching Rules
//!
//! - **Buy** aggressors match against asks (lowest price first)
//! - **Sell** aggressors match against bids (highest price first)
//! - Within a level, the oldest order matches first
//! - Fills execute at the resting order's price
//!
//! ## Dispatch
//!
//! After crossing, every order left in staging is committed in FIFO order:
//! terminal orders go to the archive, open orders to the level for their
//! side and price. A level is created here, explicitly, on first use.

use tracing::{debug, trace};

use crate::error::{BookError, Result};
use crate::events::{BookEvent, EventSink};
use crate::orderbook::list;
use crate::orderbook::OrderBook;
use crate::types::{Fill, OrderStatus};

impl<S: EventSink> OrderBook<S> {
    /// Match the staged order at `aggressor` against the opposing side.
    pub(crate) fn cross(&mut self, aggressor: usize) -> Result<()> {
        let opposing = list::node(&self.orders, aggressor)?.side().opposite();

        while let Some(level) = self.sides.best_mut(opposing) {
            let level_price = level.price();
            let resting = level.best_order().map_err(|_| {
                BookError::invariant(format!("empty {opposing} level {level_price} left in book"))
            })?;

            let taker = list::node(&self.orders, aggressor)?.order.clone();
            let maker = list::node(&self.orders, resting)?.order.clone();
            if !taker.crosses(&maker) {
                break;
            }

            let quantity = taker.quantity.min(maker.quantity);
            let fill = Fill::new(maker.price, quantity, taker.side, maker.id, taker.id);
            let maker_left = maker.quantity - quantity;
            let taker_left = taker.quantity - quantity;

            level.update_order(resting, maker_left, &mut self.orders)?;
            list::node_mut(&mut self.orders, aggressor)?.order.quantity = taker_left;
            self.fills.push(fill);
            debug!(
                price = fill.price,
                quantity,
                resting = maker.id,
                aggressor = taker.id,
                "fill"
            );
            self.sink.on_event(&BookEvent::Fill(fill));

            if maker_left == 0 {
                list::node_mut(&mut self.orders, resting)?.order.status = OrderStatus::Filled;
                self.sink.on_event(&BookEvent::OrderFilled { id: maker.id });
                // A drained level is gone; the next pass picks the next-best one
                self.evict(resting, opposing, level_price)?;
            }

            if taker_left == 0 {
                list::node_mut(&mut self.orders, aggressor)?.order.status = OrderStatus::Filled;
                self.sink.on_event(&BookEvent::OrderFilled { id: taker.id });
                break;
            }
        }
        Ok(())
    }

    /// Commit every staged order to its permanent home.
    pub(crate) fn dispatch(&mut self) -> Result<()> {
        let mut previous_head = None;

        while let Some(head) = self.staging.head() {
            if previous_head == Some(head) {
                return Err(BookError::invariant(format!(
                    "dispatch made no progress on staged handle {head}"
                )));
            }
            previous_head = Some(head);

            let staged = list::node(&self.orders, head)?.order.clone();

            if staged.status.is_terminal() {
                self.archive.transfer(head, &mut self.staging, &mut self.orders)?;
                self.lookup.insert(staged.id, head);
                trace!(id = staged.id, status = %staged.status, "archived");
                self.sink.on_event(&BookEvent::OrderArchived {
                    id: staged.id,
                    status: staged.status,
                });
                continue;
            }

            if staged.quantity <= 0 {
                return Err(BookError::invariant(format!(
                    "open order {} staged with quantity {}",
                    staged.id, staged.quantity
                )));
            }

            let (level, created) = self.sides.get_or_create(staged.side, staged.price);
            if created {
                trace!(side = %staged.side, price = staged.price, "level created");
                self.sink.on_event(&BookEvent::LevelCreated {
                    side: staged.side,
                    price: staged.price,
                });
            }
            level.add_order(head, &mut self.staging, &mut self.orders)?;
            self.lookup.insert(staged.id, head);
            self.sink.on_event(&BookEvent::OrderRested {
                id: staged.id,
                side: staged.side,
                price: staged.price,
                quantity: staged.quantity,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
