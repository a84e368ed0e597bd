//! Property tests over arbitrary command sequences.

use proptest::prelude::*;

use lob_engine::{BookConfig, Command, MatchingEngine, Order, OrderBook, Side};

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

/// Commands over a small id and price space so updates and cancels hit
fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (1u64..40, 90i64..110, 1i64..50, side_strategy())
            .prop_map(|(id, price, quantity, side)| Command::add(id, price, quantity, side)),
        2 => (1u64..40, 90i64..110, 0i64..50)
            .prop_map(|(id, price, quantity)| Command::update(id, price, quantity)),
        1 => (1u64..40).prop_map(Command::cancel),
    ]
}

fn apply(book: &mut OrderBook, command: Command) -> lob_engine::Result<()> {
    match command {
        Command::Add {
            id,
            price,
            quantity,
            side,
        } => book.add_order(Order::new(id, price, quantity, side)),
        Command::Update { id, price, quantity } => book.update_order(id, price, quantity),
        Command::Cancel { id } => book.cancel_order(id),
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_command(commands in prop::collection::vec(command_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        for command in commands {
            let before = book.snapshot();
            match apply(&mut book, command) {
                Ok(()) => {}
                Err(err) => {
                    prop_assert!(!err.is_fatal(), "{command} faulted: {err}");
                    prop_assert_eq!(&book.snapshot(), &before);
                }
            }
            prop_assert!(book.validate().is_ok(), "{:?}", book.validate());
        }
    }

    #[test]
    fn levels_sum_their_residents(commands in prop::collection::vec(command_strategy(), 1..200)) {
        let mut book = OrderBook::with_config(BookConfig::default().with_invariant_checks(true));
        for command in commands {
            let _ = apply(&mut book, command);
        }

        let snapshot = book.snapshot();
        for level in snapshot.bids.iter().chain(snapshot.asks.iter()) {
            prop_assert!(!level.orders.is_empty());
            let sum: i64 = level.orders.iter().map(|o| o.quantity).sum();
            prop_assert_eq!(sum, level.total_quantity);
        }
        prop_assert!(snapshot.bids.windows(2).all(|w| w[0].price > w[1].price));
        prop_assert!(snapshot.asks.windows(2).all(|w| w[0].price < w[1].price));
    }

    #[test]
    fn fills_pair_opposite_sides(commands in prop::collection::vec(command_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        for command in commands {
            let _ = apply(&mut book, command);
        }

        for fill in book.fills() {
            prop_assert!(fill.quantity > 0);
            prop_assert_ne!(fill.resting_order_id, fill.aggressor_order_id);
            let resting = book.order(fill.resting_order_id).expect("resting order recorded");
            prop_assert_eq!(resting.side, fill.aggressor_side.opposite());
        }
    }

    #[test]
    fn replay_is_deterministic(commands in prop::collection::vec(command_strategy(), 1..100)) {
        let mut first = MatchingEngine::new();
        let mut second = MatchingEngine::new();

        let a = first.run_batch(commands.clone()).unwrap();
        let b = second.run_batch(commands).unwrap();

        prop_assert_eq!(a, b);
        prop_assert_eq!(first.book().state_root_hex(), second.book().state_root_hex());
    }
}
