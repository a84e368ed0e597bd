//! End-to-end scenarios against the public API.

use lob_engine::{
    BookConfig, BookError, Command, Fill, MatchingEngine, Order, OrderBook, OrderStatus, Side,
};

fn checked_book() -> OrderBook {
    OrderBook::with_config(BookConfig::default().with_invariant_checks(true))
}

#[test]
fn test_scenario_resting_ask() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 100, 10, Side::Sell)).unwrap();

    let level = book.best_ask_level().unwrap();
    assert_eq!(level.price(), 100);
    assert_eq!(level.total_quantity(), 10);
}

#[test]
fn test_scenario_partial_fill() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 100, 10, Side::Sell)).unwrap();
    book.add_order(Order::new(2, 100, 5, Side::Buy)).unwrap();

    assert_eq!(book.fills(), &[Fill::new(100, 5, Side::Buy, 1, 2)]);
    let resting = book.order(1).unwrap();
    assert_eq!((resting.quantity, resting.status), (5, OrderStatus::Open));
    assert_eq!(book.order(2).unwrap().status, OrderStatus::Filled);
}

#[test]
fn test_scenario_update_to_zero_cancels() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 100, 10, Side::Sell)).unwrap();
    book.update_order(1, 100, 0).unwrap();

    assert_eq!(book.order(1).unwrap().status, OrderStatus::Cancelled);
    assert!(book.best_ask().is_none());
    assert!(book.fills().is_empty());
}

#[test]
fn test_scenario_trade_at_resting_price() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 100, 10, Side::Buy)).unwrap();
    book.add_order(Order::new(2, 99, 5, Side::Sell)).unwrap();

    assert_eq!(book.fills(), &[Fill::new(100, 5, Side::Sell, 1, 2)]);
}

#[test]
fn test_scenario_cancel_unknown() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 100, 10, Side::Sell)).unwrap();
    let before = book.snapshot();

    assert_eq!(book.cancel_order(99), Err(BookError::UnknownOrder(99)));
    assert_eq!(book.snapshot(), before);
}

#[test]
fn test_rejected_commands_are_idempotent() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 100, 10, Side::Sell)).unwrap();
    book.add_order(Order::new(2, 100, 10, Side::Buy)).unwrap();
    let root = book.compute_state_root();

    let filled = |id: u64| -> lob_engine::Result<()> {
        Err(BookError::OrderNotOpen {
            id,
            status: OrderStatus::Filled,
        })
    };
    for _ in 0..3 {
        assert_eq!(book.cancel_order(1), filled(1));
        assert_eq!(book.update_order(2, 90, 4), filled(2));
        assert_eq!(book.cancel_order(42), Err(BookError::UnknownOrder(42)));
        assert_eq!(book.compute_state_root(), root);
    }
    assert!(!book.is_faulted());
}

#[test]
fn test_demo_stream_final_book() {
    let mut engine = MatchingEngine::with_config(BookConfig::default().with_invariant_checks(true));
    let receipts = engine
        .run_batch([
            Command::add(1, 100, 10, Side::Sell),
            Command::add(2, 99, 10, Side::Buy),
            Command::add(3, 101, 20, Side::Sell),
            Command::add(4, 98, 20, Side::Buy),
            Command::add(5, 102, 5, Side::Buy),
            Command::cancel(2),
            Command::update(3, 102, 30),
        ])
        .unwrap();
    assert_eq!(receipts.len(), 7);

    let book = engine.book();
    // Order 5 lifted 5 from the 100 ask
    assert_eq!(book.fills(), &[Fill::new(100, 5, Side::Buy, 1, 5)]);
    assert_eq!(book.best_bid(), Some(98));
    assert_eq!(book.best_ask(), Some(100));

    let asks: Vec<_> = book.levels(Side::Sell).map(|l| (l.price(), l.total_quantity())).collect();
    assert_eq!(asks, vec![(100, 5), (102, 30)]);

    let archived: Vec<_> = book.archive().map(|o| (o.id, o.status)).collect();
    assert_eq!(
        archived,
        vec![(5, OrderStatus::Filled), (2, OrderStatus::Cancelled)]
    );
}

#[test]
fn test_no_residual_cross_after_reprice() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 105, 3, Side::Sell)).unwrap();
    book.add_order(Order::new(2, 106, 3, Side::Sell)).unwrap();
    book.add_order(Order::new(3, 100, 10, Side::Buy)).unwrap();

    book.update_order(3, 110, 10).unwrap();

    assert_eq!(book.fills().len(), 2);
    assert_eq!(book.best_bid(), Some(110));
    assert!(book.best_ask().is_none());
    assert_eq!(book.best_bid_level().unwrap().total_quantity(), 4);
}

#[test]
fn test_less_aggressive_reprice_reorders_queue() {
    let mut book = checked_book();
    book.add_order(Order::new(1, 100, 1, Side::Buy)).unwrap();
    book.add_order(Order::new(2, 99, 1, Side::Buy)).unwrap();

    book.update_order(1, 99, 1).unwrap();

    let ids: Vec<_> = book.level_orders(Side::Buy, 99).iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert!(book.fills().is_empty());
}
