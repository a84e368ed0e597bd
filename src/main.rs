//! lob-engine demo binary
//!
//! Replays a short command stream through the matching engine and prints the
//! resulting book. Book events are logged at info level; set
//! `RUST_LOG=lob_engine=debug` to also see every fill and transfer.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use lob_engine::{BookConfig, Command, MatchingEngine, OrderBook, Side, TracingSink};

/// Raw demo stream: `action,id,price,quantity,side`
/// (action 0=add 1=update 2=cancel, side 0=BUY 1=SELL)
const DEMO_STREAM: &[&[i64]] = &[
    &[0, 1, 100, 10, 1],
    &[0, 2, 99, 10, 0],
    &[0, 3, 101, 20, 1],
    &[0, 4, 98, 20, 0],
    &[0, 5, 102, 5, 0],
    &[2, 2],
    &[1, 3, 102, 30],
];

fn decode(fields: &[i64]) -> Option<Command> {
    let id = u64::try_from(*fields.get(1)?).ok()?;
    match *fields.first()? {
        0 => {
            let side = Side::from_u8(u8::try_from(*fields.get(4)?).ok()?)?;
            Some(Command::add(id, *fields.get(2)?, *fields.get(3)?, side))
        }
        1 => Some(Command::update(id, *fields.get(2)?, *fields.get(3)?)),
        2 => Some(Command::cancel(id)),
        _ => None,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut commands = Vec::with_capacity(DEMO_STREAM.len());
    for fields in DEMO_STREAM {
        match decode(fields) {
            Some(cmd) => commands.push(cmd),
            None => tracing::warn!(?fields, "skipping malformed command"),
        }
    }

    let book = OrderBook::with_sink(BookConfig::default(), TracingSink);
    let mut engine = MatchingEngine::from_book(book);
    match engine.run_batch(commands) {
        Ok(receipts) => {
            for receipt in &receipts {
                println!(
                    "#{:<2} fills={} archived={} root={}",
                    receipt.sequence,
                    receipt.fills_emitted,
                    receipt.orders_archived,
                    &receipt.state_root_hex()[..16]
                );
            }
            println!();
            print!("{}", engine.book());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "engine stopped");
            ExitCode::FAILURE
        }
    }
}
