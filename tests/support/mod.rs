//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;

use fillgate::adapter::MemoryLedgerStore;
use fillgate::domain::{Market, MarketId, PriceLevel, UserId};
use fillgate::port::notifier::NotifierRegistry;
use fillgate::service::OrderManager;
use fillgate::testkit::{RecordingNotifier, StaticBookFeed};

pub const MARKET: &str = "market-1";
pub const ALICE: &str = "alice";

pub fn level(price: Decimal, size: Decimal) -> PriceLevel {
    PriceLevel::new(price, size)
}

pub fn user() -> UserId {
    UserId::from(ALICE)
}

pub fn market_id() -> MarketId {
    MarketId::from(MARKET)
}

/// A store with an open market and `funds` credited to alice.
pub fn seeded_store(funds: Decimal) -> MemoryLedgerStore {
    let store = MemoryLedgerStore::new();
    store.put_market(Market::open(market_id(), "Will it rain tomorrow?"));
    store.credit_balance(&user(), funds);
    store
}

/// An order manager over a seeded store, a static book, and a recording
/// notifier.
pub fn manager(
    store: MemoryLedgerStore,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
) -> (
    OrderManager<MemoryLedgerStore, StaticBookFeed>,
    RecordingNotifier,
) {
    let recorder = RecordingNotifier::new();
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(recorder.clone()));

    let manager = OrderManager::new(
        store,
        StaticBookFeed::new(bids, asks),
        Arc::new(registry),
    );
    (manager, recorder)
}
