//! SQLite ledger store integration tests.
//!
//! Each test opens a store on its own temporary file so pooled
//! connections share one database.

mod support;

use std::sync::Arc;

use rust_decimal_macros::dec;
use tempfile::TempDir;

use fillgate::adapter::SqliteLedgerStore;
use fillgate::domain::{Instrument, Market, RestingStatus, TradeSide};
use fillgate::error::OrderError;
use fillgate::port::notifier::NotifierRegistry;
use fillgate::port::store::LedgerStore;
use fillgate::service::OrderManager;
use fillgate::testkit::StaticBookFeed;

use support::{level, market_id, user};

fn temp_store(dir: &TempDir) -> SqliteLedgerStore {
    let path = dir.path().join("ledger.db");
    SqliteLedgerStore::open(path.to_str().unwrap()).unwrap()
}

fn seeded(dir: &TempDir, funds: rust_decimal::Decimal) -> SqliteLedgerStore {
    let store = temp_store(dir);
    store
        .put_market(&Market::open(market_id(), "Will it rain tomorrow?"))
        .unwrap();
    store.credit_balance(&user(), funds).unwrap();
    store
}

#[test]
fn migrations_produce_a_usable_schema() {
    let dir = TempDir::new().unwrap();
    let store = temp_store(&dir);

    assert_eq!(store.balance_of(&user()).unwrap(), dec!(0));
    assert!(store
        .holding_of(&user(), &market_id(), Instrument::Yes)
        .unwrap()
        .is_none());
}

#[test]
fn balances_round_trip_exactly() {
    let dir = TempDir::new().unwrap();
    let store = temp_store(&dir);

    store.credit_balance(&user(), dec!(123.456789)).unwrap();
    assert_eq!(store.balance_of(&user()).unwrap(), dec!(123.456789));

    store.credit_balance(&user(), dec!(0.000001)).unwrap();
    assert_eq!(store.balance_of(&user()).unwrap(), dec!(123.456790));
}

#[test]
fn transaction_rolls_back_on_error() {
    let dir = TempDir::new().unwrap();
    let store = temp_store(&dir);
    store.credit_balance(&user(), dec!(100)).unwrap();

    let result: fillgate::error::Result<()> = store.transaction(|tx| {
        tx.put_balance(&user(), dec!(0))?;
        Err(OrderError::NoFillPossible.into())
    });

    assert!(result.is_err());
    assert_eq!(store.balance_of(&user()).unwrap(), dec!(100));
}

#[tokio::test]
async fn full_order_flow_persists_ledger_state() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir, dec!(100));

    let feed = StaticBookFeed::new(
        vec![],
        vec![level(dec!(0.40), dec!(100)), level(dec!(0.45), dec!(50))],
    );
    let manager = OrderManager::new(store, feed, Arc::new(NotifierRegistry::new()));

    let execution = manager
        .submit_market_order(user(), market_id(), Instrument::Yes, TradeSide::Buy, dec!(120))
        .await
        .unwrap();
    assert_eq!(execution.filled_size(), dec!(120));

    let store = manager.store();
    assert_eq!(store.balance_of(&user()).unwrap(), dec!(51.00));

    let holding = store
        .holding_of(&user(), &market_id(), Instrument::Yes)
        .unwrap()
        .unwrap();
    assert_eq!(holding.amount(), dec!(120));

    let trades = store.trades_for_user(&user()).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].size(), dec!(120));
    assert_eq!(trades[0].kind(), fillgate::domain::OrderKind::Market);
}

#[tokio::test]
async fn rejected_order_leaves_no_trace() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir, dec!(10));

    let feed = StaticBookFeed::new(vec![], vec![level(dec!(0.40), dec!(100))]);
    let manager = OrderManager::new(store, feed, Arc::new(NotifierRegistry::new()));

    let err = manager
        .submit_market_order(user(), market_id(), Instrument::Yes, TradeSide::Buy, dec!(100))
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_order_error(),
        Some(OrderError::InsufficientBalance { .. })
    ));

    let store = manager.store();
    assert_eq!(store.balance_of(&user()).unwrap(), dec!(10));
    assert!(store.trades_for_user(&user()).unwrap().is_empty());
}

#[tokio::test]
async fn resting_order_round_trips_and_cancels() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir, dec!(100));

    let feed = StaticBookFeed::new(
        vec![level(dec!(0.55), dec!(30))],
        vec![level(dec!(0.60), dec!(30))],
    );
    let manager = OrderManager::new(store, feed, Arc::new(NotifierRegistry::new()));

    let execution = manager
        .submit_limit_order(
            user(),
            market_id(),
            Instrument::No,
            TradeSide::Buy,
            dec!(10),
            dec!(0.30),
        )
        .await
        .unwrap();
    assert!(execution.is_resting());
    let order_id = execution.resting_order_id().unwrap().clone();

    let resting = manager.resting_orders(&user()).unwrap();
    assert_eq!(resting.len(), 1);
    assert_eq!(resting[0].order_id(), &order_id);
    assert_eq!(resting[0].instrument(), Instrument::No);
    assert_eq!(resting[0].limit_price(), dec!(0.30));
    assert!(resting[0].is_active());

    manager.cancel_resting_order(&user(), &order_id).unwrap();

    let resting = manager.resting_orders(&user()).unwrap();
    assert_eq!(resting[0].status(), RestingStatus::Cancelled);
}

#[test]
fn state_survives_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.db");
    let url = path.to_str().unwrap();

    {
        let store = SqliteLedgerStore::open(url).unwrap();
        store
            .put_market(&Market::open(market_id(), "Will it rain tomorrow?"))
            .unwrap();
        store.credit_balance(&user(), dec!(42.5)).unwrap();
    }

    let store = SqliteLedgerStore::open(url).unwrap();
    assert_eq!(store.balance_of(&user()).unwrap(), dec!(42.5));
    let market = store.transaction(|tx| tx.market(&market_id())).unwrap();
    assert!(market.unwrap().is_tradable());
}
