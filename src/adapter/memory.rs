//! In-memory ledger store.
//!
//! Backs tests and embedded use. A single mutex stands in for row-level
//! locking: transactions serialize completely, which is strictly stronger
//! than the per-row exclusivity the port requires. The closure runs
//! against a working copy of the state; only an `Ok` result is written
//! back, so rollback is a no-op drop.

use std::collections::HashMap;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{
    Holding, Instrument, Market, MarketId, OrderId, RestingOrder, RestingStatus, TradeRecord,
    UserId,
};
use crate::error::{OrderError, Result};
use crate::port::store::{LedgerStore, LedgerTx};

#[derive(Default, Clone)]
struct LedgerState {
    markets: HashMap<MarketId, Market>,
    balances: HashMap<UserId, Decimal>,
    holdings: HashMap<(UserId, MarketId, Instrument), Holding>,
    resting_orders: Vec<RestingOrder>,
    trades: Vec<TradeRecord>,
}

/// Mutex-guarded in-memory implementation of [`LedgerStore`].
#[derive(Default)]
pub struct MemoryLedgerStore {
    state: Mutex<LedgerState>,
}

impl MemoryLedgerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a market. Account and market provisioning are out-of-scope
    /// collaborators, so the adapters expose fixture surface directly.
    pub fn put_market(&self, market: Market) {
        self.state
            .lock()
            .markets
            .insert(market.market_id().clone(), market);
    }

    /// Add funds to a user's balance.
    pub fn credit_balance(&self, user_id: &UserId, amount: Decimal) {
        let mut state = self.state.lock();
        let balance = state.balances.entry(user_id.clone()).or_default();
        *balance += amount;
    }

    /// All executed trades, in execution order.
    #[must_use]
    pub fn trades(&self) -> Vec<TradeRecord> {
        self.state.lock().trades.clone()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn transaction<T>(&self, f: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T> {
        // The lock is held for the whole transaction, so concurrent
        // submissions observe each other's committed state only.
        let mut state = self.state.lock();
        let mut working = state.clone();
        let result = f(&mut MemoryTx {
            state: &mut working,
        })?;
        *state = working;
        Ok(result)
    }
}

struct MemoryTx<'a> {
    state: &'a mut LedgerState,
}

impl LedgerTx for MemoryTx<'_> {
    fn market(&mut self, market_id: &MarketId) -> Result<Option<Market>> {
        Ok(self.state.markets.get(market_id).cloned())
    }

    fn balance_for_update(&mut self, user_id: &UserId) -> Result<Decimal> {
        Ok(self
            .state
            .balances
            .get(user_id)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    fn put_balance(&mut self, user_id: &UserId, amount: Decimal) -> Result<()> {
        self.state.balances.insert(user_id.clone(), amount);
        Ok(())
    }

    fn holding_for_update(
        &mut self,
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
    ) -> Result<Option<Holding>> {
        Ok(self
            .state
            .holdings
            .get(&(user_id.clone(), market_id.clone(), instrument))
            .cloned())
    }

    fn put_holding(
        &mut self,
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
        holding: &Holding,
    ) -> Result<()> {
        self.state.holdings.insert(
            (user_id.clone(), market_id.clone(), instrument),
            holding.clone(),
        );
        Ok(())
    }

    fn insert_trade(&mut self, trade: &TradeRecord) -> Result<()> {
        self.state.trades.push(trade.clone());
        Ok(())
    }

    fn insert_resting_order(&mut self, order: &RestingOrder) -> Result<()> {
        self.state.resting_orders.push(order.clone());
        Ok(())
    }

    fn resting_order(&mut self, order_id: &OrderId) -> Result<Option<RestingOrder>> {
        Ok(self
            .state
            .resting_orders
            .iter()
            .find(|o| o.order_id() == order_id)
            .cloned())
    }

    fn set_resting_status(&mut self, order_id: &OrderId, status: RestingStatus) -> Result<()> {
        let order = self
            .state
            .resting_orders
            .iter_mut()
            .find(|o| o.order_id() == order_id)
            .ok_or_else(|| OrderError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;
        *order = order.clone().with_status(status);
        Ok(())
    }

    fn resting_orders_for_user(&mut self, user_id: &UserId) -> Result<Vec<RestingOrder>> {
        let mut orders: Vec<_> = self
            .state
            .resting_orders
            .iter()
            .filter(|o| o.user_id() == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn transaction_commits_on_ok() {
        let store = MemoryLedgerStore::new();
        let user = UserId::from("u1");

        store
            .transaction(|tx| tx.put_balance(&user, dec!(100)))
            .unwrap();

        assert_eq!(store.balance_of(&user).unwrap(), dec!(100));
    }

    #[test]
    fn transaction_rolls_back_on_err() {
        let store = MemoryLedgerStore::new();
        let user = UserId::from("u1");
        store.credit_balance(&user, dec!(100));

        let result: Result<()> = store.transaction(|tx| {
            tx.put_balance(&user, dec!(0))?;
            Err(Error::Database("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(store.balance_of(&user).unwrap(), dec!(100));
    }

    #[test]
    fn missing_balance_reads_as_zero() {
        let store = MemoryLedgerStore::new();
        assert_eq!(
            store.balance_of(&UserId::from("nobody")).unwrap(),
            dec!(0)
        );
    }

    #[test]
    fn holdings_keyed_by_user_market_instrument() {
        let store = MemoryLedgerStore::new();
        let user = UserId::from("u1");
        let market = MarketId::from("m1");

        store
            .transaction(|tx| {
                tx.put_holding(
                    &user,
                    &market,
                    Instrument::Yes,
                    &Holding::new(dec!(10), dec!(0.4)),
                )
            })
            .unwrap();

        assert!(store
            .holding_of(&user, &market, Instrument::Yes)
            .unwrap()
            .is_some());
        assert!(store
            .holding_of(&user, &market, Instrument::No)
            .unwrap()
            .is_none());
    }
}
