//! Persistence port: the transactional ledger store.
//!
//! The correctness boundary of the whole core is the store transaction,
//! not in-process locking. [`LedgerStore::transaction`] is a scoped
//! "exclusive row access" contract: the closure runs between BEGIN and
//! COMMIT, `Err` rolls everything back on every exit path, and the
//! `*_for_update` reads block concurrent submissions touching the same
//! rows until the transaction ends. Two concurrent BUY orders from one
//! user therefore serialize; the second observes the first's debited
//! balance.

use rust_decimal::Decimal;

use crate::domain::{
    Holding, Instrument, Market, MarketId, OrderId, RestingOrder, RestingStatus, TradeRecord,
    UserId,
};
use crate::error::Result;

/// Row operations available inside an open transaction.
///
/// Mutations performed through this trait are invisible to other
/// transactions until the enclosing [`LedgerStore::transaction`] commits.
pub trait LedgerTx {
    /// Look up a market. Tradability reads take no lock; staleness near a
    /// status flip risks only a borderline accept/reject, not fund safety.
    fn market(&mut self, market_id: &MarketId) -> Result<Option<Market>>;

    /// Read a user's cash balance, acquiring an exclusive row lock held
    /// until commit or rollback. Missing accounts read as zero.
    fn balance_for_update(&mut self, user_id: &UserId) -> Result<Decimal>;

    /// Overwrite a user's cash balance.
    fn put_balance(&mut self, user_id: &UserId, amount: Decimal) -> Result<()>;

    /// Read a holding, acquiring an exclusive row lock held until commit
    /// or rollback.
    fn holding_for_update(
        &mut self,
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
    ) -> Result<Option<Holding>>;

    /// Insert or overwrite a holding.
    fn put_holding(
        &mut self,
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
        holding: &Holding,
    ) -> Result<()>;

    /// Append a trade record. Records are never mutated afterwards.
    fn insert_trade(&mut self, trade: &TradeRecord) -> Result<()>;

    /// Persist a non-crossing limit order.
    fn insert_resting_order(&mut self, order: &RestingOrder) -> Result<()>;

    /// Fetch a resting order by ID.
    fn resting_order(&mut self, order_id: &OrderId) -> Result<Option<RestingOrder>>;

    /// Flip a resting order's lifecycle status.
    fn set_resting_status(&mut self, order_id: &OrderId, status: RestingStatus) -> Result<()>;

    /// List a user's resting orders, newest first.
    fn resting_orders_for_user(&mut self, user_id: &UserId) -> Result<Vec<RestingOrder>>;
}

/// The transactional ledger store.
///
/// Implementations guarantee that the closure's effects are atomic:
/// either every mutation commits or none does.
pub trait LedgerStore: Send + Sync {
    /// Run `f` inside a transaction. `Ok` commits, `Err` rolls back.
    fn transaction<T>(&self, f: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T>;

    /// Read a balance outside any transaction (no lock). Read-only
    /// convenience for callers and tests.
    fn balance_of(&self, user_id: &UserId) -> Result<Decimal> {
        self.transaction(|tx| tx.balance_for_update(user_id))
    }

    /// Read a holding outside any transaction (no lock).
    fn holding_of(
        &self,
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
    ) -> Result<Option<Holding>> {
        self.transaction(|tx| tx.holding_for_update(user_id, market_id, instrument))
    }
}
