//! SQLite ledger store using Diesel.
//!
//! Transactions run under `BEGIN IMMEDIATE`, which takes the write lock
//! at the start of the transaction: concurrent submissions serialize at
//! the store, giving the `*_for_update` reads their exclusivity. A busy
//! or conflicting transaction surfaces as `TransactionConflict`, which
//! callers may retry; everything else rolls back and propagates.

pub mod model;
pub mod schema;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::DatabaseErrorKind;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use rust_decimal::Decimal;

use self::model::{BalanceRow, HoldingRow, MarketRow, RestingOrderRow, TradeRow};
use crate::domain::{
    Holding, Instrument, Market, MarketId, OrderId, RestingOrder, RestingStatus, TradeRecord,
    UserId,
};
use crate::error::{Error, OrderError, Result};
use crate::port::store::{LedgerStore, LedgerTx};

/// Embedded schema migrations, applied by [`SqliteLedgerStore::open`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database connection pool type alias.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                Error::Order(OrderError::TransactionConflict(
                    info.message().to_string(),
                ))
            }
            other => Error::Database(other.to_string()),
        }
    }
}

/// SQLite-backed implementation of [`LedgerStore`].
pub struct SqliteLedgerStore {
    pool: DbPool,
}

impl SqliteLedgerStore {
    /// Open a store at `database_url` (a path, or `:memory:`) and run
    /// pending migrations.
    pub fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url)?;
        let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (migrations are the caller's concern).
    #[must_use]
    pub fn with_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Seed a market. Market provisioning is an out-of-scope
    /// collaborator, so the adapter exposes fixture surface directly.
    pub fn put_market(&self, market: &Market) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        diesel::replace_into(schema::markets::table)
            .values(MarketRow::from_domain(market))
            .execute(&mut conn)?;
        Ok(())
    }

    /// Add funds to a user's balance.
    pub fn credit_balance(&self, user_id: &UserId, amount: Decimal) -> Result<()> {
        self.transaction(|tx| {
            let balance = tx.balance_for_update(user_id)?;
            tx.put_balance(user_id, balance + amount)
        })
    }

    /// All trades executed by a user, oldest first.
    pub fn trades_for_user(&self, user_id: &UserId) -> Result<Vec<TradeRecord>> {
        use schema::trades::dsl;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<TradeRow> = dsl::trades
            .filter(dsl::user_id.eq(user_id.as_str()))
            .order(dsl::executed_at.asc())
            .load(&mut conn)?;

        rows.into_iter().map(TradeRow::into_domain).collect()
    }
}

impl LedgerStore for SqliteLedgerStore {
    fn transaction<T>(&self, f: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Order(OrderError::TransactionConflict(e.to_string())))?;

        conn.immediate_transaction(|conn| {
            let mut tx = SqliteTx { conn };
            f(&mut tx)
        })
    }
}

/// One open transaction over a pooled connection.
pub struct SqliteTx<'a> {
    conn: &'a mut SqliteConnection,
}

impl LedgerTx for SqliteTx<'_> {
    fn market(&mut self, market_id: &MarketId) -> Result<Option<Market>> {
        let row: Option<MarketRow> = schema::markets::table
            .find(market_id.as_str())
            .first(&mut *self.conn)
            .optional()?;
        Ok(row.map(MarketRow::into_domain))
    }

    fn balance_for_update(&mut self, user_id: &UserId) -> Result<Decimal> {
        let row: Option<BalanceRow> = schema::balances::table
            .find(user_id.as_str())
            .first(&mut *self.conn)
            .optional()?;
        match row {
            Some(row) => model::parse_decimal(&row.amount),
            None => Ok(Decimal::ZERO),
        }
    }

    fn put_balance(&mut self, user_id: &UserId, amount: Decimal) -> Result<()> {
        diesel::replace_into(schema::balances::table)
            .values(BalanceRow {
                user_id: user_id.to_string(),
                amount: amount.to_string(),
            })
            .execute(&mut *self.conn)?;
        Ok(())
    }

    fn holding_for_update(
        &mut self,
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
    ) -> Result<Option<Holding>> {
        let row: Option<HoldingRow> = schema::holdings::table
            .find((user_id.as_str(), market_id.as_str(), instrument.as_str()))
            .first(&mut *self.conn)
            .optional()?;
        row.map(HoldingRow::into_domain).transpose()
    }

    fn put_holding(
        &mut self,
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
        holding: &Holding,
    ) -> Result<()> {
        diesel::replace_into(schema::holdings::table)
            .values(HoldingRow::from_domain(user_id, market_id, instrument, holding))
            .execute(&mut *self.conn)?;
        Ok(())
    }

    fn insert_trade(&mut self, trade: &TradeRecord) -> Result<()> {
        diesel::insert_into(schema::trades::table)
            .values(TradeRow::from_domain(trade))
            .execute(&mut *self.conn)?;
        Ok(())
    }

    fn insert_resting_order(&mut self, order: &RestingOrder) -> Result<()> {
        diesel::insert_into(schema::resting_orders::table)
            .values(RestingOrderRow::from_domain(order))
            .execute(&mut *self.conn)?;
        Ok(())
    }

    fn resting_order(&mut self, order_id: &OrderId) -> Result<Option<RestingOrder>> {
        let row: Option<RestingOrderRow> = schema::resting_orders::table
            .find(order_id.as_str())
            .first(&mut *self.conn)
            .optional()?;
        row.map(RestingOrderRow::into_domain).transpose()
    }

    fn set_resting_status(&mut self, order_id: &OrderId, status: RestingStatus) -> Result<()> {
        use schema::resting_orders::dsl;
        let updated = diesel::update(dsl::resting_orders.find(order_id.as_str()))
            .set(dsl::status.eq(status.as_str()))
            .execute(&mut *self.conn)?;
        if updated == 0 {
            return Err(OrderError::OrderNotFound {
                order_id: order_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn resting_orders_for_user(&mut self, user_id: &UserId) -> Result<Vec<RestingOrder>> {
        use schema::resting_orders::dsl;
        let rows: Vec<RestingOrderRow> = dsl::resting_orders
            .filter(dsl::user_id.eq(user_id.as_str()))
            .order(dsl::submitted_at.desc())
            .load(&mut *self.conn)?;
        rows.into_iter().map(RestingOrderRow::into_domain).collect()
    }
}
