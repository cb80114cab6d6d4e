//! Order manager: validation, execution, and ledger application.
//!
//! This is the execution boundary of the core. A submission captures one
//! book snapshot, then runs every gate and every mutation inside a single
//! store transaction:
//!
//! 1. market exists and is tradable;
//! 2. SELL: holdings sufficient, read under a row lock;
//! 3. BUY: balance read under a row lock, market orders simulated against
//!    the ask walk, limit orders checked at `limit_price * size` and
//!    filled only from levels at or inside the limit;
//! 4. on success the ledger applies atomically: balance debit/credit,
//!    holding upsert with a weighted-average entry price, an append-only
//!    trade record.
//!
//! Any failure at any step rolls the whole transaction back; validation
//! failures are returned as typed errors, never downgraded to partial
//! success. Notifications fire only after commit.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{
    BookSnapshot, Execution, Instrument, MarketId, OrderId, OrderKind, OrderRequest, Price,
    PriceLevel, RestingOrder, RestingStatus, TradeRecord, TradeSide, UserId, Volume,
};
use crate::error::{OrderError, Result};
use crate::port::book_feed::BookFeed;
use crate::port::notifier::{Event, ExecutedEvent, NotifierRegistry, RestingEvent};
use crate::port::store::{LedgerStore, LedgerTx};
use crate::service::fill::fill_exact;
use crate::service::router::{route_limit, Route};

/// Validates and executes orders against the ledger store, pricing from
/// the book feed.
pub struct OrderManager<S, F> {
    store: S,
    feed: F,
    notifiers: Arc<NotifierRegistry>,
}

impl<S, F> OrderManager<S, F>
where
    S: LedgerStore,
    F: BookFeed,
{
    /// Create an order manager over a store and a book feed.
    pub fn new(store: S, feed: F, notifiers: Arc<NotifierRegistry>) -> Self {
        Self {
            store,
            feed,
            notifiers,
        }
    }

    /// Submit a market order: fill now fully or reject.
    pub async fn submit_market_order(
        &self,
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        size: Volume,
    ) -> Result<Execution> {
        self.submit(OrderRequest::market(
            user_id, market_id, instrument, trade_side, size,
        ))
        .await
    }

    /// Submit a limit order: cross now or rest untouched.
    pub async fn submit_limit_order(
        &self,
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        size: Volume,
        limit_price: Price,
    ) -> Result<Execution> {
        self.submit(OrderRequest::limit(
            user_id,
            market_id,
            instrument,
            trade_side,
            size,
            limit_price,
        ))
        .await
    }

    /// Submit a pre-built order request.
    ///
    /// One snapshot is captured per attempt and reused for validation and
    /// fill computation, so a submission never observes two books.
    pub async fn submit(&self, request: OrderRequest) -> Result<Execution> {
        if request.size() <= Decimal::ZERO {
            warn!(
                user_id = %request.user_id(),
                market_id = %request.market_id(),
                size = %request.size(),
                "Order rejected"
            );
            return Err(OrderError::InvalidSize {
                size: request.size(),
            }
            .into());
        }

        let snapshot = self.snapshot(&request).await?;

        let outcome = self.store.transaction(|tx| {
            check_market(tx, request.market_id())?;
            match request.kind() {
                OrderKind::Market => execute_now(tx, &request, &snapshot, request.kind()),
                OrderKind::Limit => submit_limit(tx, &request, &snapshot),
            }
        });

        match outcome {
            Ok((execution, event)) => {
                info!(
                    user_id = %request.user_id(),
                    market_id = %request.market_id(),
                    instrument = %request.instrument(),
                    trade_side = %request.trade_side(),
                    kind = %request.kind(),
                    size = %request.size(),
                    filled = %execution.filled_size(),
                    resting = execution.is_resting(),
                    "Order accepted"
                );
                self.notifiers.notify_all(event);
                Ok(execution)
            }
            Err(err) => {
                warn!(
                    user_id = %request.user_id(),
                    market_id = %request.market_id(),
                    instrument = %request.instrument(),
                    trade_side = %request.trade_side(),
                    kind = %request.kind(),
                    size = %request.size(),
                    reason = %err,
                    "Order rejected"
                );
                Err(err)
            }
        }
    }

    /// Cancel a resting order owned by `user_id`.
    ///
    /// Cancellation is the only transition out of `ACTIVE`; cancelling an
    /// already-cancelled order is an idempotent success.
    pub fn cancel_resting_order(&self, user_id: &UserId, order_id: &OrderId) -> Result<()> {
        let flipped = self.store.transaction(|tx| {
            let order =
                tx.resting_order(order_id)?
                    .ok_or_else(|| OrderError::OrderNotFound {
                        order_id: order_id.to_string(),
                    })?;

            if order.user_id() != user_id {
                return Err(OrderError::NotOwner {
                    order_id: order_id.to_string(),
                }
                .into());
            }

            if !order.is_active() {
                return Ok(false);
            }

            tx.set_resting_status(order_id, RestingStatus::Cancelled)?;
            Ok(true)
        })?;

        if flipped {
            info!(user_id = %user_id, order_id = %order_id, "Resting order cancelled");
            self.notifiers
                .notify_all(Event::cancelled(user_id.as_str(), order_id));
        }
        Ok(())
    }

    /// List a user's resting orders, newest first.
    pub fn resting_orders(&self, user_id: &UserId) -> Result<Vec<RestingOrder>> {
        self.store
            .transaction(|tx| tx.resting_orders_for_user(user_id))
    }

    /// The underlying store, for read-only queries.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the manager, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    async fn snapshot(&self, request: &OrderRequest) -> Result<BookSnapshot> {
        let raw = self
            .feed
            .raw_book(request.market_id(), request.instrument())
            .await
            .map_err(|e| OrderError::BookUnavailable(e.to_string()))?;
        Ok(raw.into_snapshot(request.instrument()))
    }
}

fn check_market(tx: &mut dyn LedgerTx, market_id: &MarketId) -> Result<()> {
    let market = tx
        .market(market_id)?
        .ok_or_else(|| OrderError::MarketNotFound {
            market_id: market_id.to_string(),
        })?;

    if !market.is_tradable() {
        return Err(OrderError::MarketNotActive {
            market_id: market_id.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Execute `request` against the snapshot right now, all-or-nothing,
/// and apply the resulting ledger mutation.
fn execute_now(
    tx: &mut dyn LedgerTx,
    request: &OrderRequest,
    snapshot: &BookSnapshot,
    kind: OrderKind,
) -> Result<(Execution, Event)> {
    match request.trade_side() {
        TradeSide::Buy => {
            // Row lock: concurrent buys by the same user serialize here.
            let balance = tx.balance_for_update(request.user_id())?;

            if let Some(limit_price) = request.limit_price() {
                let required = limit_price * request.size();
                if required > balance {
                    return Err(OrderError::InsufficientBalance { balance, required }.into());
                }
            }

            let levels = within_limit(snapshot.asks(), request.limit_price(), TradeSide::Buy);
            let report = fill_exact(levels, request.size())?;
            let cost = report.total_cost();
            if request.limit_price().is_none() && cost > balance {
                return Err(OrderError::InsufficientBalance {
                    balance,
                    required: cost,
                }
                .into());
            }
            let avg_price = report.avg_price()?;

            tx.put_balance(request.user_id(), balance - cost)?;

            let holding = tx
                .holding_for_update(request.user_id(), request.market_id(), request.instrument())?
                .unwrap_or_default()
                .after_buy(report.filled_size(), avg_price);
            tx.put_holding(
                request.user_id(),
                request.market_id(),
                request.instrument(),
                &holding,
            )?;

            record_trade(tx, request, kind, report.filled_size(), avg_price)
        }
        TradeSide::Sell => {
            let holding = tx
                .holding_for_update(request.user_id(), request.market_id(), request.instrument())?
                .unwrap_or_default();
            if holding.amount() < request.size() {
                return Err(OrderError::InsufficientHoldings {
                    held: holding.amount(),
                    requested: request.size(),
                }
                .into());
            }

            let levels = within_limit(snapshot.bids(), request.limit_price(), TradeSide::Sell);
            let report = fill_exact(levels, request.size())?;
            let avg_price = report.avg_price()?;

            let balance = tx.balance_for_update(request.user_id())?;
            tx.put_balance(request.user_id(), balance + report.total_cost())?;
            tx.put_holding(
                request.user_id(),
                request.market_id(),
                request.instrument(),
                &holding.after_sell(report.filled_size()),
            )?;

            record_trade(tx, request, kind, report.filled_size(), avg_price)
        }
    }
}

/// Levels a limit order may take. The walk must never pass the limit:
/// a BUY takes `price <= limit` and a SELL takes `price >= limit`, so the
/// executed cost stays within the `limit_price * size` bound the
/// validator checked. Market orders (no limit) take the whole side.
fn within_limit(
    levels: &[PriceLevel],
    limit_price: Option<Price>,
    trade_side: TradeSide,
) -> &[PriceLevel] {
    let Some(limit) = limit_price else {
        return levels;
    };
    // Levels arrive best-first, so the first level past the limit ends
    // the eligible prefix.
    let end = levels
        .iter()
        .position(|level| match trade_side {
            TradeSide::Buy => level.price() > limit,
            TradeSide::Sell => level.price() < limit,
        })
        .unwrap_or(levels.len());
    &levels[..end]
}

/// Route a limit order: cross the book and execute, or persist to rest.
fn submit_limit(
    tx: &mut dyn LedgerTx,
    request: &OrderRequest,
    snapshot: &BookSnapshot,
) -> Result<(Execution, Event)> {
    let limit_price = request.limit_price().ok_or(OrderError::MissingLimitPrice)?;

    match route_limit(request.trade_side(), limit_price, snapshot) {
        Route::Execute => execute_now(tx, request, snapshot, OrderKind::Limit),
        Route::Rest => {
            // Sufficiency check only; no funds are escrowed for resting
            // orders (see DESIGN.md).
            match request.trade_side() {
                TradeSide::Buy => {
                    let balance = tx.balance_for_update(request.user_id())?;
                    let required = limit_price * request.size();
                    if required > balance {
                        return Err(OrderError::InsufficientBalance { balance, required }.into());
                    }
                }
                TradeSide::Sell => {
                    let holding = tx
                        .holding_for_update(
                            request.user_id(),
                            request.market_id(),
                            request.instrument(),
                        )?
                        .unwrap_or_default();
                    if holding.amount() < request.size() {
                        return Err(OrderError::InsufficientHoldings {
                            held: holding.amount(),
                            requested: request.size(),
                        }
                        .into());
                    }
                }
            }

            let resting = RestingOrder::from_request(request, limit_price, Utc::now());
            tx.insert_resting_order(&resting)?;

            let event = Event::OrderResting(RestingEvent::from_order(&resting));
            let execution = Execution::resting(resting.size(), resting.order_id().clone());
            Ok((execution, event))
        }
    }
}

fn record_trade(
    tx: &mut dyn LedgerTx,
    request: &OrderRequest,
    kind: OrderKind,
    filled_size: Volume,
    avg_price: Price,
) -> Result<(Execution, Event)> {
    let trade = TradeRecord::new(
        request.user_id().clone(),
        request.market_id().clone(),
        request.instrument(),
        request.trade_side(),
        kind,
        filled_size,
        avg_price,
        Utc::now(),
    );
    tx.insert_trade(&trade)?;

    let event = Event::OrderExecuted(ExecutedEvent::from_trade(&trade));
    let execution = Execution::filled(filled_size, avg_price, trade.trade_id().clone());
    Ok((execution, event))
}
