//! Trade execution result types.
//!
//! - [`TradeRecord`] - Append-only log entry for an executed fill
//! - [`Execution`] - What a submission returns to the caller
//!
//! A trade record is created once per successful execution and never
//! mutated afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::id::{MarketId, OrderId, TradeId, UserId};
use super::money::{Price, Volume};
use super::side::{Instrument, OrderKind, TradeSide};

/// Append-only record of one executed fill.
#[derive(Debug, Clone)]
pub struct TradeRecord {
    trade_id: TradeId,
    user_id: UserId,
    market_id: MarketId,
    instrument: Instrument,
    trade_side: TradeSide,
    kind: OrderKind,
    size: Volume,
    avg_price: Price,
    executed_at: DateTime<Utc>,
}

impl TradeRecord {
    /// Creates a trade record with a fresh ID.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        kind: OrderKind,
        size: Volume,
        avg_price: Price,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            user_id,
            market_id,
            instrument,
            trade_side,
            kind,
            size,
            avg_price,
            executed_at,
        }
    }

    /// Reconstructs a record from persisted fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_parts(
        trade_id: TradeId,
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        kind: OrderKind,
        size: Volume,
        avg_price: Price,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            trade_id,
            user_id,
            market_id,
            instrument,
            trade_side,
            kind,
            size,
            avg_price,
            executed_at,
        }
    }

    /// Get the trade ID.
    #[must_use]
    pub const fn trade_id(&self) -> &TradeId {
        &self.trade_id
    }

    /// Get the user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Get the market.
    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Get the instrument side.
    #[must_use]
    pub const fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Get the trade side.
    #[must_use]
    pub const fn trade_side(&self) -> TradeSide {
        self.trade_side
    }

    /// Get the originating order kind.
    #[must_use]
    pub const fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Get the filled size.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    /// Get the volume-weighted average fill price.
    #[must_use]
    pub const fn avg_price(&self) -> Price {
        self.avg_price
    }

    /// Get the execution timestamp.
    #[must_use]
    pub const fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }

    /// Total notional of the fill (`size * avg_price`).
    #[must_use]
    pub fn notional(&self) -> Price {
        self.size * self.avg_price
    }
}

/// The outcome of a submission, as returned to the caller.
///
/// An executed order carries a trade ID and zero remaining size; a
/// resting limit order carries the persisted order ID and its full
/// size as remaining.
#[derive(Debug, Clone)]
pub struct Execution {
    filled_size: Volume,
    avg_price: Option<Price>,
    remaining_size: Volume,
    trade_id: Option<TradeId>,
    resting_order_id: Option<OrderId>,
}

impl Execution {
    /// An immediate fill.
    #[must_use]
    pub fn filled(filled_size: Volume, avg_price: Price, trade_id: TradeId) -> Self {
        Self {
            filled_size,
            avg_price: Some(avg_price),
            remaining_size: Decimal::ZERO,
            trade_id: Some(trade_id),
            resting_order_id: None,
        }
    }

    /// A limit order that rested instead of executing.
    #[must_use]
    pub fn resting(size: Volume, order_id: OrderId) -> Self {
        Self {
            filled_size: Decimal::ZERO,
            avg_price: None,
            remaining_size: size,
            trade_id: None,
            resting_order_id: Some(order_id),
        }
    }

    /// Filled size (zero for a resting order).
    #[must_use]
    pub const fn filled_size(&self) -> Volume {
        self.filled_size
    }

    /// Volume-weighted average price, absent for a resting order.
    #[must_use]
    pub const fn avg_price(&self) -> Option<Price> {
        self.avg_price
    }

    /// Unfilled size (the full size for a resting order, zero otherwise).
    #[must_use]
    pub const fn remaining_size(&self) -> Volume {
        self.remaining_size
    }

    /// Trade record ID for an executed order.
    #[must_use]
    pub const fn trade_id(&self) -> Option<&TradeId> {
        self.trade_id.as_ref()
    }

    /// Persisted order ID for a resting order.
    #[must_use]
    pub const fn resting_order_id(&self) -> Option<&OrderId> {
        self.resting_order_id.as_ref()
    }

    /// True when the order was persisted to rest rather than executed.
    #[must_use]
    pub const fn is_resting(&self) -> bool {
        self.resting_order_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn filled_execution_has_no_remainder() {
        let exec = Execution::filled(dec!(120), dec!(0.41), TradeId::new());
        assert_eq!(exec.filled_size(), dec!(120));
        assert_eq!(exec.remaining_size(), dec!(0));
        assert!(!exec.is_resting());
        assert!(exec.trade_id().is_some());
    }

    #[test]
    fn resting_execution_keeps_full_size() {
        let exec = Execution::resting(dec!(10), OrderId::new());
        assert_eq!(exec.filled_size(), dec!(0));
        assert_eq!(exec.remaining_size(), dec!(10));
        assert_eq!(exec.avg_price(), None);
        assert!(exec.is_resting());
    }

    #[test]
    fn trade_record_notional() {
        let record = TradeRecord::new(
            UserId::from("u1"),
            MarketId::from("m1"),
            Instrument::Yes,
            TradeSide::Buy,
            OrderKind::Market,
            dec!(120),
            dec!(0.40),
            Utc::now(),
        );
        assert_eq!(record.notional(), dec!(48.00));
    }
}
