//! Order request and resting order types.
//!
//! An [`OrderRequest`] is the ephemeral input to a submission. It either
//! executes (producing a trade record and ledger mutation) or, for a
//! non-crossing limit order, persists as a [`RestingOrder`]. Resting
//! orders leave `ACTIVE` only through explicit cancellation; this core
//! never re-evaluates them against later book movement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MarketId, OrderId, UserId};
use super::money::{Price, Volume};
use super::side::{Instrument, OrderKind, TradeSide};

/// An order as submitted, before validation.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    user_id: UserId,
    market_id: MarketId,
    instrument: Instrument,
    trade_side: TradeSide,
    kind: OrderKind,
    size: Volume,
    limit_price: Option<Price>,
}

impl OrderRequest {
    /// Creates an order request from explicit parts.
    ///
    /// The validator enforces that a limit order carries a limit price;
    /// prefer [`OrderRequest::market`] and [`OrderRequest::limit`], which
    /// make the invalid combination unrepresentable.
    #[must_use]
    pub fn new(
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        kind: OrderKind,
        size: Volume,
        limit_price: Option<Price>,
    ) -> Self {
        Self {
            user_id,
            market_id,
            instrument,
            trade_side,
            kind,
            size,
            limit_price,
        }
    }

    /// Creates a market order request (no limit price).
    #[must_use]
    pub fn market(
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        size: Volume,
    ) -> Self {
        Self {
            user_id,
            market_id,
            instrument,
            trade_side,
            kind: OrderKind::Market,
            size,
            limit_price: None,
        }
    }

    /// Creates a limit order request.
    #[must_use]
    pub fn limit(
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        size: Volume,
        limit_price: Price,
    ) -> Self {
        Self {
            user_id,
            market_id,
            instrument,
            trade_side,
            kind: OrderKind::Limit,
            size,
            limit_price: Some(limit_price),
        }
    }

    /// Get the submitting user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Get the market.
    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Get the instrument side (YES or NO).
    #[must_use]
    pub const fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Get the trade side (buy or sell).
    #[must_use]
    pub const fn trade_side(&self) -> TradeSide {
        self.trade_side
    }

    /// Get the order kind.
    #[must_use]
    pub const fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Get the requested size.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    /// Get the limit price, if any.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Price> {
        self.limit_price
    }
}

/// Lifecycle state of a persisted resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestingStatus {
    Active,
    Cancelled,
}

impl RestingStatus {
    /// Get the canonical uppercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// A limit order that did not cross at submission and was persisted.
///
/// No funds are escrowed for a resting order; the sufficiency check at
/// submission is the only gate.
#[derive(Debug, Clone)]
pub struct RestingOrder {
    order_id: OrderId,
    user_id: UserId,
    market_id: MarketId,
    instrument: Instrument,
    trade_side: TradeSide,
    size: Volume,
    limit_price: Price,
    status: RestingStatus,
    submitted_at: DateTime<Utc>,
}

impl RestingOrder {
    /// Creates an active resting order from a validated limit request.
    #[must_use]
    pub fn from_request(request: &OrderRequest, limit_price: Price, now: DateTime<Utc>) -> Self {
        Self {
            order_id: OrderId::new(),
            user_id: request.user_id().clone(),
            market_id: request.market_id().clone(),
            instrument: request.instrument(),
            trade_side: request.trade_side(),
            size: request.size(),
            limit_price,
            status: RestingStatus::Active,
            submitted_at: now,
        }
    }

    /// Reconstructs a resting order from persisted fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_parts(
        order_id: OrderId,
        user_id: UserId,
        market_id: MarketId,
        instrument: Instrument,
        trade_side: TradeSide,
        size: Volume,
        limit_price: Price,
        status: RestingStatus,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id,
            user_id,
            market_id,
            instrument,
            trade_side,
            size,
            limit_price,
            status,
            submitted_at,
        }
    }

    /// Get the order ID.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Get the owning user.
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

    /// Get the order size.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    /// Get the limit price.
    #[must_use]
    pub const fn limit_price(&self) -> Price {
        self.limit_price
    }

    /// Get the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RestingStatus {
        self.status
    }

    /// Get the submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// True while the order can still be cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RestingStatus::Active
    }

    /// Returns the order with `status` applied.
    #[must_use]
    pub fn with_status(mut self, status: RestingStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the order flipped to `CANCELLED`.
    #[must_use]
    pub fn cancelled(self) -> Self {
        self.with_status(RestingStatus::Cancelled)
    }
}
