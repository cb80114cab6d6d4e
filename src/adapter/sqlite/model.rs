//! Database model types for Diesel ORM.
//!
//! Decimals are stored as text so the ledger round-trips exactly; float
//! columns would break conservation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{balances, holdings, markets, resting_orders, trades};
use crate::domain::{
    Holding, Instrument, Market, MarketId, OrderId, OrderKind, RestingOrder, RestingStatus,
    TradeId, TradeRecord, TradeSide, UserId,
};
use crate::error::{Error, Result};

pub(super) fn parse_decimal(text: &str) -> Result<Decimal> {
    Decimal::from_str(text).map_err(|e| Error::Parse(e.to_string()))
}

pub(super) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}

pub(super) fn parse_instrument(text: &str) -> Result<Instrument> {
    match text {
        "YES" => Ok(Instrument::Yes),
        "NO" => Ok(Instrument::No),
        other => Err(Error::Parse(format!("unknown instrument: {other}"))),
    }
}

pub(super) fn parse_trade_side(text: &str) -> Result<TradeSide> {
    match text {
        "BUY" => Ok(TradeSide::Buy),
        "SELL" => Ok(TradeSide::Sell),
        other => Err(Error::Parse(format!("unknown trade side: {other}"))),
    }
}

pub(super) fn parse_kind(text: &str) -> Result<OrderKind> {
    match text {
        "MARKET" => Ok(OrderKind::Market),
        "LIMIT" => Ok(OrderKind::Limit),
        other => Err(Error::Parse(format!("unknown order kind: {other}"))),
    }
}

pub(super) fn parse_status(text: &str) -> Result<RestingStatus> {
    match text {
        "ACTIVE" => Ok(RestingStatus::Active),
        "CANCELLED" => Ok(RestingStatus::Cancelled),
        other => Err(Error::Parse(format!("unknown order status: {other}"))),
    }
}

/// Database row for a market.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = markets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketRow {
    pub id: String,
    pub question: String,
    pub active: i32,
    pub closed: i32,
    pub archived: i32,
}

impl MarketRow {
    pub fn from_domain(market: &Market) -> Self {
        Self {
            id: market.market_id().to_string(),
            question: market.question().to_string(),
            active: i32::from(market.active()),
            closed: i32::from(market.closed()),
            archived: i32::from(market.archived()),
        }
    }

    pub fn into_domain(self) -> Market {
        Market::new(
            MarketId::from(self.id),
            self.question,
            self.active != 0,
            self.closed != 0,
            self.archived != 0,
        )
    }
}

/// Database row for a cash balance.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceRow {
    pub user_id: String,
    pub amount: String,
}

/// Database row for a holding.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingRow {
    pub user_id: String,
    pub market_id: String,
    pub instrument: String,
    pub amount: String,
    pub entry_price: String,
}

impl HoldingRow {
    pub fn from_domain(
        user_id: &UserId,
        market_id: &MarketId,
        instrument: Instrument,
        holding: &Holding,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            market_id: market_id.to_string(),
            instrument: instrument.as_str().to_string(),
            amount: holding.amount().to_string(),
            entry_price: holding.entry_price().to_string(),
        }
    }

    pub fn into_domain(self) -> Result<Holding> {
        Ok(Holding::new(
            parse_decimal(&self.amount)?,
            parse_decimal(&self.entry_price)?,
        ))
    }
}

/// Database row for a resting order.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = resting_orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestingOrderRow {
    pub id: String,
    pub user_id: String,
    pub market_id: String,
    pub instrument: String,
    pub trade_side: String,
    pub size: String,
    pub limit_price: String,
    pub status: String,
    pub submitted_at: String,
}

impl RestingOrderRow {
    pub fn from_domain(order: &RestingOrder) -> Self {
        Self {
            id: order.order_id().to_string(),
            user_id: order.user_id().to_string(),
            market_id: order.market_id().to_string(),
            instrument: order.instrument().as_str().to_string(),
            trade_side: order.trade_side().as_str().to_string(),
            size: order.size().to_string(),
            limit_price: order.limit_price().to_string(),
            status: order.status().as_str().to_string(),
            submitted_at: order.submitted_at().to_rfc3339(),
        }
    }

    pub fn into_domain(self) -> Result<RestingOrder> {
        Ok(RestingOrder::from_parts(
            OrderId::from(self.id),
            UserId::from(self.user_id),
            MarketId::from(self.market_id),
            parse_instrument(&self.instrument)?,
            parse_trade_side(&self.trade_side)?,
            parse_decimal(&self.size)?,
            parse_decimal(&self.limit_price)?,
            parse_status(&self.status)?,
            parse_timestamp(&self.submitted_at)?,
        ))
    }
}

/// Database row for an executed trade.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeRow {
    pub id: String,
    pub user_id: String,
    pub market_id: String,
    pub instrument: String,
    pub trade_side: String,
    pub kind: String,
    pub size: String,
    pub avg_price: String,
    pub executed_at: String,
}

impl TradeRow {
    pub fn from_domain(trade: &TradeRecord) -> Self {
        Self {
            id: trade.trade_id().to_string(),
            user_id: trade.user_id().to_string(),
            market_id: trade.market_id().to_string(),
            instrument: trade.instrument().as_str().to_string(),
            trade_side: trade.trade_side().as_str().to_string(),
            kind: trade.kind().as_str().to_string(),
            size: trade.size().to_string(),
            avg_price: trade.avg_price().to_string(),
            executed_at: trade.executed_at().to_rfc3339(),
        }
    }

    pub fn into_domain(self) -> Result<TradeRecord> {
        Ok(TradeRecord::from_parts(
            TradeId::from(self.id),
            UserId::from(self.user_id),
            MarketId::from(self.market_id),
            parse_instrument(&self.instrument)?,
            parse_trade_side(&self.trade_side)?,
            parse_kind(&self.kind)?,
            parse_decimal(&self.size)?,
            parse_decimal(&self.avg_price)?,
            parse_timestamp(&self.executed_at)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_text_round_trip_is_exact() {
        let original = dec!(0.408333333333333333);
        let parsed = parse_decimal(&original.to_string()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn market_row_round_trip() {
        let market = Market::new(MarketId::from("m1"), "q", true, true, false);
        let round_tripped = MarketRow::from_domain(&market).into_domain();
        assert_eq!(round_tripped, market);
    }

    #[test]
    fn resting_order_row_round_trip() {
        let order = RestingOrder::from_parts(
            OrderId::from("o1"),
            UserId::from("u1"),
            MarketId::from("m1"),
            Instrument::No,
            TradeSide::Sell,
            dec!(25),
            dec!(0.35),
            RestingStatus::Active,
            Utc::now(),
        );
        let round_tripped = RestingOrderRow::from_domain(&order).into_domain().unwrap();
        assert_eq!(round_tripped.order_id(), order.order_id());
        assert_eq!(round_tripped.instrument(), Instrument::No);
        assert_eq!(round_tripped.size(), dec!(25));
        assert_eq!(round_tripped.status(), RestingStatus::Active);
    }

    #[test]
    fn unknown_enum_text_is_rejected() {
        assert!(parse_instrument("MAYBE").is_err());
        assert!(parse_status("PENDING").is_err());
    }
}
