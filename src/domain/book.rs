//! Order book types for market depth representation.
//!
//! This module provides types for representing order book state:
//!
//! - [`PriceLevel`] - A single price level with size
//! - [`BookSnapshot`] - Immutable bid/ask depth with derived spread/mid
//! - [`yes_equivalent`] - The NO-to-YES price normalizer
//!
//! # Order Book Structure
//!
//! A snapshot has two sides:
//! - **Bids**: Buy orders, sorted by price descending (best bid first)
//! - **Asks**: Sell orders, sorted by price ascending (best ask first)
//!
//! Construction sorts whatever level order the feed delivered; ties keep
//! their received order (stable sort), so equal-priced levels have
//! deterministic but not time-priority ordering.
//!
//! # Examples
//!
//! ```
//! use fillgate::domain::book::{BookSnapshot, PriceLevel};
//! use rust_decimal_macros::dec;
//!
//! let snapshot = BookSnapshot::build(
//!     vec![PriceLevel::new(dec!(0.44), dec!(200)), PriceLevel::new(dec!(0.45), dec!(100))],
//!     vec![PriceLevel::new(dec!(0.47), dec!(300)), PriceLevel::new(dec!(0.46), dec!(150))],
//! );
//!
//! assert_eq!(snapshot.best_bid().unwrap().price(), dec!(0.45));
//! assert_eq!(snapshot.best_ask().unwrap().price(), dec!(0.46));
//! assert_eq!(snapshot.spread(), Some(dec!(0.01)));
//! ```

use rust_decimal::Decimal;

use super::money::{Price, Volume};

/// Convert a raw NO-side price into YES-equivalent units.
///
/// `yes_price = 1 - raw_price`. Out-of-range inputs propagate unchanged
/// rather than being clamped; the feed is the authority on quote validity.
#[must_use]
pub fn yes_equivalent(raw_price: Price) -> Price {
    Decimal::ONE - raw_price
}

/// A single price level in an order book.
///
/// Represents aggregated orders at a specific price point, expressed in
/// YES-equivalent price units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    /// The price at this level.
    price: Price,
    /// Total volume available at this price.
    size: Volume,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, size: Volume) -> Self {
        Self { price, size }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the total volume available at this level.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    /// Returns this level with its price converted to YES-equivalent units.
    #[must_use]
    pub fn into_yes_equivalent(self) -> Self {
        Self {
            price: yes_equivalent(self.price),
            size: self.size,
        }
    }
}

/// Immutable order book snapshot for one instrument.
///
/// Captured once per order attempt and reused for both validation and
/// fill computation, so a single submission never observes two different
/// books.
#[derive(Debug, Clone)]
pub struct BookSnapshot {
    /// Bid (buy) levels, sorted by price descending.
    bids: Vec<PriceLevel>,
    /// Ask (sell) levels, sorted by price ascending.
    asks: Vec<PriceLevel>,
}

impl BookSnapshot {
    /// Builds a snapshot from unordered bid and ask levels.
    ///
    /// Sorting is stable: equal-priced levels keep the order the feed
    /// delivered them in.
    #[must_use]
    pub fn build(mut bids: Vec<PriceLevel>, mut asks: Vec<PriceLevel>) -> Self {
        bids.sort_by(|a, b| b.price().cmp(&a.price()));
        asks.sort_by(|a, b| a.price().cmp(&b.price()));
        Self { bids, asks }
    }

    /// Returns all bid levels (sorted by price descending).
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    /// Returns all ask levels (sorted by price ascending).
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// Returns the best bid (highest buy price).
    #[must_use]
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Returns the best ask (lowest sell price).
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Spread between best ask and best bid.
    ///
    /// `None` when either side is empty. An empty side is a valid book
    /// state, distinct from the feed being unavailable.
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask.price() - bid.price()),
            _ => None,
        }
    }

    /// Midpoint between best ask and best bid, `None` when either side is empty.
    #[must_use]
    pub fn mid(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some((ask.price() + bid.price()) / Decimal::TWO),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(price: Decimal, size: Decimal) -> PriceLevel {
        PriceLevel::new(price, size)
    }

    #[test]
    fn yes_equivalent_mirrors_price() {
        assert_eq!(yes_equivalent(dec!(0.40)), dec!(0.60));
        assert_eq!(yes_equivalent(dec!(1)), dec!(0));
    }

    #[test]
    fn yes_equivalent_does_not_clamp() {
        assert_eq!(yes_equivalent(dec!(1.20)), dec!(-0.20));
    }

    #[test]
    fn build_sorts_asks_ascending_and_bids_descending() {
        let snapshot = BookSnapshot::build(
            vec![
                level(dec!(0.40), dec!(10)),
                level(dec!(0.44), dec!(20)),
                level(dec!(0.42), dec!(30)),
            ],
            vec![
                level(dec!(0.50), dec!(10)),
                level(dec!(0.46), dec!(20)),
                level(dec!(0.48), dec!(30)),
            ],
        );

        let ask_prices: Vec<_> = snapshot.asks().iter().map(PriceLevel::price).collect();
        let bid_prices: Vec<_> = snapshot.bids().iter().map(PriceLevel::price).collect();

        assert_eq!(ask_prices, vec![dec!(0.46), dec!(0.48), dec!(0.50)]);
        assert_eq!(bid_prices, vec![dec!(0.44), dec!(0.42), dec!(0.40)]);
    }

    #[test]
    fn equal_priced_levels_keep_received_order() {
        let snapshot = BookSnapshot::build(
            vec![],
            vec![
                level(dec!(0.46), dec!(1)),
                level(dec!(0.46), dec!(2)),
                level(dec!(0.45), dec!(3)),
            ],
        );

        assert_eq!(snapshot.asks()[0].size(), dec!(3));
        assert_eq!(snapshot.asks()[1].size(), dec!(1));
        assert_eq!(snapshot.asks()[2].size(), dec!(2));
    }

    #[test]
    fn spread_and_mid_present_when_both_sides_quoted() {
        let snapshot = BookSnapshot::build(
            vec![level(dec!(0.55), dec!(30))],
            vec![level(dec!(0.60), dec!(30))],
        );

        assert_eq!(snapshot.spread(), Some(dec!(0.05)));
        assert_eq!(snapshot.mid(), Some(dec!(0.575)));
    }

    #[test]
    fn spread_and_mid_none_when_a_side_is_empty() {
        let no_bids = BookSnapshot::build(vec![], vec![level(dec!(0.60), dec!(30))]);
        let no_asks = BookSnapshot::build(vec![level(dec!(0.55), dec!(30))], vec![]);

        assert_eq!(no_bids.spread(), None);
        assert_eq!(no_bids.mid(), None);
        assert_eq!(no_asks.spread(), None);
        assert_eq!(no_asks.mid(), None);
    }

    #[test]
    fn level_normalization_keeps_size() {
        let normalized = level(dec!(0.30), dec!(50)).into_yes_equivalent();
        assert_eq!(normalized.price(), dec!(0.70));
        assert_eq!(normalized.size(), dec!(50));
    }
}
