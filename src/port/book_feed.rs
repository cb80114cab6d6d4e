//! Book feed port: the upstream pricing authority.
//!
//! The feed is a read-only collaborator keyed by (market, instrument).
//! Reads are unlocked and best-effort; a feed failure surfaces as
//! `OrderError::BookUnavailable` and aborts the order. An unavailable
//! book is distinct from an empty one: the builder never synthesizes an
//! empty book to paper over a feed error.

use std::future::Future;

use crate::domain::{BookSnapshot, Instrument, MarketId, PriceLevel};
use crate::error::Result;

/// Raw quotes for one instrument, as delivered by the feed.
///
/// Levels are unordered and priced in the instrument's own units; NO-side
/// quotes still need YES-equivalent normalization.
#[derive(Debug, Clone, Default)]
pub struct RawBook {
    /// Bid (buy) levels in feed order.
    pub bids: Vec<PriceLevel>,
    /// Ask (sell) levels in feed order.
    pub asks: Vec<PriceLevel>,
}

impl RawBook {
    /// Normalizes quotes into YES-equivalent units and builds a sorted,
    /// immutable snapshot.
    ///
    /// YES-side quotes are already canonical; NO-side prices are mirrored
    /// with `yes_equivalent` before sorting.
    #[must_use]
    pub fn into_snapshot(self, instrument: Instrument) -> BookSnapshot {
        match instrument {
            Instrument::Yes => BookSnapshot::build(self.bids, self.asks),
            Instrument::No => BookSnapshot::build(
                self.bids
                    .into_iter()
                    .map(PriceLevel::into_yes_equivalent)
                    .collect(),
                self.asks
                    .into_iter()
                    .map(PriceLevel::into_yes_equivalent)
                    .collect(),
            ),
        }
    }
}

/// Read-only access to the live order book.
pub trait BookFeed: Send + Sync {
    /// Fetch the current raw book for one instrument of a market.
    ///
    /// Errors map to `OrderError::BookUnavailable` at the submission
    /// boundary; the caller decides whether to resubmit.
    fn raw_book(
        &self,
        market_id: &MarketId,
        instrument: Instrument,
    ) -> impl Future<Output = Result<RawBook>> + Send;
}
