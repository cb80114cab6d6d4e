//! Market-related domain types.
//!
//! - [`Market`] - A binary prediction market with tradability flags
//!
//! Markets are read-only to this core; metadata maintenance and status
//! flips happen upstream. A market is immutable once closed.

use super::id::MarketId;

/// A binary prediction market as seen by the execution core.
///
/// Only the identity and tradability flags matter here: an order may
/// execute only while the market is active, not closed, and not archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    market_id: MarketId,
    question: String,
    active: bool,
    closed: bool,
    archived: bool,
}

impl Market {
    /// Create a new market.
    pub fn new(
        market_id: MarketId,
        question: impl Into<String>,
        active: bool,
        closed: bool,
        archived: bool,
    ) -> Self {
        Self {
            market_id,
            question: question.into(),
            active,
            closed,
            archived,
        }
    }

    /// Create a market in the open, tradable state.
    pub fn open(market_id: MarketId, question: impl Into<String>) -> Self {
        Self::new(market_id, question, true, false, false)
    }

    /// Get the market ID.
    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Get the market question.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Whether the market is flagged active.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Whether the market has closed.
    #[must_use]
    pub const fn closed(&self) -> bool {
        self.closed
    }

    /// Whether the market has been archived.
    #[must_use]
    pub const fn archived(&self) -> bool {
        self.archived
    }

    /// True when orders may trade: active, not closed, not archived.
    #[must_use]
    pub const fn is_tradable(&self) -> bool {
        self.active && !self.closed && !self.archived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_market_is_tradable() {
        let market = Market::open(MarketId::from("m1"), "Will it rain tomorrow?");
        assert!(market.is_tradable());
    }

    #[test]
    fn closed_market_is_not_tradable() {
        let market = Market::new(MarketId::from("m1"), "q", true, true, false);
        assert!(!market.is_tradable());
    }

    #[test]
    fn archived_market_is_not_tradable() {
        let market = Market::new(MarketId::from("m1"), "q", true, false, true);
        assert!(!market.is_tradable());
    }

    #[test]
    fn inactive_market_is_not_tradable() {
        let market = Market::new(MarketId::from("m1"), "q", false, false, false);
        assert!(!market.is_tradable());
    }
}
