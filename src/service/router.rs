//! Limit order router: execute now or rest.
//!
//! A limit order crosses when its price reaches the opposite side's best
//! level: BUY at `limit >= best_ask`, SELL at `limit <= best_bid`. A
//! crossing order executes against the levels at or inside its limit,
//! all-or-nothing, so its average price is always at least as good as
//! the limit; depth past the limit counts as unavailable. A non-crossing
//! order rests untouched.

use crate::domain::{BookSnapshot, Price, TradeSide};

/// Routing decision for a limit order against a fresh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The limit crosses the book: execute immediately.
    Execute,
    /// The limit does not cross: persist as a resting order.
    Rest,
}

/// Decide whether a limit order crosses the snapshot.
///
/// An empty opposite side never crosses; the order rests.
#[must_use]
pub fn route_limit(trade_side: TradeSide, limit_price: Price, snapshot: &BookSnapshot) -> Route {
    let crosses = match trade_side {
        TradeSide::Buy => snapshot
            .best_ask()
            .is_some_and(|ask| limit_price >= ask.price()),
        TradeSide::Sell => snapshot
            .best_bid()
            .is_some_and(|bid| limit_price <= bid.price()),
    };

    if crosses {
        Route::Execute
    } else {
        Route::Rest
    }
}
