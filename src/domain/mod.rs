//! Exchange-agnostic domain types and invariants.

pub mod book;
pub mod holding;
pub mod id;
pub mod market;
pub mod money;
pub mod order;
pub mod side;
pub mod trade;

// Core domain types
pub use book::{yes_equivalent, BookSnapshot, PriceLevel};
pub use holding::Holding;
pub use id::{MarketId, OrderId, TradeId, UserId};
pub use market::Market;
pub use money::{Price, Volume};
pub use order::{OrderRequest, RestingOrder, RestingStatus};
pub use side::{Instrument, OrderKind, TradeSide};
pub use trade::{Execution, TradeRecord};
