//! Services: the fill engine, limit router, and order manager.

pub mod fill;
pub mod orders;
pub mod router;

pub use fill::{fill_exact, walk_levels, FillReport};
pub use orders::OrderManager;
pub use router::{route_limit, Route};
