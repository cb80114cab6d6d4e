//! Ports: trait seams between the core and its collaborators.

pub mod book_feed;
pub mod notifier;
pub mod store;

pub use book_feed::{BookFeed, RawBook};
pub use notifier::{Event, ExecutedEvent, LogNotifier, Notifier, NotifierRegistry, NullNotifier, RestingEvent};
pub use store::{LedgerStore, LedgerTx};
