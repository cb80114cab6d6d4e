//! Test doubles for the outbound ports.
//!
//! Available under the `testkit` feature so integration tests (and
//! downstream consumers' tests) can drive the order manager without a
//! live feed.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{Instrument, MarketId, PriceLevel};
use crate::error::{Error, Result};
use crate::port::book_feed::{BookFeed, RawBook};
use crate::port::notifier::{Event, Notifier};

/// A notifier that records every event it receives.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}

/// A book feed that always serves one configured raw book.
#[derive(Default)]
pub struct StaticBookFeed {
    book: Mutex<RawBook>,
}

impl StaticBookFeed {
    /// Serve the given bid/ask levels for every request.
    #[must_use]
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self {
            book: Mutex::new(RawBook { bids, asks }),
        }
    }

    /// Replace the served book.
    pub fn set_book(&self, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) {
        *self.book.lock() = RawBook { bids, asks };
    }
}

impl BookFeed for StaticBookFeed {
    async fn raw_book(&self, _market_id: &MarketId, _instrument: Instrument) -> Result<RawBook> {
        Ok(self.book.lock().clone())
    }
}

/// A book feed that always fails, for exercising the unavailable path.
pub struct FailingBookFeed;

impl BookFeed for FailingBookFeed {
    async fn raw_book(&self, _market_id: &MarketId, _instrument: Instrument) -> Result<RawBook> {
        Err(Error::Connection("feed offline".into()))
    }
}
