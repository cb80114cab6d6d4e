//! Notifier port for ledger change events.
//!
//! Submissions emit fire-and-forget events after commit: a user's
//! balance, holdings, or orders changed. Delivery failures must never
//! affect the transaction outcome, so the trait is infallible and events
//! are only fired once the transaction has committed.

use rust_decimal::Decimal;

use crate::domain::{OrderId, RestingOrder, TradeRecord};

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A trade executed: balance and holdings changed.
    OrderExecuted(ExecutedEvent),
    /// A limit order was persisted to rest.
    OrderResting(RestingEvent),
    /// A resting order was cancelled.
    OrderCancelled {
        /// The owning user.
        user_id: String,
        /// The cancelled order.
        order_id: String,
    },
}

/// Details of an executed order.
#[derive(Debug, Clone)]
pub struct ExecutedEvent {
    /// The user whose ledger changed.
    pub user_id: String,
    /// The market traded.
    pub market_id: String,
    /// Instrument and trade side, e.g. "YES BUY".
    pub action: String,
    /// Filled size.
    pub filled_size: Decimal,
    /// Volume-weighted average fill price.
    pub avg_price: Decimal,
}

impl ExecutedEvent {
    /// Build from a committed trade record.
    #[must_use]
    pub fn from_trade(trade: &TradeRecord) -> Self {
        Self {
            user_id: trade.user_id().to_string(),
            market_id: trade.market_id().to_string(),
            action: format!("{} {}", trade.instrument(), trade.trade_side()),
            filled_size: trade.size(),
            avg_price: trade.avg_price(),
        }
    }
}

/// Details of a newly resting order.
#[derive(Debug, Clone)]
pub struct RestingEvent {
    /// The owning user.
    pub user_id: String,
    /// The market.
    pub market_id: String,
    /// The persisted order ID.
    pub order_id: String,
    /// Order size.
    pub size: Decimal,
    /// The stated limit price.
    pub limit_price: Decimal,
}

impl RestingEvent {
    /// Build from a persisted resting order.
    #[must_use]
    pub fn from_order(order: &RestingOrder) -> Self {
        Self {
            user_id: order.user_id().to_string(),
            market_id: order.market_id().to_string(),
            order_id: order.order_id().to_string(),
            size: order.size(),
            limit_price: order.limit_price(),
        }
    }
}

impl Event {
    /// Build a cancellation event.
    #[must_use]
    pub fn cancelled(user_id: &str, order_id: &OrderId) -> Self {
        Self::OrderCancelled {
            user_id: user_id.to_string(),
            order_id: order_id.to_string(),
        }
    }

    /// True when this event reflects an execution rather than a
    /// persistence-only change.
    #[must_use]
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::OrderExecuted(_))
    }
}

/// Trait for notification handlers.
///
/// Implementations must be thread-safe and should return quickly; slow
/// delivery belongs in a spawned task.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::info;
        match event {
            Event::OrderExecuted(e) => {
                info!(
                    user_id = %e.user_id,
                    market_id = %e.market_id,
                    action = %e.action,
                    filled = %e.filled_size,
                    avg_price = %e.avg_price,
                    "Order executed"
                );
            }
            Event::OrderResting(e) => {
                info!(
                    user_id = %e.user_id,
                    market_id = %e.market_id,
                    order_id = %e.order_id,
                    size = %e.size,
                    limit_price = %e.limit_price,
                    "Order resting"
                );
            }
            Event::OrderCancelled { user_id, order_id } => {
                info!(user_id = %user_id, order_id = %order_id, "Order cancelled");
            }
        }
    }
}
