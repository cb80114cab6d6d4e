use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Order rejection reasons.
///
/// Every variant aborts the submission before any ledger mutation and
/// rolls back the open transaction. `BookUnavailable` and
/// `TransactionConflict` are the only categories a caller may reasonably
/// retry; all others are permanent for the given order parameters until
/// external state changes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("market not found: {market_id}")]
    MarketNotFound { market_id: String },

    #[error("market not active: {market_id}")]
    MarketNotActive { market_id: String },

    #[error("order size must be positive: {size}")]
    InvalidSize { size: Decimal },

    #[error("insufficient holdings: held {held}, requested {requested}")]
    InsufficientHoldings { held: Decimal, requested: Decimal },

    #[error("insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: Decimal, required: Decimal },

    #[error("insufficient liquidity: {available} available, {requested} requested")]
    InsufficientLiquidity {
        available: Decimal,
        requested: Decimal,
    },

    #[error("limit order requires a limit price")]
    MissingLimitPrice,

    #[error("no fill possible: book side is empty")]
    NoFillPossible,

    #[error("order book unavailable: {0}")]
    BookUnavailable(String),

    #[error("transaction conflict: {0}")]
    TransactionConflict(String),

    #[error("resting order not found: {order_id}")]
    OrderNotFound { order_id: String },

    #[error("order {order_id} does not belong to the requesting user")]
    NotOwner { order_id: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the order rejection reason, if this is one.
    #[must_use]
    pub fn as_order_error(&self) -> Option<&OrderError> {
        match self {
            Self::Order(e) => Some(e),
            _ => None,
        }
    }

    /// True for failures where resubmitting the same order may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Order(OrderError::BookUnavailable(_))
                | Self::Order(OrderError::TransactionConflict(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_errors_format_with_amounts() {
        let err = OrderError::InsufficientBalance {
            balance: dec!(10),
            required: dec!(49),
        };
        assert_eq!(err.to_string(), "insufficient balance: have 10, need 49");
    }

    #[test]
    fn retryable_classification() {
        let conflict: Error = OrderError::TransactionConflict("busy".into()).into();
        let permanent: Error = OrderError::MissingLimitPrice.into();

        assert!(conflict.is_retryable());
        assert!(!permanent.is_retryable());
    }

    #[test]
    fn as_order_error_unwraps_rejections() {
        let err: Error = OrderError::NoFillPossible.into();
        assert_eq!(err.as_order_error(), Some(&OrderError::NoFillPossible));
        assert!(Error::Database("oops".into()).as_order_error().is_none());
    }
}
