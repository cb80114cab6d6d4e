//! Position holdings with weighted-average cost basis.

use rust_decimal::Decimal;

use super::money::{Price, Volume};

/// A user's position in one (market, instrument) pair.
///
/// `entry_price` is a running size-weighted average: buying `s` at `p`
/// on top of `amount` held at `entry_price` yields
/// `(entry_price * amount + p * s) / (amount + s)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holding {
    amount: Volume,
    entry_price: Price,
}

impl Holding {
    /// Creates a new holding.
    #[must_use]
    pub const fn new(amount: Volume, entry_price: Price) -> Self {
        Self {
            amount,
            entry_price,
        }
    }

    /// An empty holding with no cost basis.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            amount: Decimal::ZERO,
            entry_price: Decimal::ZERO,
        }
    }

    /// Shares held.
    #[must_use]
    pub const fn amount(&self) -> Volume {
        self.amount
    }

    /// Size-weighted average entry price.
    #[must_use]
    pub const fn entry_price(&self) -> Price {
        self.entry_price
    }

    /// Returns the holding after buying `size` shares at `price`,
    /// blending the entry price by size-weighted average.
    #[must_use]
    pub fn after_buy(&self, size: Volume, price: Price) -> Self {
        let total = self.amount + size;
        let entry_price = if total.is_zero() {
            Decimal::ZERO
        } else {
            (self.entry_price * self.amount + price * size) / total
        };
        Self {
            amount: total,
            entry_price,
        }
    }

    /// Returns the holding after selling `size` shares.
    ///
    /// The entry price is unchanged; the validator guarantees
    /// `size <= amount` before this is applied.
    #[must_use]
    pub fn after_sell(&self, size: Volume) -> Self {
        Self {
            amount: self.amount - size,
            entry_price: self.entry_price,
        }
    }
}

impl Default for Holding {
    fn default() -> Self {
        Self::empty()
    }
}
