//! Fill engine: walk book levels to price a requested size.
//!
//! The walk takes liquidity best-price-first and is all-or-nothing by
//! policy: if the levels cannot supply the full requested size, the
//! caller must reject the entire order. No partial fill ever reaches the
//! ledger, so a user is never left with an ambiguous partially-executed
//! market order.

use rust_decimal::Decimal;

use crate::domain::{Price, PriceLevel, Volume};
use crate::error::OrderError;

/// Result of walking levels for a requested size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    filled_size: Volume,
    total_cost: Price,
    remaining_size: Volume,
}

impl FillReport {
    /// Size supplied by the walked levels.
    #[must_use]
    pub const fn filled_size(&self) -> Volume {
        self.filled_size
    }

    /// Sum of `taken * price` across walked levels.
    #[must_use]
    pub const fn total_cost(&self) -> Price {
        self.total_cost
    }

    /// Requested size the levels could not supply.
    #[must_use]
    pub const fn remaining_size(&self) -> Volume {
        self.remaining_size
    }

    /// True when the book supplied the full requested size.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining_size.is_zero()
    }

    /// Volume-weighted average price of the fill.
    ///
    /// # Errors
    ///
    /// `NoFillPossible` when nothing was filled.
    pub fn avg_price(&self) -> Result<Price, OrderError> {
        if self.filled_size.is_zero() {
            return Err(OrderError::NoFillPossible);
        }
        Ok(self.total_cost / self.filled_size)
    }
}

/// Walk `levels` in their given priority order (best price first) and
/// accumulate up to `requested_size`.
///
/// The walk itself reports whatever it could take; enforcement of the
/// all-or-nothing policy is [`fill_exact`].
#[must_use]
pub fn walk_levels(levels: &[PriceLevel], requested_size: Volume) -> FillReport {
    let mut remaining = requested_size;
    let mut filled = Decimal::ZERO;
    let mut cost = Decimal::ZERO;

    for level in levels {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taken = remaining.min(level.size());
        filled += taken;
        cost += taken * level.price();
        remaining -= taken;
    }

    FillReport {
        filled_size: filled,
        total_cost: cost,
        remaining_size: remaining,
    }
}

/// Walk `levels` for `requested_size`, rejecting anything short of a
/// complete fill.
///
/// # Errors
///
/// - `NoFillPossible` when no levels are available at all.
/// - `InsufficientLiquidity` when depth exists but cannot supply the
///   full requested size.
pub fn fill_exact(levels: &[PriceLevel], requested_size: Volume) -> Result<FillReport, OrderError> {
    if levels.is_empty() {
        return Err(OrderError::NoFillPossible);
    }

    let report = walk_levels(levels, requested_size);
    if !report.is_complete() {
        return Err(OrderError::InsufficientLiquidity {
            available: report.filled_size(),
            requested: requested_size,
        });
    }

    Ok(report)
}
