//! Monetary types for price and volume representation.
//!
//! All money and size arithmetic uses fixed-precision decimals; binary
//! floating point would break the ledger conservation property.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_arithmetic_is_exact() {
        let price: Price = dec!(0.45);
        let size: Volume = dec!(120);

        assert_eq!(price * size, dec!(54.00));
    }
}
