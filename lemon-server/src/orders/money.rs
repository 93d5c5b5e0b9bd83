//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored and serialized as `f64`. Every sum or product is done
//! in `Decimal` and rounded back to 2 decimal places before it is stored.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Highest accepted catalog price (6 digits, 2 of them decimals)
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity × unit_price`, rounded
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Sum of already rounded amounts
pub fn sum<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(amounts.into_iter().map(to_decimal).sum())
}

/// Price is positive, at most 2 decimal places, and within [`MAX_PRICE`]
pub fn is_valid_price(price: Decimal) -> bool {
    price > Decimal::ZERO && price <= MAX_PRICE && price.normalize().scale() <= DECIMAL_PLACES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_total_avoids_float_drift() {
        assert_eq!(line_total(0.1, 3), 0.3);
        assert_eq!(line_total(5.0, 2), 10.0);
        assert_eq!(line_total(19.99, 5), 99.95);
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum([10.0, 3.0]), 13.0);
        assert_eq!(sum([0.1, 0.2]), 0.3);
        assert_eq!(sum(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::from_str("2.345").unwrap()), 2.35);
        assert_eq!(to_f64(Decimal::from_str("2.344").unwrap()), 2.34);
    }

    #[test]
    fn test_price_validation() {
        assert!(is_valid_price(Decimal::from_str("0.01").unwrap()));
        assert!(is_valid_price(Decimal::from_str("9999.99").unwrap()));
        assert!(is_valid_price(Decimal::from_str("5.50").unwrap()));
        assert!(is_valid_price(Decimal::from_str("5.500").unwrap()));
        assert!(!is_valid_price(Decimal::ZERO));
        assert!(!is_valid_price(Decimal::from_str("-1").unwrap()));
        assert!(!is_valid_price(Decimal::from_str("10000").unwrap()));
        assert!(!is_valid_price(Decimal::from_str("1.999").unwrap()));
    }
}
