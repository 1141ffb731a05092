//! Money calculation utilities using rust_decimal for precision
//!
//! This module provides precise decimal arithmetic for monetary calculations.
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use shared::models::OrderLineInput;

use crate::db::repository::RepoError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price per line
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), RepoError> {
    if !value.is_finite() {
        return Err(RepoError::Validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate an order line before processing
pub fn validate_line(line: &OrderLineInput) -> Result<(), RepoError> {
    // Price must be finite and non-negative
    require_finite(line.unit_price, "unit_price")?;
    if line.unit_price < 0.0 {
        return Err(RepoError::Validation(format!(
            "unit_price must be non-negative, got {}",
            line.unit_price
        )));
    }
    if line.unit_price > MAX_PRICE {
        return Err(RepoError::Validation(format!(
            "unit_price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, line.unit_price
        )));
    }

    // Quantity must be positive and within bounds
    if line.quantity <= 0 {
        return Err(RepoError::Validation(format!(
            "quantity must be positive, got {}",
            line.quantity
        )));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(RepoError::Validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, line.quantity
        )));
    }

    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Calculate a line total with precise decimal arithmetic
///
/// Formula: unit_price * quantity
pub fn line_total(unit_price: f64, quantity: i64) -> Decimal {
    (to_decimal(unit_price) * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum all line totals of an order
pub fn order_total(lines: &[OrderLineInput]) -> Decimal {
    lines
        .iter()
        .map(|l| line_total(l.unit_price, l.quantity))
        .sum()
}

/// Check whether a client-claimed total matches the server-calculated total
///
/// Returns true if the difference is within 0.01.
pub fn totals_match(claimed: f64, calculated: Decimal) -> bool {
    (to_decimal(claimed) - calculated).abs() <= MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: f64, quantity: i64) -> OrderLineInput {
        OrderLineInput {
            book_id: 1,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let a = 0.1_f64;
        let b = 0.2_f64;
        let sum_f64 = a + b;

        // f64 fails
        assert_ne!(sum_f64, 0.3);

        // Decimal succeeds
        let sum_dec = to_decimal(a) + to_decimal(b);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_line_total() {
        let total = line_total(10.99, 3);
        assert_eq!(to_f64(total), 32.97);
    }

    #[test]
    fn test_line_total_zero_quantity() {
        assert_eq!(to_f64(line_total(10.0, 0)), 0.0);
    }

    #[test]
    fn test_order_total_sums_lines() {
        let lines = vec![line(50000.0, 2), line(120000.0, 1)];
        let total = order_total(&lines);
        assert_eq!(to_f64(total), 220000.0);
    }

    #[test]
    fn test_many_small_lines() {
        // 100 lines at 0.01 each
        let lines: Vec<OrderLineInput> = (0..100).map(|_| line(0.01, 1)).collect();
        assert_eq!(to_f64(order_total(&lines)), 1.0);
    }

    #[test]
    fn test_totals_match_exact() {
        let calculated = order_total(&[line(50000.0, 2), line(120000.0, 1)]);
        assert!(totals_match(220000.0, calculated));
    }

    #[test]
    fn test_totals_match_boundary_inclusive() {
        // A difference of exactly 0.01 is still accepted
        assert!(totals_match(100.01, Decimal::new(10000, 2)));
        assert!(totals_match(99.99, Decimal::new(10000, 2)));
    }

    #[test]
    fn test_totals_match_outside_tolerance() {
        assert!(!totals_match(100.02, Decimal::new(10000, 2)));
        assert!(!totals_match(99.98, Decimal::new(10000, 2)));
    }

    #[test]
    fn test_totals_match_rejects_wrong_claim() {
        let calculated = order_total(&[line(50000.0, 2), line(120000.0, 1)]);
        assert!(!totals_match(999999.0, calculated));
    }

    #[test]
    fn test_rounding_half_up() {
        // 0.005 should round up to 0.01
        let value = Decimal::new(5, 3);
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(rounded.to_f64().unwrap(), 0.01);

        // 0.004 should round down to 0.00
        let value2 = Decimal::new(4, 3);
        let rounded2 = value2.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(rounded2.to_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_to_decimal_nan_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_infinity_becomes_zero() {
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_validate_line_ok() {
        assert!(validate_line(&line(25.0, 3)).is_ok());
        assert!(validate_line(&line(0.0, 1)).is_ok());
        assert!(validate_line(&line(MAX_PRICE, MAX_QUANTITY)).is_ok());
    }

    #[test]
    fn test_validate_line_zero_quantity() {
        assert!(validate_line(&line(10.0, 0)).is_err());
    }

    #[test]
    fn test_validate_line_negative_quantity() {
        assert!(validate_line(&line(10.0, -1)).is_err());
    }

    #[test]
    fn test_validate_line_quantity_over_max() {
        assert!(validate_line(&line(10.0, MAX_QUANTITY + 1)).is_err());
    }

    #[test]
    fn test_validate_line_nan_price() {
        assert!(validate_line(&line(f64::NAN, 1)).is_err());
    }

    #[test]
    fn test_validate_line_negative_price() {
        assert!(validate_line(&line(-5.0, 1)).is_err());
    }

    #[test]
    fn test_validate_line_price_over_max() {
        assert!(validate_line(&line(MAX_PRICE + 1.0, 1)).is_err());
    }
}
