//! Money helpers
//!
//! All amounts are `Decimal` currency units. Rounding happens only when a
//! value is presented (receipt lines, display totals); accumulation keeps
//! full precision.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Round to 2 decimal places, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a rounded amount with exactly two decimals, e.g. `13.50`
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(DECIMAL_PLACES);
    rounded.to_string()
}

/// Render a price delta for receipts: `+1.50`, `-0.50`; zero renders empty
pub fn format_delta(value: Decimal) -> Option<String> {
    if value.is_zero() {
        return None;
    }
    let sign = if value.is_sign_negative() { "-" } else { "+" };
    Some(format!("{}{}", sign, format_money(value.abs())))
}
