//! Common utility functions for revenue calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal to the nearest whole number, sending halves towards
/// positive infinity.
///
/// Positive midpoints round up and negative midpoints round towards zero,
/// so `2.5` becomes `3` and `-2.5` becomes `-2`.
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to zero decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use growth_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(7.2)), dec!(7));
/// assert_eq!(round_half_up(dec!(2.5)), dec!(3));
/// assert_eq!(round_half_up(dec!(-2.5)), dec!(-2));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}

/// Sum of the first `n` positive integers, `n * (n + 1) / 2`.
///
/// ```
/// use growth_core::calculations::common::triangular;
///
/// assert_eq!(triangular(12), 78);
/// ```
pub fn triangular(n: u32) -> u64 {
    let n = u64::from(n);
    n * (n + 1) / 2
}
