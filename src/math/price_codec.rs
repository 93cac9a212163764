//! Fixed‑point sqrt‑price codec.
//!
//! Prices cross the engine boundary as `floor(sqrt(price) * 2^96)` integers
//! (the Q96 sqrt‑price convention), so that a settlement layer can compare
//! limits with plain integer ordering. All rounding policy lives here:
//! `encode` floors, never rounds up, so repeated conversions stay
//! conservative with respect to the invariant checks.

use crate::error::{DomainError, Error};
use crate::math::math_helpers::{mul_div, sqrt, to_f64};
use crate::{Q192, RESOLUTION};
use alloy_primitives::U256;

/// Encodes the price ratio `numerator / denominator` as a Q96 sqrt price:
/// `floor(sqrt(numerator / denominator) * 2^96)`.
///
/// Computed as the integer square root of `floor(numerator * 2^192 /
/// denominator)`, keeping full 512‑bit precision through the scaling so the
/// only rounding is the final floor. The encoding is monotonic in the
/// underlying ratio, which the IOC bisection relies on.
///
/// Errors with `DomainError` if either side of the ratio is zero and with
/// `MathError::Overflow` if the scaled ratio exceeds 256 bits (ratio >=
/// 2^64).
pub fn encode(numerator: U256, denominator: U256) -> Result<U256, Error> {
    if numerator.is_zero() || denominator.is_zero() {
        return Err(DomainError::NonPositivePrice.into());
    }

    let ratio_x192 = mul_div(numerator, Q192, denominator)?;
    Ok(sqrt(ratio_x192))
}

/// Decodes a Q96 sqrt price back into an approximate price ratio:
/// `(x / 2^96)^2`.
///
/// Lossy by construction (f64 mantissa plus the sqrt scaling); intended for
/// diagnostics and display, never as an invertibility guarantee.
pub fn decode(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = to_f64(sqrt_price_x96) / 2f64.powi(RESOLUTION as i32);
    sqrt_price * sqrt_price
}
