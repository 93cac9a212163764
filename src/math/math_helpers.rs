use crate::error::MathError;
use alloy_primitives::{U256, U512};

const U256_ONE: U256 = U256::ONE;
const U256_TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

/// Computes `a * b / denominator` with full 512‑bit intermediate precision,
/// flooring the result and returning a `MathError` on overflow or division
/// by zero.
///
/// This mirrors the Solidity `FullMath.mulDiv` behavior and underpins both
/// the constant‑product counter‑reserve computation and the sqrt‑price
/// encoding, where `reserve0 * reserve1` routinely exceeds 256 bits.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);

    let (mut prod1, borrow1) = mm.overflowing_sub(prod0);
    if borrow1 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0.wrapping_div(denominator));
    }

    if denominator <= prod1 {
        return Err(MathError::Overflow);
    }

    let remainder = a.mul_mod(b, denominator);
    let (prod0_new, borrow2) = prod0.overflowing_sub(remainder);
    prod0 = prod0_new;
    if borrow2 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    let twos = denominator & denominator.wrapping_neg();
    denominator = denominator.wrapping_div(twos);
    prod0 = prod0.wrapping_div(twos);

    let twos_adj = twos
        .wrapping_neg()
        .wrapping_div(twos)
        .wrapping_add(U256_ONE);
    prod0 |= prod1.wrapping_mul(twos_adj);

    let mut inv = U256_THREE.wrapping_mul(denominator) ^ U256_TWO;

    macro_rules! newton_iteration {
        () => {
            inv = inv.wrapping_mul(U256_TWO.wrapping_sub(denominator.wrapping_mul(inv)))
        };
    }

    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();

    Ok(prod0.wrapping_mul(inv))
}

/// Floor integer square root via Newton's method.
///
/// The initial guess `2^ceil(bits/2)` bounds the true root from above, so
/// the iteration decreases monotonically and stops exactly at
/// `floor(sqrt(x))`. This is the flooring the sqrt‑price encoding depends
/// on: never one too high.
pub fn sqrt(x: U256) -> U256 {
    if x.is_zero() {
        return U256::ZERO;
    }

    let mut z = U256::ONE << ((x.bit_len() + 1) / 2);
    let mut y = (z + x / z) >> 1;
    while y < z {
        z = y;
        y = (z + x / z) >> 1;
    }
    z
}

/// Zero‑extends a `U256` into a `U512`.
///
/// Used where an exact double‑width product (`reserve0 * reserve1`) must be
/// carried around rather than immediately divided back down.
#[inline(always)]
pub fn widen(x: U256) -> U512 {
    let limbs = x.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

/// Lossy conversion of a `U256` to `f64`, for diagnostics and approximate
/// price display only. Precision is bounded by the 53‑bit f64 mantissa.
#[inline(always)]
pub fn to_f64(x: U256) -> f64 {
    x.as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * 18446744073709551616.0 + limb as f64)
}
