use crate::error::{DomainError, Error, MathError};
use crate::math::math_helpers::{mul_div, to_f64};
use crate::math::price_codec;
use crate::BPS_DENOMINATOR;
use alloy_primitives::U256;

/// Swap direction over the pair.
///
/// `ZeroForOne` sells currency0 into the pool, pushing the pool price
/// (`reserve0 / reserve1`) up; `OneForZero` does the opposite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    ZeroForOne,
    OneForZero,
}

impl SwapDirection {
    #[inline]
    pub fn is_zero_for_one(self) -> bool {
        matches!(self, SwapDirection::ZeroForOne)
    }
}

/// A single requested trade against a pool snapshot.
///
/// `amount_in` of zero is a legal no‑op request: it yields zero output and
/// an unchanged pool, by explicit policy.
#[derive(Copy, Clone, Debug)]
pub struct SwapRequest {
    pub direction: SwapDirection,
    pub amount_in: U256,
}

impl SwapRequest {
    #[inline]
    pub fn new(direction: SwapDirection, amount_in: U256) -> Self {
        Self {
            direction,
            amount_in,
        }
    }
}

/// Output of one simulated swap. Owned by the caller; never aliases the
/// input pool.
#[derive(Copy, Clone, Debug)]
pub struct SwapResult {
    pub amount_out: U256,
    pub resulting_pool: PoolState,
}

/// Immutable reserve state for a single constant‑product pair with a flat
/// basis‑point fee on input.
///
/// Every swap simulation produces a fresh `PoolState`; the reserves are
/// only ever replaced together, never partially updated. Callers running
/// speculative what‑if trials take a [`PoolState::snapshot`] and work on
/// that copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PoolState {
    reserve0: U256,
    reserve1: U256,
    fee_bps: u32,
}

/// Applies the flat input fee: `floor(amount * (10000 - fee_bps) / 10000)`.
///
/// Split into quotient and remainder parts so the product never leaves 256
/// bits; the result is the exact floor.
#[inline]
pub(crate) fn fee_discounted(amount: U256, fee_bps: u32) -> U256 {
    let keep = U256::from(10_000 - fee_bps);
    let (quotient, remainder) = amount.div_rem(BPS_DENOMINATOR);
    quotient * keep + (remainder * keep) / BPS_DENOMINATOR
}

impl PoolState {
    /// Creates a pool from externally sourced reserves and fee.
    ///
    /// Both reserves must be strictly positive and the fee must stay below
    /// 10_000 bps (a fee can never consume the whole input).
    pub fn new(reserve0: U256, reserve1: U256, fee_bps: u32) -> Result<Self, Error> {
        if reserve0.is_zero() || reserve1.is_zero() {
            return Err(DomainError::EmptyReserve.into());
        }
        if fee_bps >= 10_000 {
            return Err(DomainError::FeeOutOfRange.into());
        }
        Ok(Self {
            reserve0,
            reserve1,
            fee_bps,
        })
    }

    #[inline]
    pub fn reserve0(&self) -> U256 {
        self.reserve0
    }

    #[inline]
    pub fn reserve1(&self) -> U256 {
        self.reserve1
    }

    #[inline]
    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    /// Returns an independent copy with no shared mutable aliasing.
    ///
    /// `PoolState` is a plain value so this is a bitwise copy, but callers
    /// should go through `snapshot` wherever the intent is a speculative
    /// trial, so the contract survives a change of storage representation.
    #[inline]
    pub fn snapshot(&self) -> Self {
        *self
    }

    /// The pool price `reserve0 / reserve1` in Q96 sqrt encoding.
    pub fn sqrt_price_x96(&self) -> Result<U256, Error> {
        price_codec::encode(self.reserve0, self.reserve1)
    }

    /// Approximate spot price `reserve0 / reserve1` for diagnostics.
    pub fn price(&self) -> f64 {
        to_f64(self.reserve0) / to_f64(self.reserve1)
    }

    /// Simulates one swap under the constant‑product rule, returning the
    /// realized output and the replacement pool state.
    ///
    /// Fee accounting convention, matching the settlement layer this
    /// engine feeds: the **full** input amount is credited to the
    /// input‑side reserve, while the counter‑reserve is derived from the
    /// invariant using only the **fee‑discounted** input:
    ///
    /// ```text
    /// new_r_out = floor(r_in * r_out / (r_in + fee_discounted(amount_in)))
    /// amount_out = r_out - new_r_out
    /// ```
    ///
    /// A zero `amount_in` is a no‑op: zero output, pool returned unchanged.
    pub fn swap(&self, request: &SwapRequest) -> Result<SwapResult, Error> {
        if self.reserve0.is_zero() || self.reserve1.is_zero() {
            return Err(DomainError::EmptyReserve.into());
        }
        if request.amount_in.is_zero() {
            return Ok(SwapResult {
                amount_out: U256::ZERO,
                resulting_pool: *self,
            });
        }

        let (r_in, r_out) = match request.direction {
            SwapDirection::ZeroForOne => (self.reserve0, self.reserve1),
            SwapDirection::OneForZero => (self.reserve1, self.reserve0),
        };

        let amount_in_after_fee = fee_discounted(request.amount_in, self.fee_bps);
        let new_r_in = r_in
            .checked_add(request.amount_in)
            .ok_or(MathError::Overflow)?;

        // amount_in_after_fee <= amount_in, so this denominator cannot
        // overflow once new_r_in has been checked.
        let new_r_out = mul_div(r_in, r_out, r_in + amount_in_after_fee)?;
        let amount_out = r_out - new_r_out;

        let resulting_pool = match request.direction {
            SwapDirection::ZeroForOne => Self {
                reserve0: new_r_in,
                reserve1: new_r_out,
                fee_bps: self.fee_bps,
            },
            SwapDirection::OneForZero => Self {
                reserve0: new_r_out,
                reserve1: new_r_in,
                fee_bps: self.fee_bps,
            },
        };

        Ok(SwapResult {
            amount_out,
            resulting_pool,
        })
    }
}
