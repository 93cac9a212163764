use crate::error::{DomainError, Error};
use crate::math::math_helpers::mul_div;
use crate::pool::cp_pool::{PoolState, SwapDirection, SwapRequest};
use crate::BPS_DENOMINATOR;
use alloy_primitives::U256;

/// An immediate‑or‑cancel intent: trade up to `requested_amount_in`, but
/// stop before the pool price crosses `sqrt_price_limit_x96` in the
/// direction adverse to the trader.
#[derive(Copy, Clone, Debug)]
pub struct LimitOrder {
    pub direction: SwapDirection,
    pub requested_amount_in: U256,
    pub sqrt_price_limit_x96: U256,
}

impl LimitOrder {
    #[inline]
    pub fn new(
        direction: SwapDirection,
        requested_amount_in: U256,
        sqrt_price_limit_x96: U256,
    ) -> Self {
        Self {
            direction,
            requested_amount_in,
            sqrt_price_limit_x96,
        }
    }
}

/// The filled/cancelled split of an IOC order.
///
/// `filled_amount_in + cancelled_amount_in == requested_amount_in` always.
/// `converged == false` means the bisection hit its iteration cap before
/// reaching tolerance: the fill is still a valid, conservative
/// (under‑filling) bound, but callers must not treat it as exact.
#[derive(Copy, Clone, Debug)]
pub struct FillOutcome {
    pub filled_amount_in: U256,
    pub cancelled_amount_in: U256,
    pub amount_out: U256,
    pub final_pool: PoolState,
    pub converged: bool,
}

/// Derives a sqrt‑price limit from a slippage tolerance in basis points
/// relative to the current price.
///
/// Handy when building user‑facing APIs: a `ZeroForOne` trade drives the
/// pool price up, so its limit sits above spot; `OneForZero` below.
pub fn sqrt_price_limit_from_tolerance(
    sqrt_price_x96: U256,
    direction: SwapDirection,
    tolerance_bps: u32,
) -> Result<U256, Error> {
    let scaled = match direction {
        SwapDirection::ZeroForOne => 10_000u32.saturating_add(tolerance_bps),
        SwapDirection::OneForZero => 10_000u32.saturating_sub(tolerance_bps),
    };
    Ok(mul_div(sqrt_price_x96, U256::from(scaled), BPS_DENOMINATOR)?)
}

/// Splits IOC orders into filled and cancelled portions by bisecting on the
/// input amount.
///
/// The post‑swap price is monotonic in the input amount (strictly rising
/// for `ZeroForOne`, strictly falling for `OneForZero`), so a plain integer
/// bisection over `[0, requested_amount_in]` finds the largest fill that
/// does not cross the limit. Every trial runs against its own pool
/// snapshot; the original pool is never mutated.
#[derive(Copy, Clone, Debug)]
pub struct IocExecutor {
    /// Search stops once `high - low` drops to this granularity, e.g. the
    /// smallest meaningful unit of the input currency.
    pub tolerance: U256,
    /// Hard cap on bisection steps, guaranteeing termination regardless of
    /// tolerance.
    pub max_iterations: u32,
}

impl Default for IocExecutor {
    fn default() -> Self {
        Self {
            tolerance: U256::ONE,
            max_iterations: 128,
        }
    }
}

impl IocExecutor {
    pub fn new(tolerance: U256, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Executes an IOC order against a pool snapshot.
    ///
    /// Outcomes, in order of evaluation:
    /// 1. The pool price already sits at or beyond the limit: zero fill,
    ///    everything cancelled, pool returned unchanged.
    /// 2. The full requested amount stays inside the limit (price exactly
    ///    equal to the limit counts as not crossed): complete fill.
    /// 3. Otherwise, bisection narrows the fill boundary; the reported fill
    ///    is the highest amount known not to cross.
    ///
    /// The returned `amount_out` and `final_pool` always come from one
    /// fresh, authoritative swap of `filled_amount_in` against the original
    /// snapshot — never from a reused bisection trial.
    pub fn execute(&self, pool: &PoolState, order: &LimitOrder) -> Result<FillOutcome, Error> {
        if order.requested_amount_in.is_zero() {
            return Err(DomainError::NonPositiveAmount.into());
        }
        if order.sqrt_price_limit_x96.is_zero() {
            return Err(DomainError::NonPositivePrice.into());
        }

        let limit = order.sqrt_price_limit_x96;
        let spot = pool.sqrt_price_x96()?;

        let already_beyond = match order.direction {
            SwapDirection::ZeroForOne => spot >= limit,
            SwapDirection::OneForZero => spot <= limit,
        };
        if already_beyond {
            return Ok(FillOutcome {
                filled_amount_in: U256::ZERO,
                cancelled_amount_in: order.requested_amount_in,
                amount_out: U256::ZERO,
                final_pool: pool.snapshot(),
                converged: true,
            });
        }

        let full = pool.snapshot().swap(&SwapRequest::new(
            order.direction,
            order.requested_amount_in,
        ))?;
        if !crossed(order.direction, full.resulting_pool.sqrt_price_x96()?, limit) {
            return Ok(FillOutcome {
                filled_amount_in: order.requested_amount_in,
                cancelled_amount_in: U256::ZERO,
                amount_out: full.amount_out,
                final_pool: full.resulting_pool,
                converged: true,
            });
        }

        // low is known not to cross, high is known to cross.
        let mut low = U256::ZERO;
        let mut high = order.requested_amount_in;
        for _ in 0..self.max_iterations {
            if high - low <= self.tolerance {
                break;
            }
            let mid = low + ((high - low) >> 1);
            let trial = pool.snapshot().swap(&SwapRequest::new(order.direction, mid))?;
            if crossed(order.direction, trial.resulting_pool.sqrt_price_x96()?, limit) {
                high = mid;
            } else {
                low = mid;
            }
        }
        let converged = high - low <= self.tolerance;

        let settled = pool.swap(&SwapRequest::new(order.direction, low))?;

        Ok(FillOutcome {
            filled_amount_in: low,
            cancelled_amount_in: order.requested_amount_in - low,
            amount_out: settled.amount_out,
            final_pool: settled.resulting_pool,
            converged,
        })
    }
}

/// Whether `sqrt_price_x96` has moved strictly past the limit in the
/// adverse direction. Equality is inclusive: a price exactly on the limit
/// has not crossed.
#[inline]
fn crossed(direction: SwapDirection, sqrt_price_x96: U256, limit: U256) -> bool {
    match direction {
        SwapDirection::ZeroForOne => sqrt_price_x96 > limit,
        SwapDirection::OneForZero => sqrt_price_x96 < limit,
    }
}
