//! Pure assertions over simulated swaps, for the verification layer only.
//!
//! Production control flow never consults these checks; the test suite (and
//! any off‑chain auditor) uses them to confirm that a `(pre_state, result)`
//! pair respects the constant‑product rule and moved the price in the
//! direction the request implies. A failed invariant is reported, never
//! thrown: callers decide whether it is fatal.

use crate::math::math_helpers::widen;
use crate::pool::cp_pool::{fee_discounted, PoolState, SwapDirection, SwapRequest, SwapResult};
use alloy_primitives::U512;

/// Constant‑product drift across a swap.
///
/// Under this engine's asymmetric fee accounting (full input credited to
/// the reserve ledger, fee‑discounted input used inside the invariant), `k`
/// is not exactly preserved: flooring can pull it below `pre_k` by less
/// than one unit of the new input‑side reserve, and the fee wedge can push
/// it above. `passed` means the drift stayed inside those two bounds.
#[derive(Copy, Clone, Debug)]
pub struct ProductDrift {
    pub pre_k: U512,
    pub post_k: U512,
    pub passed: bool,
}

/// Price movement across a swap, compared exactly via cross‑multiplied
/// reserves (no fixed‑point rounding involved).
///
/// `pre_cross` is `pre.reserve0 * post.reserve1` and `post_cross` is
/// `post.reserve0 * pre.reserve1`; `post_cross > pre_cross` iff the price
/// strictly rose.
#[derive(Copy, Clone, Debug)]
pub struct PriceMove {
    pub pre_cross: U512,
    pub post_cross: U512,
    pub passed: bool,
}

/// Structured pass/fail report for one simulated swap.
#[derive(Copy, Clone, Debug)]
pub struct InvariantReport {
    pub constant_product: ProductDrift,
    pub price_move: PriceMove,
}

impl InvariantReport {
    #[inline]
    pub fn passed(&self) -> bool {
        self.constant_product.passed && self.price_move.passed
    }
}

/// Audits one swap: recomputes both invariants from the pre‑state, the
/// request, and the result the pool reported.
pub fn check_swap(
    pre: &PoolState,
    request: &SwapRequest,
    result: &SwapResult,
) -> InvariantReport {
    let post = &result.resulting_pool;

    let pre_k = widen(pre.reserve0()) * widen(pre.reserve1());
    let post_k = widen(post.reserve0()) * widen(post.reserve1());

    let (r_in, new_r_in) = match request.direction {
        SwapDirection::ZeroForOne => (pre.reserve0(), post.reserve0()),
        SwapDirection::OneForZero => (pre.reserve1(), post.reserve1()),
    };

    let amount_in_after_fee = fee_discounted(request.amount_in, pre.fee_bps());
    let slack = widen(new_r_in);

    // Flooring the counter-reserve loses strictly less than one unit of the
    // output side, i.e. less than new_r_in in k terms.
    let lower_ok = match post_k.checked_add(slack) {
        Some(bound) => bound >= pre_k,
        None => true,
    };

    // Fee wedge: crediting the full input while discounting it inside the
    // invariant scales k by at most (r_in + in) / (r_in + in_after_fee).
    let denominator = widen(r_in) + widen(amount_in_after_fee);
    let fee_delta = widen(request.amount_in - amount_in_after_fee);
    let upper_ok = match (pre_k / denominator)
        .checked_mul(fee_delta)
        .and_then(|wedge| pre_k.checked_add(wedge))
        .and_then(|bound| bound.checked_add(slack))
    {
        Some(bound) => post_k <= bound,
        None => true,
    };

    let constant_product = ProductDrift {
        pre_k,
        post_k,
        passed: lower_ok && upper_ok,
    };

    let pre_cross = widen(pre.reserve0()) * widen(post.reserve1());
    let post_cross = widen(post.reserve0()) * widen(pre.reserve1());
    let price_passed = if request.amount_in.is_zero() {
        pre_cross == post_cross
    } else {
        match request.direction {
            SwapDirection::ZeroForOne => post_cross > pre_cross,
            SwapDirection::OneForZero => post_cross < pre_cross,
        }
    };

    let price_move = PriceMove {
        pre_cross,
        post_cross,
        passed: price_passed,
    };

    InvariantReport {
        constant_product,
        price_move,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn e18(n: u64) -> U256 {
        U256::from(n) * U256::from(10u8).pow(U256::from(18u8))
    }

    fn thousand_thousand_pool() -> PoolState {
        PoolState::new(e18(1000), e18(1000), 30).unwrap()
    }

    #[test]
    fn honest_swap_passes_both_checks() {
        let pool = thousand_thousand_pool();
        let request = SwapRequest::new(SwapDirection::ZeroForOne, e18(100));
        let result = pool.swap(&request).unwrap();

        let report = check_swap(&pool, &request, &result);
        assert!(report.constant_product.passed);
        assert!(report.price_move.passed);
        assert!(report.passed());
    }

    #[test]
    fn both_directions_pass_across_fee_range() {
        for fee_bps in [0u32, 1, 30, 100, 500, 3000, 9000] {
            let pool = PoolState::new(e18(750), e18(1300), fee_bps).unwrap();
            for direction in [SwapDirection::ZeroForOne, SwapDirection::OneForZero] {
                let request = SwapRequest::new(direction, e18(42));
                let result = pool.swap(&request).unwrap();
                let report = check_swap(&pool, &request, &result);
                assert!(
                    report.passed(),
                    "fee {fee_bps} direction {direction:?} failed: {report:?}"
                );
            }
        }
    }

    #[test]
    fn zero_amount_swap_reports_unmoved_price() {
        let pool = thousand_thousand_pool();
        let request = SwapRequest::new(SwapDirection::ZeroForOne, U256::ZERO);
        let result = pool.swap(&request).unwrap();

        let report = check_swap(&pool, &request, &result);
        assert!(report.passed());
        assert_eq!(report.constant_product.pre_k, report.constant_product.post_k);
        assert_eq!(report.price_move.pre_cross, report.price_move.post_cross);
    }

    #[test]
    fn fabricated_result_fails_the_product_check() {
        let pool = thousand_thousand_pool();
        let request = SwapRequest::new(SwapDirection::ZeroForOne, e18(100));
        let honest = pool.swap(&request).unwrap();

        // Forge a pool that hands out far too much output.
        let forged = SwapResult {
            amount_out: honest.amount_out + e18(100),
            resulting_pool: PoolState::new(
                honest.resulting_pool.reserve0(),
                honest.resulting_pool.reserve1() - e18(100),
                pool.fee_bps(),
            )
            .unwrap(),
        };

        let report = check_swap(&pool, &request, &forged);
        assert!(!report.constant_product.passed);
        assert!(!report.passed());
    }

    #[test]
    fn wrong_direction_result_fails_the_price_check() {
        let pool = thousand_thousand_pool();
        let request = SwapRequest::new(SwapDirection::ZeroForOne, e18(100));
        let honest = pool.swap(&request).unwrap();

        // Claim the reserves moved the other way.
        let mirrored = SwapResult {
            amount_out: honest.amount_out,
            resulting_pool: PoolState::new(
                honest.resulting_pool.reserve1(),
                honest.resulting_pool.reserve0(),
                pool.fee_bps(),
            )
            .unwrap(),
        };

        let report = check_swap(&pool, &request, &mirrored);
        assert!(!report.price_move.passed);
    }

    #[test]
    fn report_carries_numeric_deltas() {
        let pool = thousand_thousand_pool();
        let request = SwapRequest::new(SwapDirection::OneForZero, e18(200));
        let result = pool.swap(&request).unwrap();

        let report = check_swap(&pool, &request, &result);
        assert_eq!(
            report.constant_product.pre_k,
            widen(e18(1000)) * widen(e18(1000))
        );
        assert!(report.constant_product.post_k > U512::ZERO);
        assert!(report.price_move.post_cross < report.price_move.pre_cross);
    }
}
