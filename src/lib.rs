//! Constant‑product swap simulation and IOC limit‑order matching in pure Rust.
//!
//! This crate exposes:
//! - A fixed‑point sqrt‑price codec (`math::price_codec`) for communicating
//!   price bounds as monotonic Q96 integers.
//! - An immutable in‑memory [`PoolState`] that can simulate constant‑product
//!   swaps with a flat basis‑point fee in either direction.
//! - An [`IocExecutor`] that splits a limit order into filled and cancelled
//!   portions via integer bisection against cloned pool snapshots.
//! - Pure invariant checks (`invariant`) for auditing simulated swaps.
//!
//! # Examples
//!
//! ## Simulating a swap
//! ```
//! use cpmm_ioc_engine::{PoolState, SwapDirection, SwapRequest, U256};
//!
//! let unit = U256::from(10u8).pow(U256::from(18u8));
//! let pool = PoolState::new(unit * U256::from(1000u16), unit * U256::from(1000u16), 30)?;
//!
//! let request = SwapRequest::new(SwapDirection::ZeroForOne, unit * U256::from(100u8));
//! let result = pool.swap(&request)?;
//! assert!(result.amount_out > U256::ZERO);
//! # Ok::<(), cpmm_ioc_engine::error::Error>(())
//! ```
//!
//! ## Executing an immediate‑or‑cancel limit order
//! ```
//! use cpmm_ioc_engine::{
//!     math::price_codec, IocExecutor, LimitOrder, PoolState, SwapDirection, U256,
//! };
//!
//! let unit = U256::from(10u8).pow(U256::from(18u8));
//! let pool = PoolState::new(unit * U256::from(1000u16), unit * U256::from(1000u16), 30)?;
//!
//! // Sell currency0, but stop before the pool price crosses 1.2.
//! let limit = price_codec::encode(U256::from(12u8), U256::from(10u8))?;
//! let order = LimitOrder::new(SwapDirection::ZeroForOne, unit * U256::from(500u16), limit);
//!
//! let outcome = IocExecutor::default().execute(&pool, &order)?;
//! assert_eq!(
//!     outcome.filled_amount_in + outcome.cancelled_amount_in,
//!     order.requested_amount_in
//! );
//! # Ok::<(), cpmm_ioc_engine::error::Error>(())
//! ```

pub use alloy_primitives::{U256, U512};

pub mod error;
pub mod invariant;
pub mod math;
pub mod pool;

pub use pool::cp_pool::{PoolState, SwapDirection, SwapRequest, SwapResult};
pub use pool::ioc::{FillOutcome, IocExecutor, LimitOrder};

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

/// Fee denominator: 10_000 bps == 100%.
pub const BPS_DENOMINATOR: U256 = U256::from_limbs([10000, 0, 0, 0]);
