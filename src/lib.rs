//! Making-amount solver for Uniswap V3–style concentrated liquidity.
//!
//! Given a position range, the pool's current sqrt price and two desired
//! deposits, works out which token is oversupplied for the range and how much
//! of it must be swapped into the other token before minting, so that both
//! balances are used in full.
//!
//! This crate exposes:
//! - Fixed-point primitives (`math::*`): `FullMath`-style `mul_div`, tick
//!   math, one-sided liquidity and amount deltas, all bit-exact with the
//!   on-chain libraries.
//! - [`TickRange`], a validated tick range with helpers to build one around the
//!   current tick.
//! - The solver itself in [`making_amount`].
//!
//! # Examples
//!
//! ```no_run
//! use clmm_making_amount::{solve_making_amount, TickRange, U256};
//! use std::str::FromStr;
//!
//! // WETH/USDC at a pinned snapshot price
//! let sqrt_price = U256::from_str("3487098153424058120578628").unwrap();
//! let range = TickRange::around_sqrt_price(sqrt_price, 60, 6, 5).unwrap();
//!
//! let one_weth = U256::from(10u64.pow(18));
//! let usdc_2000 = U256::from(2_000_000_000u64);
//! let result = solve_making_amount(range, sqrt_price, one_weth, usdc_2000).unwrap();
//!
//! assert!(result.is_making_zero);
//! println!(
//!     "swap {} WETH for ~{} USDC",
//!     result.making_amount, result.estimate_taking_amount
//! );
//! ```

pub use alloy_primitives::{Address, U256};

pub mod error;
pub mod making_amount;
pub mod math;
pub mod range;

#[cfg(test)]
mod proptest_properties;

pub use error::{Error, MathError, StateError};
pub use making_amount::{
    get_making_amount, solve_making_amount, solve_making_amount_at_sqrt_ratios, MakingAmount,
    MakingAmountParams,
};
pub use range::TickRange;

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);

/// Largest on-chain (`uint128`) liquidity, used to read a range's token ratio.
pub const MAX_LIQUIDITY: u128 = u128::MAX;
