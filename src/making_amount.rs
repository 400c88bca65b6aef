//! Making-amount solver.
//!
//! Given two desired deposits and a position range, works out which token is
//! in surplus relative to the ratio the range needs at the current price and
//! how much of it has to be swapped away first, so that both balances can be
//! minted in full.
//!
//! The token ratio of the range is read off `get_amount_*_delta` at
//! [`MAX_LIQUIDITY`](crate::MAX_LIQUIDITY): `optimal0 : optimal1` is how much
//! token0 the range consumes per unit of token1. Converting `m` of the surplus
//! token at exchange rate `R` then has to satisfy
//!
//! ```text
//! optimal1 * (amount0 - m)     == optimal0 * (amount1 + m * R)     // making token0
//! optimal1 * (amount0 + m / R) == optimal0 * (amount1 - m)         // making token1
//! ```
//!
//! which is solved in closed form. How `R` is represented depends on the
//! magnitude of the price, see [`RateBranch`].

use crate::error::{Error, MathError, StateError};
use crate::math::liquidity_amounts::{get_liquidity_for_amount0, get_liquidity_for_amount1};
use crate::math::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta};
use crate::math::wide_math::{checked_add, checked_mul, mul_div_wide, narrow, widen, U1024};
use crate::range::TickRange;
use crate::{MAX_LIQUIDITY, Q96};
use alloy_primitives::{Address, U256};
use tracing::{debug, trace};

/// Which token to give up, how much of it, and what it is expected to fetch
/// at the snapshot price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MakingAmount {
    /// `true` when token0 is in surplus and is swapped into token1.
    pub is_making_zero: bool,
    pub making_amount: U256,
    pub estimate_taking_amount: U256,
}

/// Inputs for [`get_making_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MakingAmountParams {
    pub token0: Address,
    pub token1: Address,
    pub tick_range: TickRange,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
}

/// How the exchange rate is carried through the solve.
///
/// For `sqrtPrice^2 >> 192 != 0` (token1 per token0 at least 1) the rate is
/// held directly as `sqrtPrice^2 / 2^96`. Below that, the direct rate would
/// truncate towards zero, so the reciprocal `(2^96 / sqrtPrice)^2` (token0 per
/// token1) is used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateBranch {
    Direct,
    Reciprocal,
}

/// Picks the rate representation for `sqrt_price_x96`.
pub fn rate_branch(sqrt_price_x96: U256) -> Result<RateBranch, MathError> {
    let sqrt_price = widen(sqrt_price_x96);
    let price_x192 = checked_mul(sqrt_price, sqrt_price)?;
    if (price_x192 >> 192usize).is_zero() {
        Ok(RateBranch::Reciprocal)
    } else {
        Ok(RateBranch::Direct)
    }
}

/// Validates token order and solves for `params` at `sqrt_price_x96`.
///
/// `sqrt_price_x96` is a single snapshot of the pool price: it is read once by
/// the caller and used for every step.
pub fn get_making_amount(
    params: &MakingAmountParams,
    sqrt_price_x96: U256,
) -> Result<MakingAmount, Error> {
    if params.token0 >= params.token1 {
        return Err(StateError::InvalidTokenOrder.into());
    }
    solve_making_amount(
        params.tick_range,
        sqrt_price_x96,
        params.amount0_desired,
        params.amount1_desired,
    )
}

/// Solves for a tick range, converting its ticks with
/// [`get_sqrt_ratio_at_tick`](crate::math::tick_math::get_sqrt_ratio_at_tick).
pub fn solve_making_amount(
    tick_range: TickRange,
    sqrt_price_x96: U256,
    amount0_desired: U256,
    amount1_desired: U256,
) -> Result<MakingAmount, Error> {
    let (sqrt_ratio_lower_x96, sqrt_ratio_upper_x96) = tick_range.sqrt_ratios()?;
    solve_making_amount_at_sqrt_ratios(
        sqrt_ratio_lower_x96,
        sqrt_ratio_upper_x96,
        sqrt_price_x96,
        amount0_desired,
        amount1_desired,
    )
}

/// Solves for a range already expressed as sqrt prices.
///
/// The current price must lie strictly inside the range, otherwise one side
/// of the deposit cannot be used at all and `StateError::InvalidRange` is
/// returned. A zero-width range fails with `MathError::DivisionByZero`.
pub fn solve_making_amount_at_sqrt_ratios(
    sqrt_ratio_lower_x96: U256,
    sqrt_ratio_upper_x96: U256,
    sqrt_price_x96: U256,
    amount0_desired: U256,
    amount1_desired: U256,
) -> Result<MakingAmount, Error> {
    if sqrt_ratio_lower_x96 == sqrt_ratio_upper_x96 {
        return Err(MathError::DivisionByZero.into());
    }
    if sqrt_ratio_lower_x96 > sqrt_ratio_upper_x96
        || sqrt_price_x96 <= sqrt_ratio_lower_x96
        || sqrt_price_x96 >= sqrt_ratio_upper_x96
    {
        return Err(StateError::InvalidRange.into());
    }

    let system = LinearSystem::new(
        sqrt_ratio_lower_x96,
        sqrt_ratio_upper_x96,
        sqrt_price_x96,
        amount0_desired,
        amount1_desired,
    )?;

    let branch = rate_branch(sqrt_price_x96)?;
    let (making_amount, estimate_taking_amount) = match branch {
        RateBranch::Direct => solve_with_direct_rate(&system, sqrt_price_x96)?,
        RateBranch::Reciprocal => solve_with_reciprocal_rate(&system, sqrt_price_x96)?,
    };

    debug!(
        ?branch,
        is_making_zero = system.is_making_zero,
        %making_amount,
        %estimate_taking_amount,
        "solved making amount"
    );

    Ok(MakingAmount {
        is_making_zero: system.is_making_zero,
        making_amount,
        estimate_taking_amount,
    })
}

/// Desired amounts and the range's optimal amounts, widened for the solve.
#[derive(Debug, Clone, Copy)]
struct LinearSystem {
    is_making_zero: bool,
    amount0: U1024,
    amount1: U1024,
    optimal0: U1024,
    optimal1: U1024,
}

impl LinearSystem {
    fn new(
        sqrt_ratio_lower_x96: U256,
        sqrt_ratio_upper_x96: U256,
        sqrt_price_x96: U256,
        amount0_desired: U256,
        amount1_desired: U256,
    ) -> Result<Self, Error> {
        let liquidity0 =
            get_liquidity_for_amount0(sqrt_price_x96, sqrt_ratio_upper_x96, amount0_desired)?;
        let liquidity1 =
            get_liquidity_for_amount1(sqrt_ratio_lower_x96, sqrt_price_x96, amount1_desired)?;

        let optimal0 =
            get_amount_0_delta(sqrt_price_x96, sqrt_ratio_upper_x96, MAX_LIQUIDITY, true)?;
        let optimal1 =
            get_amount_1_delta(sqrt_ratio_lower_x96, sqrt_price_x96, MAX_LIQUIDITY, true)?;

        trace!(
            %liquidity0,
            %liquidity1,
            %optimal0,
            %optimal1,
            "range ratio"
        );

        Ok(Self {
            is_making_zero: liquidity0 > liquidity1,
            amount0: widen(amount0_desired),
            amount1: widen(amount1_desired),
            optimal0: widen(optimal0),
            optimal1: widen(optimal1),
        })
    }

    /// Cross product measuring how far the surplus token overshoots the
    /// range ratio: `amount0 * optimal1 - amount1 * optimal0` when making
    /// token0, the negation otherwise.
    ///
    /// The liquidity comparison and the cross product can disagree in sign
    /// only when the amounts sit on the ratio line up to rounding; that case
    /// clamps to zero.
    fn excess(&self) -> Result<U1024, MathError> {
        let held0 = checked_mul(self.amount0, self.optimal1)?;
        let held1 = checked_mul(self.amount1, self.optimal0)?;
        let (surplus, scarce) = if self.is_making_zero {
            (held0, held1)
        } else {
            (held1, held0)
        };
        if surplus < scarce {
            trace!("deposit already on the range ratio, clamping excess to zero");
        }
        Ok(surplus.saturating_sub(scarce))
    }
}

/// Solve with `rate_x96 = sqrtPrice^2 / 2^96`, token1 per token0 in Q96.
///
/// Do not square the rate again as `(sqrtPrice^2 / 2^96)^2`: that value is not
/// a price and cannot meet the reciprocal branch at `sqrtPrice == 2^96`. The
/// Q96 rate is kept instead and the equations carry the extra `Q96` factor.
///
///   making token0: m = excess * Q96 / (optimal1 * Q96 + optimal0 * rate_x96),
///                  taking = m * rate_x96 / Q96
///   making token1: m = excess * rate_x96 / (optimal1 * Q96 + optimal0 * rate_x96),
///                  taking = m * Q96 / rate_x96
fn solve_with_direct_rate(
    system: &LinearSystem,
    sqrt_price_x96: U256,
) -> Result<(U256, U256), MathError> {
    let q96 = widen(Q96);
    let sqrt_price = widen(sqrt_price_x96);
    let rate_x96 = mul_div_wide(sqrt_price, sqrt_price, q96)?;

    let denominator = checked_add(
        checked_mul(system.optimal1, q96)?,
        checked_mul(system.optimal0, rate_x96)?,
    )?;
    let excess = system.excess()?;

    let (making, taking) = if system.is_making_zero {
        let making = mul_div_wide(excess, q96, denominator)?;
        (making, mul_div_wide(making, rate_x96, q96)?)
    } else {
        let making = mul_div_wide(excess, rate_x96, denominator)?;
        (making, mul_div_wide(making, q96, rate_x96)?)
    };

    Ok((narrow(making)?, narrow(taking)?))
}

/// Solve with `rate = (2^96 / sqrtPrice)^2`, token0 per token1 as an integer.
///
///   making token0: m = excess * rate / (optimal0 + optimal1 * rate),
///                  taking = m / rate
///   making token1: m = excess / (optimal0 + optimal1 * rate),
///                  taking = m * rate
fn solve_with_reciprocal_rate(
    system: &LinearSystem,
    sqrt_price_x96: U256,
) -> Result<(U256, U256), MathError> {
    if sqrt_price_x96.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let inverse_sqrt_price = widen(Q96 / sqrt_price_x96);
    let rate = checked_mul(inverse_sqrt_price, inverse_sqrt_price)?;
    let one = U1024::from(1u8);

    let denominator = checked_add(system.optimal0, checked_mul(system.optimal1, rate)?)?;
    let excess = system.excess()?;

    let (making, taking) = if system.is_making_zero {
        let making = mul_div_wide(excess, rate, denominator)?;
        (making, mul_div_wide(making, one, rate)?)
    } else {
        let making = mul_div_wide(excess, one, denominator)?;
        (making, checked_mul(making, rate)?)
    };

    Ok((narrow(making)?, narrow(taking)?))
}
