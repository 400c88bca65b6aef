use crate::error::{Error, StateError};
use crate::math::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
use crate::{Q96, RESOLUTION};
use alloy_primitives::U256;

/// Amount of token0 that `liquidity` spans between two sqrt prices,
/// `liquidity * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)`.
///
/// Unlike the liquidity helpers this does not sort its arguments: the caller
/// passes `sqrt_ratio_a_x96 < sqrt_ratio_b_x96` or gets
/// `StateError::InvalidRange`. `round_up` selects the rounding the pool uses
/// for amounts owed to it.
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    if sqrt_ratio_a_x96 >= sqrt_ratio_b_x96 || sqrt_ratio_a_x96.is_zero() {
        return Err(StateError::InvalidRange.into());
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_b_x96)?,
            sqrt_ratio_a_x96,
        )?)
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_ratio_b_x96)? / sqrt_ratio_a_x96)
    }
}

/// Amount of token1 that `liquidity` spans between two sqrt prices,
/// `liquidity * (sqrt_b - sqrt_a)`. Same ordering rule as
/// [`get_amount_0_delta`].
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    if sqrt_ratio_a_x96 >= sqrt_ratio_b_x96 {
        return Err(StateError::InvalidRange.into());
    }
    let liquidity = U256::from(liquidity);

    if round_up {
        Ok(mul_div_rounding_up(
            liquidity,
            sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
            Q96,
        )?)
    } else {
        Ok(mul_div(liquidity, sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)?)
    }
}
