use crate::error::MathError;
use crate::math::full_math::mul_div;
use crate::{Q96, RESOLUTION};
use alloy_primitives::U256;

#[inline]
fn sorted(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Liquidity a range could support if `amount0` of token0 were the only
/// constraint. The two prices may be passed in either order.
///
/// Fails with `MathError::DivisionByZero` for a zero-width range.
pub fn get_liquidity_for_amount0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<U256, MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_a_x96 == sqrt_ratio_b_x96 {
        return Err(MathError::DivisionByZero);
    }

    let intermediate = mul_div(sqrt_ratio_a_x96, sqrt_ratio_b_x96, Q96)?;
    mul_div(amount0, intermediate, sqrt_ratio_b_x96 - sqrt_ratio_a_x96)
}

/// Liquidity a range could support if `amount1` of token1 were the only
/// constraint. The two prices may be passed in either order.
///
/// Fails with `MathError::DivisionByZero` for a zero-width range.
pub fn get_liquidity_for_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<U256, MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_a_x96 == sqrt_ratio_b_x96 {
        return Err(MathError::DivisionByZero);
    }

    mul_div(amount1, Q96, sqrt_ratio_b_x96 - sqrt_ratio_a_x96)
}

/// Maximum liquidity mintable from `amount0` and `amount1` at the current
/// price: token0 only below the range, token1 only above it, and the smaller
/// of the two one-sided estimates inside it.
pub fn get_liquidity_for_amounts(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<U256, MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_price_x96 <= sqrt_ratio_a_x96 {
        get_liquidity_for_amount0(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount0)
    } else if sqrt_price_x96 < sqrt_ratio_b_x96 {
        let liquidity0 = get_liquidity_for_amount0(sqrt_price_x96, sqrt_ratio_b_x96, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(sqrt_ratio_a_x96, sqrt_price_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount1(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount1)
    }
}

/// Token0 held by `liquidity` across the range, rounded down.
pub fn get_amount0_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<U256, MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_a_x96.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let shifted = mul_div(
        U256::from(liquidity) << RESOLUTION,
        sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
        sqrt_ratio_b_x96,
    )?;
    Ok(shifted / sqrt_ratio_a_x96)
}

/// Token1 held by `liquidity` across the range, rounded down.
pub fn get_amount1_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<U256, MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    mul_div(U256::from(liquidity), sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)
}

/// `(amount0, amount1)` held by `liquidity` at the current price.
pub fn get_amounts_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<(U256, U256), MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_price_x96 <= sqrt_ratio_a_x96 {
        Ok((
            get_amount0_for_liquidity(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity)?,
            U256::ZERO,
        ))
    } else if sqrt_price_x96 < sqrt_ratio_b_x96 {
        Ok((
            get_amount0_for_liquidity(sqrt_price_x96, sqrt_ratio_b_x96, liquidity)?,
            get_amount1_for_liquidity(sqrt_ratio_a_x96, sqrt_price_x96, liquidity)?,
        ))
    } else {
        Ok((
            U256::ZERO,
            get_amount1_for_liquidity(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity)?,
        ))
    }
}
