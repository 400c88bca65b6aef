//! Checked 1024-bit arithmetic for the making-amount linear system.
//!
//! Cross products of token amounts with the optimal amounts (up to 2^448) and
//! their product with a Q96 exchange rate (up to 2^672) do not fit in a
//! `U256`. Every operation here is checked and reports
//! `MathError::ArithmeticOverflow` instead of wrapping.

use crate::error::MathError;
use alloy_primitives::{Uint, U256};

pub type U1024 = Uint<1024, 16>;

/// Lossless widening of a `U256`.
pub fn widen(value: U256) -> U1024 {
    let mut limbs = [0u64; 16];
    limbs[..4].copy_from_slice(value.as_limbs());
    U1024::from_limbs(limbs)
}

/// Narrows back to `U256`, failing if any of the upper limbs are set.
pub fn narrow(value: U1024) -> Result<U256, MathError> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return Err(MathError::ArithmeticOverflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

pub fn checked_mul(a: U1024, b: U1024) -> Result<U1024, MathError> {
    a.checked_mul(b).ok_or(MathError::ArithmeticOverflow)
}

pub fn checked_add(a: U1024, b: U1024) -> Result<U1024, MathError> {
    a.checked_add(b).ok_or(MathError::ArithmeticOverflow)
}

pub fn checked_div(a: U1024, b: U1024) -> Result<U1024, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(a / b)
}

/// `floor(a * b / denominator)` over the wide type.
pub fn mul_div_wide(a: U1024, b: U1024, denominator: U1024) -> Result<U1024, MathError> {
    checked_div(checked_mul(a, b)?, denominator)
}
