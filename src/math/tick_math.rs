use crate::error::StateError;
use alloy_primitives::{uint, I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

pub const MIN_SQRT_RATIO: U256 = uint!(4295128739_U256);
pub const MAX_SQRT_RATIO: U256 = uint!(1461446703485210103287273052203988822378723970342_U256);

/// `1 / sqrt(1.0001)` as Q128.128, applied when bit 0 of the absolute tick is set.
const RATIO_BIT_0: U256 = uint!(0xfffcb933bd6fad37aa2d162d1a594001_U256);

/// Q128.128 multipliers `1 / sqrt(1.0001)^bit` for the remaining tick bits.
const RATIO_MULTIPLIERS: [(u32, U256); 19] = [
    (0x2, uint!(0xfff97272373d413259a46990580e213a_U256)),
    (0x4, uint!(0xfff2e50f5f656932ef12357cf3c7fdcc_U256)),
    (0x8, uint!(0xffe5caca7e10e4e61c3624eaa0941cd0_U256)),
    (0x10, uint!(0xffcb9843d60f6159c9db58835c926644_U256)),
    (0x20, uint!(0xff973b41fa98c081472e6896dfb254c0_U256)),
    (0x40, uint!(0xff2ea16466c96a3843ec78b326b52861_U256)),
    (0x80, uint!(0xfe5dee046a99a2a811c461f1969c3053_U256)),
    (0x100, uint!(0xfcbe86c7900a88aedcffc83b479aa3a4_U256)),
    (0x200, uint!(0xf987a7253ac413176f2b074cf7815e54_U256)),
    (0x400, uint!(0xf3392b0822b70005940c7a398e4b70f3_U256)),
    (0x800, uint!(0xe7159475a2c29b7443b29c7fa6e889d9_U256)),
    (0x1000, uint!(0xd097f3bdfd2022b8845ad8f792aa5825_U256)),
    (0x2000, uint!(0xa9f746462d870fdf8a65dc1f90e061e5_U256)),
    (0x4000, uint!(0x70d869a156d2a1b890bb3df62baf32f7_U256)),
    (0x8000, uint!(0x31be135f97d08fd981231505542fcfa6_U256)),
    (0x10000, uint!(0x9aa508b5b7a84e1c677de54f3e99bc9_U256)),
    (0x20000, uint!(0x5d6af8dedb81196699c329225ee604_U256)),
    (0x40000, uint!(0x2216e584f5fa1ea926041bedfe98_U256)),
    (0x80000, uint!(0x48a170391f7dc42444e8fa2_U256)),
];

const LOWER_32_BITS: U256 = uint!(0xffffffff_U256);

/// log_sqrt(1.0001)(2) as Q128.128.
const LOG_SQRT_10001: I256 = I256::from_raw(uint!(255738958999603826347141_U256));
/// Error bounds of the log approximation, as Q128.128.
const TICK_LOW_ERROR: I256 = I256::from_raw(uint!(3402992956809132418596140100660247210_U256));
const TICK_HIGH_ERROR: I256 =
    I256::from_raw(uint!(291339464771989622907027621153398088495_U256));

/// Returns the sqrt price (Q64.96) at `tick`, i.e. `sqrt(1.0001^tick) * 2^96`,
/// or `StateError::TickOutOfBounds` outside `[MIN_TICK, MAX_TICK]`.
///
/// Bit-exact with Uniswap V3 `TickMath.getSqrtRatioAtTick`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK.unsigned_abs() {
        return Err(StateError::TickOutOfBounds);
    }

    let mut ratio = if abs_tick & 1 != 0 {
        RATIO_BIT_0
    } else {
        U256::ONE << 128usize
    };

    for (bit, multiplier) in RATIO_MULTIPLIERS {
        if abs_tick & bit != 0 {
            ratio = ratio.wrapping_mul(multiplier) >> 128usize;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q128.96, rounding up so the result never understates the tick
    let round_up = !(ratio & LOWER_32_BITS).is_zero();
    Ok((ratio >> 32usize) + U256::from(round_up as u8))
}

/// Returns the greatest tick whose sqrt ratio is `<= sqrt_price_x96`.
///
/// Fails with `StateError::SqrtPriceOutOfBounds` unless
/// `MIN_SQRT_RATIO <= sqrt_price_x96 < MAX_SQRT_RATIO`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, StateError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(StateError::SqrtPriceOutOfBounds);
    }

    let ratio = sqrt_price_x96 << 32usize;
    let msb = 255 - ratio.leading_zeros();

    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let mut log_2 = (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u8))) << 64usize;

    for shift in (50..=63usize).rev() {
        r = r.wrapping_mul(r) >> 127usize;
        let f = r >> 128usize;
        log_2 |= I256::from_raw(f << shift);
        if !f.is_zero() {
            r >>= 1usize;
        }
    }

    let log_sqrt10001 = log_2.wrapping_mul(LOG_SQRT_10001);
    let tick_low = (log_sqrt10001 - TICK_LOW_ERROR).asr(128).low_i32();
    let tick_high = (log_sqrt10001 + TICK_HIGH_ERROR).asr(128).low_i32();

    if tick_low == tick_high {
        return Ok(tick_low);
    }
    if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}
