pub mod full_math;
pub mod liquidity_amounts;
pub mod sqrt_price_math;
pub mod tick_math;
pub mod wide_math;
