//! Property-based tests using `proptest`.
//!
//! 1. **Ordering invariance**: one-sided liquidity ignores argument order.
//! 2. **Rounding monotonicity**: rounding up never yields less than rounding
//!    down, and only differs when the division is inexact.
//! 3. **Tick round-trip**: `tick_at_sqrt_ratio(sqrt_ratio_at_tick(t)) == t`.
//! 4. **Determinism**: the solver is a pure function.
//! 5. **Balanced after conversion**: with the direct rate, swapping the
//!    making amount leaves both one-sided liquidity estimates equal.

use proptest::prelude::*;

use crate::math::full_math::mul_div;
use crate::math::liquidity_amounts::{get_liquidity_for_amount0, get_liquidity_for_amount1};
use crate::math::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta};
use crate::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_TICK, MIN_TICK};
use crate::making_amount::{rate_branch, solve_making_amount, RateBranch};
use crate::{TickRange, Q96, RESOLUTION, U256};

const TICK_SPACING: i32 = 60;

/// A spacing-aligned range plus a tick strictly inside it.
fn range_with_inner_tick(
    min_spacing_index: i32,
    max_spacing_index: i32,
) -> impl Strategy<Value = (TickRange, i32)> {
    (min_spacing_index..max_spacing_index, 2i32..50).prop_flat_map(|(index, width)| {
        let lower = index * TICK_SPACING;
        let upper = lower + width * TICK_SPACING;
        (lower + 1..upper).prop_map(move |tick| {
            let Ok(range) = TickRange::new(lower, upper) else {
                panic!("valid range");
            };
            (range, tick)
        })
    })
}

fn distinct_ticks() -> impl Strategy<Value = (i32, i32)> {
    (MIN_TICK..MAX_TICK, 1i32..100_000).prop_map(|(tick, gap)| (tick, (tick + gap).min(MAX_TICK)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn liquidity_for_amount_ignores_order(
        (tick_a, tick_b) in distinct_ticks(),
        amount in any::<u64>(),
    ) {
        let a = get_sqrt_ratio_at_tick(tick_a).unwrap();
        let b = get_sqrt_ratio_at_tick(tick_b).unwrap();
        let amount = U256::from(amount);

        prop_assert_eq!(
            get_liquidity_for_amount0(a, b, amount),
            get_liquidity_for_amount0(b, a, amount)
        );
        prop_assert_eq!(
            get_liquidity_for_amount1(a, b, amount),
            get_liquidity_for_amount1(b, a, amount)
        );
    }

    #[test]
    fn rounding_up_never_undershoots(
        (tick_a, tick_b) in distinct_ticks(),
        liquidity in any::<u128>(),
    ) {
        let a = get_sqrt_ratio_at_tick(tick_a).unwrap();
        let b = get_sqrt_ratio_at_tick(tick_b).unwrap();

        let up0 = get_amount_0_delta(a, b, liquidity, true).unwrap();
        let down0 = get_amount_0_delta(a, b, liquidity, false).unwrap();
        let numerator1 = U256::from(liquidity) << RESOLUTION;
        let exact0 = numerator1.mul_mod(b - a, b).is_zero()
            && (mul_div(numerator1, b - a, b).unwrap() % a).is_zero();
        prop_assert!(up0 >= down0);
        prop_assert!(up0 - down0 <= U256::ONE);
        prop_assert_eq!(up0 == down0, exact0);

        let up1 = get_amount_1_delta(a, b, liquidity, true).unwrap();
        let down1 = get_amount_1_delta(a, b, liquidity, false).unwrap();
        let exact = U256::from(liquidity).mul_mod(b - a, Q96).is_zero();
        prop_assert!(up1 >= down1);
        prop_assert_eq!(up1 == down1, exact);
        prop_assert_eq!(down1, mul_div(U256::from(liquidity), b - a, Q96).unwrap());
    }

    #[test]
    fn tick_round_trip(tick in MIN_TICK..MAX_TICK) {
        let sqrt_ratio = get_sqrt_ratio_at_tick(tick).unwrap();
        prop_assert_eq!(get_tick_at_sqrt_ratio(sqrt_ratio).unwrap(), tick);
    }

    #[test]
    fn solver_is_deterministic(
        (range, tick) in range_with_inner_tick(-5_000, 5_000),
        amount0 in any::<u128>(),
        amount1 in any::<u128>(),
    ) {
        let price = get_sqrt_ratio_at_tick(tick).unwrap();
        let first = solve_making_amount(range, price, U256::from(amount0), U256::from(amount1));
        let second = solve_making_amount(range, price, U256::from(amount0), U256::from(amount1));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn direct_rate_conversion_balances_the_deposit(
        (range, tick) in range_with_inner_tick(0, 1_600),
        amount0 in 1_000_000_000_000u128..1_000_000_000_000_000_000_000_000_000_000,
        amount1 in 1_000_000_000_000u128..1_000_000_000_000_000_000_000_000_000_000,
    ) {
        let price = get_sqrt_ratio_at_tick(tick).unwrap();
        prop_assert_eq!(rate_branch(price).unwrap(), RateBranch::Direct);

        let (amount0, amount1) = (U256::from(amount0), U256::from(amount1));
        let result = solve_making_amount(range, price, amount0, amount1).unwrap();

        let (balance0, balance1) = if result.is_making_zero {
            prop_assert!(result.making_amount <= amount0);
            (amount0 - result.making_amount, amount1 + result.estimate_taking_amount)
        } else {
            prop_assert!(result.making_amount <= amount1);
            (amount0 + result.estimate_taking_amount, amount1 - result.making_amount)
        };

        let (lower, upper) = range.sqrt_ratios().unwrap();
        let liquidity0 = get_liquidity_for_amount0(price, upper, balance0).unwrap();
        let liquidity1 = get_liquidity_for_amount1(lower, price, balance1).unwrap();
        let larger = liquidity0.max(liquidity1);
        prop_assert!(liquidity0.abs_diff(liquidity1) * U256::from(1_000_000u64) <= larger);
    }
}
