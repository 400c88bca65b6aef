use crate::error::StateError;
use crate::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_TICK, MIN_TICK};
use alloy_primitives::U256;

/// A `[tick_lower, tick_upper]` position range.
///
/// Ordering and tick bounds are checked on construction; a zero-width range
/// is representable and rejected by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    tick_lower: i32,
    tick_upper: i32,
}

impl TickRange {
    pub fn new(tick_lower: i32, tick_upper: i32) -> Result<Self, StateError> {
        if tick_lower > tick_upper {
            return Err(StateError::InvalidRange);
        }
        if tick_lower < MIN_TICK || tick_upper > MAX_TICK {
            return Err(StateError::TickOutOfBounds);
        }
        Ok(Self {
            tick_lower,
            tick_upper,
        })
    }

    /// Range of `spacings_below` / `spacings_above` whole tick spacings around
    /// `tick`, after rounding `tick` down to a multiple of `tick_spacing`.
    ///
    /// With a spacing of 60, tick `-200631` aligns to `-200640`, so
    /// `around_tick(-200631, 60, 6, 5)` is `[-201000, -200340]`.
    pub fn around_tick(
        tick: i32,
        tick_spacing: i32,
        spacings_below: u32,
        spacings_above: u32,
    ) -> Result<Self, StateError> {
        if tick_spacing <= 0 {
            return Err(StateError::InvalidRange);
        }
        let aligned = tick.div_euclid(tick_spacing) * tick_spacing;

        let offset = |spacings: u32| {
            i32::try_from(spacings)
                .ok()
                .and_then(|spacings| spacings.checked_mul(tick_spacing))
                .ok_or(StateError::TickOutOfBounds)
        };
        let tick_lower = aligned
            .checked_sub(offset(spacings_below)?)
            .ok_or(StateError::TickOutOfBounds)?;
        let tick_upper = aligned
            .checked_add(offset(spacings_above)?)
            .ok_or(StateError::TickOutOfBounds)?;

        Self::new(tick_lower, tick_upper)
    }

    /// [`TickRange::around_tick`] for the tick the pool is currently in.
    pub fn around_sqrt_price(
        sqrt_price_x96: U256,
        tick_spacing: i32,
        spacings_below: u32,
        spacings_above: u32,
    ) -> Result<Self, StateError> {
        let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        Self::around_tick(tick, tick_spacing, spacings_below, spacings_above)
    }

    pub fn tick_lower(&self) -> i32 {
        self.tick_lower
    }

    pub fn tick_upper(&self) -> i32 {
        self.tick_upper
    }

    /// `(sqrt_ratio_lower, sqrt_ratio_upper)` as Q64.96.
    pub fn sqrt_ratios(&self) -> Result<(U256, U256), StateError> {
        Ok((
            get_sqrt_ratio_at_tick(self.tick_lower)?,
            get_sqrt_ratio_at_tick(self.tick_upper)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn new_rejects_inverted_ticks() {
        assert_eq!(TickRange::new(10, -10), Err(StateError::InvalidRange));
    }

    #[test]
    fn new_rejects_ticks_out_of_bounds() {
        assert_eq!(
            TickRange::new(MIN_TICK - 1, 0),
            Err(StateError::TickOutOfBounds)
        );
        assert_eq!(
            TickRange::new(0, MAX_TICK + 1),
            Err(StateError::TickOutOfBounds)
        );
    }

    #[test]
    fn zero_width_range_is_constructible() {
        let range = TickRange::new(60, 60).unwrap();
        let (lower, upper) = range.sqrt_ratios().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn around_tick_floors_negative_ticks() {
        let range = TickRange::around_tick(-200_631, 60, 6, 5).unwrap();
        assert_eq!(range.tick_lower(), -201_000);
        assert_eq!(range.tick_upper(), -200_340);
    }

    #[test]
    fn around_tick_keeps_aligned_ticks() {
        let range = TickRange::around_tick(600, 60, 10, 5).unwrap();
        assert_eq!((range.tick_lower(), range.tick_upper()), (0, 900));

        let range = TickRange::around_tick(659, 60, 5, 10).unwrap();
        assert_eq!((range.tick_lower(), range.tick_upper()), (300, 1200));
    }

    #[test]
    fn around_tick_rejects_bad_spacing() {
        assert_eq!(
            TickRange::around_tick(0, 0, 1, 1),
            Err(StateError::InvalidRange)
        );
        assert_eq!(
            TickRange::around_tick(0, -60, 1, 1),
            Err(StateError::InvalidRange)
        );
    }

    #[test]
    fn around_tick_past_the_bounds() {
        assert_eq!(
            TickRange::around_tick(MAX_TICK - 10, 60, 1, 5),
            Err(StateError::TickOutOfBounds)
        );
        assert_eq!(
            TickRange::around_tick(0, 60, u32::MAX, 1),
            Err(StateError::TickOutOfBounds)
        );
    }

    #[test]
    fn around_sqrt_price_uses_current_tick() {
        let sqrt_price = U256::from_str("3487098153424058120578628").unwrap();
        let range = TickRange::around_sqrt_price(sqrt_price, 60, 6, 5).unwrap();
        assert_eq!(range, TickRange::new(-201_000, -200_340).unwrap());
    }
}
