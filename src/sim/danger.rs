//! Danger meter
//!
//! A bounded scalar in [0, 100]. The meter only reports its value; crossing
//! the ceiling is detected by the run state machine so the release fires on
//! the transition, not on every frame spent at 100.

use serde::{Deserialize, Serialize};

use crate::consts::DANGER_MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DangerMeter {
    level: f32,
}

impl DangerMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level, always within [0, 100]
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Level as a 0-1 fraction (for bars and overlays)
    #[inline]
    pub fn fraction(&self) -> f32 {
        self.level / DANGER_MAX
    }

    /// True once the meter has hit the ceiling
    #[inline]
    pub fn is_maxed(&self) -> bool {
        self.level >= DANGER_MAX
    }

    /// Passive accrual over `elapsed_secs` at `per_second`
    pub fn advance(&mut self, elapsed_secs: f32, per_second: f32) -> f32 {
        self.add(per_second * elapsed_secs.max(0.0))
    }

    /// Penalty for one revealed character
    pub fn add_character_danger(&mut self, per_char: f32) -> f32 {
        self.add(per_char)
    }

    /// Subtract `amount`, flooring at 0
    pub fn relieve(&mut self, amount: f32) -> f32 {
        self.set(self.level - amount.max(0.0))
    }

    /// Hard-set the level (clamped)
    pub fn set(&mut self, level: f32) -> f32 {
        self.level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, DANGER_MAX)
        };
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }

    fn add(&mut self, amount: f32) -> f32 {
        self.set(self.level + amount.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_accrues_rate_times_time() {
        let mut danger = DangerMeter::new();
        danger.advance(2.0, 7.0);
        assert!((danger.level() - 14.0).abs() < 1e-5);
    }

    #[test]
    fn test_clamps_at_ceiling() {
        let mut danger = DangerMeter::new();
        danger.advance(60.0, 14.0);
        assert_eq!(danger.level(), 100.0);
        assert!(danger.is_maxed());
        danger.add_character_danger(0.8);
        assert_eq!(danger.level(), 100.0);
        assert_eq!(danger.fraction(), 1.0);
    }

    #[test]
    fn test_fraction_tracks_level() {
        let mut danger = DangerMeter::new();
        assert_eq!(danger.fraction(), 0.0);
        danger.set(25.0);
        assert_eq!(danger.fraction(), 0.25);
    }

    #[test]
    fn test_relieve_floors_at_zero() {
        let mut danger = DangerMeter::new();
        danger.set(3.0);
        danger.relieve(4.0);
        assert_eq!(danger.level(), 0.0);
    }

    #[test]
    fn test_negative_inputs_are_ignored() {
        let mut danger = DangerMeter::new();
        danger.set(50.0);
        danger.advance(-1.0, 7.0);
        danger.relieve(-10.0);
        danger.add_character_danger(-3.0);
        assert_eq!(danger.level(), 50.0);
    }

    proptest! {
        #[test]
        fn prop_advance_stays_bounded_and_non_decreasing(
            start in 0.0f32..=100.0,
            steps in prop::collection::vec((0.0f32..5.0, 0.0f32..20.0), 1..50),
        ) {
            let mut danger = DangerMeter::new();
            danger.set(start);
            let mut prev = danger.level();
            for (dt, rate) in steps {
                let level = danger.advance(dt, rate);
                prop_assert!((0.0..=100.0).contains(&level));
                prop_assert!(level >= prev);
                prev = level;
            }
        }

        #[test]
        fn prop_relief_stays_bounded(start in 0.0f32..=100.0, amount in 0.0f32..500.0) {
            let mut danger = DangerMeter::new();
            danger.set(start);
            let level = danger.relieve(amount);
            prop_assert!((0.0..=100.0).contains(&level));
            prop_assert!(level <= start);
        }
    }
}
