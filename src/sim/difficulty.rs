//! Streak-driven difficulty ramp
//!
//! Difficulty tightens linearly with the streak and plateaus at `cap_streak`.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Per-phrase pacing derived from the current streak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Delay between revealed characters (ms)
    pub char_reveal_interval_ms: f64,
    /// Passive danger accrual (points per second)
    pub base_danger_per_second: f32,
    /// Danger added per revealed character
    pub danger_per_char: f32,
}

/// Shape of the difficulty ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Streak beyond which difficulty stops increasing
    pub cap_streak: u32,
    pub interval_start_ms: f64,
    pub interval_step_ms: f64,
    pub interval_min_ms: f64,
    pub rate_start: f32,
    pub rate_step: f32,
    pub rate_max: f32,
    pub per_char_start: f32,
    pub per_char_step: f32,
    pub per_char_max: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            cap_streak: 10,
            interval_start_ms: 85.0,
            interval_step_ms: 2.0,
            interval_min_ms: 55.0,
            rate_start: 7.0,
            rate_step: 0.4,
            rate_max: 14.0,
            per_char_start: 0.35,
            per_char_step: 0.03,
            per_char_max: 0.8,
        }
    }
}

impl DifficultyCurve {
    /// Pacing for a phrase started at `streak`
    pub fn params(&self, streak: u32) -> DifficultyParams {
        let s = streak.min(self.cap_streak);
        DifficultyParams {
            char_reveal_interval_ms: (self.interval_start_ms - self.interval_step_ms * s as f64)
                .max(self.interval_min_ms),
            base_danger_per_second: (self.rate_start + self.rate_step * s as f32)
                .min(self.rate_max),
            danger_per_char: (self.per_char_start + self.per_char_step * s as f32)
                .min(self.per_char_max),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidTuning(msg.to_string()));

        if self.interval_min_ms <= 0.0 || self.interval_start_ms < self.interval_min_ms {
            return invalid("reveal interval must stay positive and start above its floor");
        }
        if self.interval_step_ms < 0.0 || self.rate_step < 0.0 || self.per_char_step < 0.0 {
            return invalid("difficulty steps must be non-negative");
        }
        if self.rate_start < 0.0 || self.rate_start > self.rate_max {
            return invalid("rate_start must lie within [0, rate_max]");
        }
        if self.per_char_start < 0.0 || self.per_char_start > self.per_char_max {
            return invalid("per_char_start must lie within [0, per_char_max]");
        }
        Ok(())
    }
}

/// Shipped difficulty for a streak
pub fn curve(streak: u32) -> DifficultyParams {
    DifficultyCurve::default().params(streak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_streak_zero() {
        let p = curve(0);
        assert_eq!(p.char_reveal_interval_ms, 85.0);
        assert_eq!(p.base_danger_per_second, 7.0);
        assert!((p.danger_per_char - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_plateau_at_cap() {
        let p = curve(10);
        assert_eq!(p.char_reveal_interval_ms, 65.0);
        assert!((p.base_danger_per_second - 11.0).abs() < 1e-5);
        assert!((p.danger_per_char - 0.65).abs() < 1e-5);
        assert_eq!(curve(10), curve(25));
        assert_eq!(curve(10), curve(u32::MAX));
    }

    #[test]
    fn test_floors_and_ceilings_apply() {
        let steep = DifficultyCurve {
            interval_step_ms: 10.0,
            rate_step: 2.0,
            per_char_step: 0.1,
            ..Default::default()
        };
        let p = steep.params(10);
        assert_eq!(p.char_reveal_interval_ms, 55.0);
        assert_eq!(p.base_danger_per_second, 14.0);
        assert_eq!(p.danger_per_char, 0.8);
    }

    proptest! {
        #[test]
        fn prop_curve_tightens_monotonically(streak in 0u32..40) {
            let a = curve(streak);
            let b = curve(streak + 1);
            prop_assert!(b.char_reveal_interval_ms <= a.char_reveal_interval_ms);
            prop_assert!(b.base_danger_per_second >= a.base_danger_per_second);
            prop_assert!(b.danger_per_char >= a.danger_per_char);
        }

        #[test]
        fn prop_curve_stays_in_bounds(streak in any::<u32>()) {
            let p = curve(streak);
            prop_assert!((55.0..=85.0).contains(&p.char_reveal_interval_ms));
            prop_assert!((7.0..=14.0).contains(&p.base_danger_per_second));
            prop_assert!((0.35..=0.8).contains(&p.danger_per_char));
        }
    }
}
