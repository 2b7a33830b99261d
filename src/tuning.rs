//! Data-driven game balance
//!
//! `Tuning::default()` is the shipped balance. A JSON document may override
//! any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::DifficultyCurve;

/// Every gameplay constant in one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Streak that wins the run
    pub win_streak: u32,
    /// Taps per registered interrupt
    pub taps_to_interrupt: u32,
    /// Grace window after release (ms)
    pub release_grace_ms: f64,
    /// Relief per tap
    pub tap_relief: f32,
    /// Danger after a rescue
    pub rescue_danger: f32,
    /// Interrupt relief before the progress penalty
    pub interrupt_payout: f32,
    /// Penalty when interrupting at progress 0
    pub penalty_early: f32,
    /// Penalty when interrupting at progress 1
    pub penalty_late: f32,
    /// Per-streak difficulty ramp
    pub difficulty: DifficultyCurve,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            win_streak: WIN_STREAK,
            taps_to_interrupt: TAPS_TO_INTERRUPT,
            release_grace_ms: RELEASE_GRACE_MS,
            tap_relief: TAP_RELIEF,
            rescue_danger: RESCUE_DANGER,
            interrupt_payout: INTERRUPT_PAYOUT,
            penalty_early: PENALTY_EARLY,
            penalty_late: PENALTY_LATE,
            difficulty: DifficultyCurve::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::debug!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidTuning(msg.to_string()));

        if self.win_streak == 0 {
            return invalid("win_streak must be at least 1");
        }
        if self.taps_to_interrupt == 0 {
            return invalid("taps_to_interrupt must be at least 1");
        }
        if self.release_grace_ms.is_nan() || self.release_grace_ms < 0.0 {
            return invalid("release_grace_ms must be non-negative");
        }
        if !(0.0..=DANGER_MAX).contains(&self.rescue_danger) {
            return invalid("rescue_danger must lie within [0, 100]");
        }
        if self.tap_relief < 0.0 || self.interrupt_payout < 0.0 {
            return invalid("relief amounts must be non-negative");
        }
        if self.penalty_early > self.penalty_late {
            return invalid("penalty_early must not exceed penalty_late");
        }
        self.difficulty.validate()
    }

    /// Relief paid out by a successful interrupt at the given phrase progress
    pub fn interrupt_relief(&self, progress: f32) -> f32 {
        let penalty = crate::lerp(self.penalty_early, self.penalty_late, progress);
        (self.interrupt_payout - penalty).max(0.0)
    }
}
