//! Don't Say It - a one-screen interrupt-the-statement reaction game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay engine (danger, typewriter, interrupts, run state)
//! - `game`: Frame-driven facade the shell talks to
//! - `input`: Virtual canvas mapping and button hit-testing
//! - `audio`: Cue player capability (Web Audio elements on wasm)
//! - `ui`: Presentation ramps derived from gameplay state
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use audio::{Cue, CuePlayer, SilentCues};
pub use error::GameError;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Virtual canvas width (9:16 portrait)
    pub const VW: f32 = 540.0;
    /// Virtual canvas height
    pub const VH: f32 = 960.0;

    /// Consecutive interrupts needed to win
    pub const WIN_STREAK: u32 = 10;
    /// Taps needed to register one interrupt
    pub const TAPS_TO_INTERRUPT: u32 = 3;
    /// Grace window after the statement is released (ms)
    pub const RELEASE_GRACE_MS: f64 = 1000.0;

    /// Danger meter ceiling
    pub const DANGER_MAX: f32 = 100.0;
    /// Relief applied by every single tap
    pub const TAP_RELIEF: f32 = 4.0;
    /// Danger level after a rescue (hard reset, not relief)
    pub const RESCUE_DANGER: f32 = 35.0;
    /// Relief of a successful interrupt before the progress penalty
    pub const INTERRUPT_PAYOUT: f32 = 30.0;
    /// Progress penalty at the start of a phrase
    pub const PENALTY_EARLY: f32 = 4.0;
    /// Progress penalty once the phrase is fully typed
    pub const PENALTY_LATE: f32 = 18.0;
}

/// Linear interpolation between `a` and `b` with `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Map `value` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`, clamped to the output range
#[inline]
pub fn map_clamped(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    if in_hi == in_lo {
        return out_lo;
    }
    lerp(out_lo, out_hi, (value - in_lo) / (in_hi - in_lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(4.0, 18.0, 0.0), 4.0);
        assert_eq!(lerp(4.0, 18.0, 1.0), 18.0);
        assert_eq!(lerp(4.0, 18.0, 2.0), 18.0);
        assert_eq!(lerp(4.0, 18.0, -1.0), 4.0);
        assert!((lerp(4.0, 18.0, 0.5) - 11.0).abs() < 1e-6);
    }

    #[test]
    fn test_map_clamped() {
        assert_eq!(map_clamped(35.0, 35.0, 100.0, 0.0, 210.0), 0.0);
        assert_eq!(map_clamped(100.0, 35.0, 100.0, 0.0, 210.0), 210.0);
        assert_eq!(map_clamped(0.75, 0.5, 1.0, 0.0, 7.0), 3.5);
        assert_eq!(map_clamped(5.0, 1.0, 1.0, 2.0, 3.0), 2.0);
    }
}
