//! Presentation ramps
//!
//! Pure functions a renderer reads to decide how tense the screen looks.
//! Nothing here feeds back into gameplay.

use serde::Serialize;

use crate::map_clamped;
use crate::settings::Settings;
use crate::sim::{GameState, RunState};

/// Character portrait to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Face {
    Neutral,
    /// Second half of the phrase
    Danger,
    /// Statement released
    Fail,
}

/// Danger bar colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DangerBand {
    Safe,
    Warning,
    Critical,
}

impl DangerBand {
    pub fn from_level(danger: f32) -> Self {
        if danger < 60.0 {
            DangerBand::Safe
        } else if danger < 85.0 {
            DangerBand::Warning
        } else {
            DangerBand::Critical
        }
    }

    /// CSS colour for the bar fill
    pub fn css_color(self) -> &'static str {
        match self {
            DangerBand::Safe => "rgb(60, 230, 130)",
            DangerBand::Warning => "rgb(255, 190, 40)",
            DangerBand::Critical => "rgb(255, 70, 70)",
        }
    }
}

/// Shake amplitude in virtual pixels: ramps over the second half of the phrase
pub fn shake_amount(progress: f32, released: bool, settings: &Settings) -> f32 {
    if !settings.effective_screen_shake() {
        return 0.0;
    }
    let mut shake = if progress >= 0.5 {
        map_clamped(progress, 0.5, 1.0, 0.0, 7.0)
    } else {
        0.0
    };
    if released {
        shake = shake.max(8.0);
    }
    shake
}

/// Phrase text jitters at a fraction of the screen shake
pub fn text_jitter(shake: f32) -> f32 {
    (shake * 0.35).min(3.0)
}

pub fn face(progress: f32, released: bool) -> Face {
    if released {
        Face::Fail
    } else if progress >= 0.5 {
        Face::Danger
    } else {
        Face::Neutral
    }
}

/// Crisis backdrop near the ceiling or once released
pub fn crisis_background(danger: f32, released: bool) -> bool {
    danger > 85.0 || released
}

/// Danger overlay alpha (0-255); hidden while released
pub fn overlay_alpha(danger: f32, released: bool) -> f32 {
    if released || danger <= 35.0 {
        0.0
    } else {
        map_clamped(danger, 35.0, 100.0, 0.0, 210.0)
    }
}

/// Extra red/green added to the interrupt button as taps build up
pub fn tap_glow(taps: u32, taps_to_interrupt: u32) -> f32 {
    map_clamped(taps as f32, 0.0, taps_to_interrupt as f32, 0.0, 35.0)
}

/// Idle breathing scale for the title art
pub fn title_pulse(time_secs: f32, settings: &Settings) -> f32 {
    if !settings.effective_pulse() {
        return 1.0;
    }
    1.0 + 0.015 * (time_secs * 1.3).sin()
}

/// Button scale: grows while hovered, breathes otherwise
pub fn button_scale(hovered: bool, time_secs: f32, settings: &Settings) -> f32 {
    if hovered {
        1.04
    } else if settings.effective_pulse() {
        1.0 + 0.01 * (time_secs * 2.2).sin()
    } else {
        1.0
    }
}

/// Read-only view of a run for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub state: RunState,
    pub danger: f32,
    pub progress: f32,
    pub typed: String,
    pub taps: u32,
    pub taps_to_interrupt: u32,
    pub streak: u32,
    pub win_streak: u32,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            state: state.phase,
            danger: state.danger.level(),
            progress: state.progress(),
            typed: state.typed_prefix().to_string(),
            taps: state.interrupt.taps(),
            taps_to_interrupt: state.tuning.taps_to_interrupt,
            streak: state.streak,
            win_streak: state.tuning.win_streak,
        }
    }

    pub fn released(&self) -> bool {
        self.state == RunState::Released
    }

    /// Tap counter label, e.g. "2/3"
    pub fn tap_label(&self) -> String {
        format!("{}/{}", self.taps, self.taps_to_interrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_ramps_in_second_half() {
        let settings = Settings::default();
        assert_eq!(shake_amount(0.49, false, &settings), 0.0);
        assert_eq!(shake_amount(0.5, false, &settings), 0.0);
        assert!((shake_amount(0.75, false, &settings) - 3.5).abs() < 1e-5);
        assert_eq!(shake_amount(1.0, false, &settings), 7.0);
        assert_eq!(shake_amount(0.0, true, &settings), 8.0);
    }

    #[test]
    fn test_shake_respects_settings() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(shake_amount(1.0, true, &settings), 0.0);
        assert_eq!(title_pulse(1.0, &settings), 1.0);
        assert_eq!(button_scale(false, 1.0, &settings), 1.0);
        assert_eq!(button_scale(true, 1.0, &settings), 1.04);
    }

    #[test]
    fn test_face_switches_at_half() {
        assert_eq!(face(0.2, false), Face::Neutral);
        assert_eq!(face(0.5, false), Face::Danger);
        assert_eq!(face(0.1, true), Face::Fail);
    }

    #[test]
    fn test_overlay_and_background() {
        assert_eq!(overlay_alpha(35.0, false), 0.0);
        assert_eq!(overlay_alpha(100.0, false), 210.0);
        assert_eq!(overlay_alpha(100.0, true), 0.0);
        assert!(!crisis_background(85.0, false));
        assert!(crisis_background(85.1, false));
        assert!(crisis_background(0.0, true));
    }

    #[test]
    fn test_danger_bands() {
        assert_eq!(DangerBand::from_level(59.9), DangerBand::Safe);
        assert_eq!(DangerBand::from_level(60.0), DangerBand::Warning);
        assert_eq!(DangerBand::from_level(85.0), DangerBand::Critical);
    }

    #[test]
    fn test_tap_glow_and_jitter() {
        assert_eq!(tap_glow(0, 3), 0.0);
        assert_eq!(tap_glow(3, 3), 35.0);
        assert_eq!(tap_glow(9, 3), 35.0);
        assert!((text_jitter(8.0) - 2.8).abs() < 1e-5);
        assert_eq!(text_jitter(20.0), 3.0);
    }

    #[test]
    fn test_snapshot_capture() {
        let state = GameState::new(1);
        let hud = HudSnapshot::capture(&state);
        assert_eq!(hud.state, RunState::Title);
        assert_eq!(hud.tap_label(), "0/3");
        assert_eq!(hud.win_streak, 10);
        let json = serde_json::to_string(&hud).unwrap();
        assert!(json.contains("\"state\":\"Title\""));
    }
}
