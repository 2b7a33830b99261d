//! Virtual canvas input mapping
//!
//! The game is laid out on a fixed 540x960 virtual canvas that is fitted
//! (contain, letterboxed) into the real window. Pointer positions arrive in
//! window pixels and are mapped back before hit-testing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{VH, VW};
use crate::sim::{Activation, RunState};

/// Window-to-virtual transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Window pixels per virtual unit
    pub scale: f32,
    /// Window-space position of the virtual origin
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new(scale: f32, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// Largest uniform scale that fits the virtual canvas in the window, centred
    pub fn fit(window_w: f32, window_h: f32) -> Self {
        let scale = (window_w / VW).min(window_h / VH);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let offset = Vec2::new((window_w - VW * scale) / 2.0, (window_h - VH * scale) / 2.0);
        Self { scale, offset }
    }

    #[inline]
    pub fn screen_to_virtual(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    #[inline]
    pub fn virtual_to_screen(&self, virt: Vec2) -> Vec2 {
        virt * self.scale + self.offset
    }
}

/// Axis-aligned rectangle in virtual coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Edges count as inside
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.pos + self.size;
        p.x >= self.pos.x && p.x <= max.x && p.y >= self.pos.y && p.y <= max.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Button geometry on the virtual canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonLayout {
    pub start: Rect,
    pub try_again: Rect,
    pub interrupt: Rect,
}

impl ButtonLayout {
    /// Start button aspect (height / width) of the stock button art
    pub const DEFAULT_BUTTON_ASPECT: f32 = 0.25;

    /// Lay out buttons for start-button art of the given height/width ratio
    pub fn new(start_button_aspect: f32) -> Self {
        let w = VW * 0.75;
        let h = w * start_button_aspect.max(0.0);
        let start = Rect::new((VW - w) / 2.0, VH * 0.90 - h / 2.0, w, h);

        let iw = VW * 0.80;
        let ih = 64.0;
        let interrupt = Rect::new((VW - iw) / 2.0, VH - ih - 46.0, iw, ih);

        Self {
            start,
            try_again: start,
            interrupt,
        }
    }
}

impl Default for ButtonLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUTTON_ASPECT)
    }
}

/// Classify a pointer press (virtual coordinates) for the current state
pub fn route_pointer(state: RunState, layout: &ButtonLayout, point: Vec2) -> Option<Activation> {
    match state {
        RunState::Title => layout
            .start
            .contains(point)
            .then_some(Activation::StartButton),
        RunState::Tutorial => Some(Activation::TutorialDismiss),
        RunState::Win | RunState::Defeat => layout
            .try_again
            .contains(point)
            .then_some(Activation::TryAgain),
        RunState::Playing | RunState::Released => layout
            .interrupt
            .contains(point)
            .then_some(Activation::InterruptTap),
    }
}
