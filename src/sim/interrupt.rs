//! Multi-tap interrupt counter
//!
//! Taps accumulate until `taps_to_interrupt` is reached, at which point the
//! counter wraps back to zero and reports a registered interrupt. What the
//! interrupt does (relief, rescue, nothing) is decided by the run state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResult {
    /// Tap counted, threshold not reached yet
    Pending { taps: u32 },
    /// Threshold reached; counter is back at zero
    Registered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptCounter {
    taps: u32,
}

impl InterruptCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Taps counted toward the next interrupt
    pub fn taps(&self) -> u32 {
        self.taps
    }

    pub fn register_tap(&mut self, taps_to_interrupt: u32) -> TapResult {
        self.taps += 1;
        if self.taps < taps_to_interrupt.max(1) {
            return TapResult::Pending { taps: self.taps };
        }
        self.taps = 0;
        TapResult::Registered
    }

    pub fn reset(&mut self) {
        self.taps = 0;
    }
}
