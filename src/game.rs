//! Frame-driven game facade
//!
//! Wraps the session aggregate and a cue player behind the interface the
//! shell uses: read-only getters, `on_tick`, `on_activate`, plus a small
//! input queue so a frame always runs timers before input. Pointer presses
//! are hit-tested when they are queued, against the screen the player saw.

use glam::Vec2;

use crate::audio::CuePlayer;
use crate::error::GameError;
use crate::input::{ButtonLayout, route_pointer};
use crate::sim::{self, Activation, GameEvent, GameState, PhrasePool, RunState};
use crate::tuning::Tuning;
use crate::ui::HudSnapshot;

pub struct Game<C: CuePlayer> {
    state: GameState,
    cues: C,
    layout: ButtonLayout,
    pending: Vec<Activation>,
}

impl<C: CuePlayer> Game<C> {
    /// Default balance and phrases
    pub fn new(seed: u64, cues: C) -> Self {
        Self {
            state: GameState::new(seed),
            cues,
            layout: ButtonLayout::default(),
            pending: Vec::with_capacity(8),
        }
    }

    pub fn with_config(
        seed: u64,
        tuning: Tuning,
        pool: PhrasePool,
        cues: C,
    ) -> Result<Self, GameError> {
        Ok(Self {
            state: GameState::with_config(seed, tuning, pool)?,
            cues,
            layout: ButtonLayout::default(),
            pending: Vec::with_capacity(8),
        })
    }

    pub fn current_state(&self) -> RunState {
        self.state.phase
    }

    pub fn danger_level(&self) -> f32 {
        self.state.danger.level()
    }

    pub fn phrase_progress(&self) -> f32 {
        self.state.progress()
    }

    pub fn typed_prefix(&self) -> &str {
        self.state.typed_prefix()
    }

    pub fn interrupt_tap_count(&self) -> u32 {
        self.state.interrupt.taps()
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    /// Advance all timers by the true elapsed time since the previous call
    pub fn on_tick(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        sim::tick(&mut self.state, elapsed_ms, &mut self.cues)
    }

    /// Apply one activation immediately
    pub fn on_activate(&mut self, activation: Activation) -> Vec<GameEvent> {
        sim::activate(&mut self.state, activation, &mut self.cues)
    }

    /// Buffer an activation until the next `frame`
    pub fn queue_activation(&mut self, activation: Activation) {
        self.pending.push(activation);
    }

    /// Classify a press (virtual coordinates) for the current state and
    /// buffer it until the next `frame`; misses are dropped
    pub fn queue_pointer(&mut self, point: Vec2) {
        match route_pointer(self.state.phase, &self.layout, point) {
            Some(activation) => self.pending.push(activation),
            None => log::trace!("Press at {} hit nothing", point),
        }
    }

    pub fn pending_activations(&self) -> usize {
        self.pending.len()
    }

    /// One frame: timers first, then queued input in arrival order
    pub fn frame(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let mut events = self.on_tick(elapsed_ms);
        for activation in std::mem::take(&mut self.pending) {
            events.extend(self.on_activate(activation));
        }
        events
    }
}
