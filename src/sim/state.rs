//! Run state and the session aggregate
//!
//! Everything a run mutates lives in `GameState`. The transition functions in
//! `tick` are its only writers of `phase`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::danger::DangerMeter;
use super::difficulty::DifficultyParams;
use super::interrupt::InterruptCounter;
use super::phrases::PhrasePool;
use super::typewriter::Typewriter;
use crate::error::GameError;
use crate::tuning::Tuning;

/// Where the run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Title screen, waiting for START
    Title,
    /// How-to-play overlay, any tap continues
    Tutorial,
    /// Phrase typing, danger rising
    Playing,
    /// Statement is out; grace window for a rescue
    Released,
    /// Streak target reached
    Win,
    /// Grace window ran out
    Defeat,
}

impl RunState {
    /// Interrupt taps are only meaningful while the statement is live
    pub fn accepts_taps(self) -> bool {
        matches!(self, RunState::Playing | RunState::Released)
    }

    /// Run has ended and is waiting for TRY AGAIN
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Win | RunState::Defeat)
    }
}

/// Semantic input, already hit-tested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    StartButton,
    TutorialDismiss,
    InterruptTap,
    TryAgain,
}

/// Why the statement got out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseCause {
    /// Danger meter hit 100
    DangerMaxed,
    /// The typewriter finished the phrase
    PhraseCompleted,
}

/// Observable outcomes of a tick or an activation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Title/end screen left for the tutorial; run state wiped
    RunReset,
    /// Tutorial dismissed, play begins
    PlayStarted,
    /// A new phrase began typing
    PhraseStarted { streak: u32 },
    /// Tap counted toward the next interrupt
    TapCounted { taps: u32 },
    /// Interrupt registered while playing
    Interrupted { streak: u32, relief: f32 },
    /// Interrupt registered after the grace window closed
    TapWasted,
    /// Entered the grace window
    Released { cause: ReleaseCause },
    /// Interrupt landed inside the grace window
    Rescued { streak: u32 },
    Won,
    Defeated,
}

/// The single owned session aggregate
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the phrase RNG started from
    pub seed: u64,
    /// Phrase selection RNG
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub pool: PhrasePool,
    /// Current lifecycle state
    pub phase: RunState,
    /// Session clock (ms), advanced only by `tick`
    pub now_ms: f64,
    pub danger: DangerMeter,
    pub typewriter: Typewriter,
    pub interrupt: InterruptCounter,
    /// Consecutive interrupts and rescues this run
    pub streak: u32,
    /// Pacing of the current phrase
    pub params: DifficultyParams,
    /// Instant the statement was released (set only while Released)
    pub released_at_ms: Option<f64>,
}

impl GameState {
    /// Default balance and phrases
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        let params = tuning.difficulty.params(0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            pool: PhrasePool::default(),
            phase: RunState::Title,
            now_ms: 0.0,
            danger: DangerMeter::new(),
            typewriter: Typewriter::new(),
            interrupt: InterruptCounter::new(),
            streak: 0,
            params,
            released_at_ms: None,
        }
    }

    /// Custom balance and phrases; the tuning is validated first
    pub fn with_config(seed: u64, tuning: Tuning, pool: PhrasePool) -> Result<Self, GameError> {
        tuning.validate()?;
        let mut state = Self::new(seed);
        state.params = tuning.difficulty.params(0);
        state.tuning = tuning;
        state.pool = pool;
        Ok(state)
    }

    /// Wipe all per-run values
    pub fn reset_run(&mut self) {
        self.danger.reset();
        self.streak = 0;
        self.typewriter.clear();
        self.interrupt.reset();
        self.released_at_ms = None;
        self.params = self.tuning.difficulty.params(0);
    }

    /// Draw the next phrase and re-derive pacing from the current streak
    pub fn begin_phrase(&mut self) {
        let phrase = self.pool.pick(&mut self.rng);
        self.typewriter.begin_phrase(phrase, self.now_ms);
        self.params = self.tuning.difficulty.params(self.streak);
        self.interrupt.reset();
        log::debug!(
            "Phrase started (streak {}, {:.0} ms/char): {:?}",
            self.streak,
            self.params.char_reveal_interval_ms,
            self.typewriter.phrase()
        );
    }

    /// Time spent in the grace window so far
    pub fn grace_elapsed_ms(&self) -> Option<f64> {
        self.released_at_ms.map(|at| self.now_ms - at)
    }

    /// True while a rescue would still land
    pub fn grace_open(&self) -> bool {
        self.phase == RunState::Released
            && self
                .grace_elapsed_ms()
                .is_some_and(|elapsed| elapsed <= self.tuning.release_grace_ms)
    }

    pub fn progress(&self) -> f32 {
        self.typewriter.progress()
    }

    pub fn typed_prefix(&self) -> &str {
        self.typewriter.typed_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_title() {
        let state = GameState::new(1);
        assert_eq!(state.phase, RunState::Title);
        assert_eq!(state.danger.level(), 0.0);
        assert_eq!(state.streak, 0);
        assert_eq!(state.typed_prefix(), "");
    }

    #[test]
    fn test_begin_phrase_resets_progress_and_taps() {
        let mut state = GameState::new(5);
        state.begin_phrase();
        state.interrupt.register_tap(3);
        state.now_ms = 500.0;
        let params = state.params;
        state
            .typewriter
            .reveal_due(500.0, &params, &mut state.danger);

        state.streak = 4;
        state.begin_phrase();
        assert_eq!(state.typewriter.revealed(), 0);
        assert!(state.typewriter.len() >= 1);
        assert_eq!(state.interrupt.taps(), 0);
        assert_eq!(state.params, state.tuning.difficulty.params(4));
    }

    #[test]
    fn test_reset_run_clears_everything() {
        let mut state = GameState::new(5);
        state.begin_phrase();
        state.streak = 7;
        state.danger.set(80.0);
        state.released_at_ms = Some(10.0);
        state.reset_run();
        assert_eq!(state.streak, 0);
        assert_eq!(state.danger.level(), 0.0);
        assert!(state.typewriter.is_empty());
        assert_eq!(state.released_at_ms, None);
    }

    #[test]
    fn test_with_config_rejects_invalid_tuning() {
        let tuning = Tuning {
            win_streak: 0,
            ..Default::default()
        };
        assert!(GameState::with_config(1, tuning, PhrasePool::default()).is_err());
    }

    #[test]
    fn test_run_state_predicates() {
        assert!(RunState::Playing.accepts_taps());
        assert!(RunState::Released.accepts_taps());
        assert!(!RunState::Title.accepts_taps());
        assert!(RunState::Win.is_terminal());
        assert!(RunState::Defeat.is_terminal());
        assert!(!RunState::Released.is_terminal());
    }
}
