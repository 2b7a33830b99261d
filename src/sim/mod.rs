//! Deterministic gameplay engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick(elapsed_ms)`
//! - Seeded RNG only
//! - No rendering or platform dependencies (audio goes through `CuePlayer`)

pub mod danger;
pub mod difficulty;
pub mod interrupt;
pub mod phrases;
pub mod state;
pub mod tick;
pub mod typewriter;

pub use danger::DangerMeter;
pub use difficulty::{DifficultyCurve, DifficultyParams, curve};
pub use interrupt::{InterruptCounter, TapResult};
pub use phrases::{DEFAULT_PHRASES, PhrasePool};
pub use state::{Activation, GameEvent, GameState, ReleaseCause, RunState};
pub use tick::{activate, tick};
pub use typewriter::{Reveal, Typewriter};
