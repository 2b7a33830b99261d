//! Run state machine
//!
//! `tick` advances every timer by the wall-clock time since the previous
//! frame; `activate` applies one semantic input. Within a frame the caller
//! ticks first and applies input afterwards, so a phrase that completes in
//! the same frame as the third tap is already Released when the tap lands
//! (and the tap becomes a rescue).

use super::interrupt::TapResult;
use super::state::{Activation, GameEvent, GameState, ReleaseCause, RunState};
use super::typewriter::Reveal;
use crate::audio::{Cue, CuePlayer};

/// Advance timers by `elapsed_ms` of wall-clock time
pub fn tick<C: CuePlayer + ?Sized>(
    state: &mut GameState,
    elapsed_ms: f64,
    cues: &mut C,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let elapsed_ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0)
    } else {
        0.0
    };
    state.now_ms += elapsed_ms;

    if state.phase == RunState::Playing {
        let params = state.params;
        state
            .danger
            .advance((elapsed_ms / 1000.0) as f32, params.base_danger_per_second);

        let reveal = state
            .typewriter
            .reveal_due(state.now_ms, &params, &mut state.danger);

        if reveal == Some(Reveal::Completed) {
            release(state, ReleaseCause::PhraseCompleted, &mut events);
        } else if state.danger.is_maxed() {
            release(state, ReleaseCause::DangerMaxed, &mut events);
        }
    }

    // Checked in the same frame as the release so a zero-width window
    // defeats immediately.
    if state.phase == RunState::Released {
        let expired = state
            .grace_elapsed_ms()
            .is_none_or(|elapsed| elapsed >= state.tuning.release_grace_ms);
        if expired {
            defeat(state, cues, &mut events);
        }
    }

    events
}

/// Apply one activation; activations that make no sense in the current state are ignored
pub fn activate<C: CuePlayer + ?Sized>(
    state: &mut GameState,
    activation: Activation,
    cues: &mut C,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match (state.phase, activation) {
        (RunState::Title, Activation::StartButton) => {
            cues.play(Cue::Button);
            start_run(state, cues, &mut events);
        }
        (RunState::Tutorial, Activation::TutorialDismiss) => {
            start_playing(state, cues, &mut events);
        }
        (RunState::Win | RunState::Defeat, Activation::TryAgain) => {
            cues.play(Cue::Button);
            start_run(state, cues, &mut events);
        }
        (RunState::Playing | RunState::Released, Activation::InterruptTap) => {
            register_tap(state, cues, &mut events);
        }
        (phase, activation) => {
            log::debug!("Ignoring {:?} while {:?}", activation, phase);
        }
    }

    events
}

/// Title or end screen -> tutorial, with a clean slate
fn start_run<C: CuePlayer + ?Sized>(
    state: &mut GameState,
    cues: &mut C,
    events: &mut Vec<GameEvent>,
) {
    state.reset_run();
    cues.stop(Cue::GameLoop);
    state.phase = RunState::Tutorial;
    log::info!("Run reset");
    events.push(GameEvent::RunReset);
}

fn start_playing<C: CuePlayer + ?Sized>(
    state: &mut GameState,
    cues: &mut C,
    events: &mut Vec<GameEvent>,
) {
    state.phase = RunState::Playing;
    state.danger.reset();
    state.streak = 0;
    state.released_at_ms = None;
    state.begin_phrase();
    cues.start_loop(Cue::GameLoop);
    log::info!("Play started");
    events.push(GameEvent::PlayStarted);
    events.push(GameEvent::PhraseStarted { streak: state.streak });
}

fn register_tap<C: CuePlayer + ?Sized>(
    state: &mut GameState,
    cues: &mut C,
    events: &mut Vec<GameEvent>,
) {
    cues.play(Cue::Interrupt);
    let result = state.interrupt.register_tap(state.tuning.taps_to_interrupt);
    state.danger.relieve(state.tuning.tap_relief);

    match result {
        TapResult::Pending { taps } => events.push(GameEvent::TapCounted { taps }),
        TapResult::Registered => match state.phase {
            RunState::Released if state.grace_open() => rescue(state, cues, events),
            RunState::Released => {
                log::debug!("Interrupt landed after the grace window");
                events.push(GameEvent::TapWasted);
            }
            _ => successful_interrupt(state, cues, events),
        },
    }
}

fn successful_interrupt<C: CuePlayer + ?Sized>(
    state: &mut GameState,
    cues: &mut C,
    events: &mut Vec<GameEvent>,
) {
    let relief = state.tuning.interrupt_relief(state.progress());
    state.danger.relieve(relief);
    state.streak += 1;
    log::debug!(
        "Interrupted at {:.0}% (relief {:.1}, streak {})",
        state.progress() * 100.0,
        relief,
        state.streak
    );
    events.push(GameEvent::Interrupted {
        streak: state.streak,
        relief,
    });
    advance_streak(state, cues, events);
}

fn rescue<C: CuePlayer + ?Sized>(state: &mut GameState, cues: &mut C, events: &mut Vec<GameEvent>) {
    state.phase = RunState::Playing;
    state.released_at_ms = None;
    state.danger.set(state.tuning.rescue_danger);
    state.streak += 1;
    log::info!("Rescued (streak {})", state.streak);
    events.push(GameEvent::Rescued {
        streak: state.streak,
    });
    advance_streak(state, cues, events);
}

/// Win check, otherwise the next phrase
fn advance_streak<C: CuePlayer + ?Sized>(
    state: &mut GameState,
    cues: &mut C,
    events: &mut Vec<GameEvent>,
) {
    if state.streak >= state.tuning.win_streak {
        win(state, cues, events);
    } else {
        state.begin_phrase();
        events.push(GameEvent::PhraseStarted {
            streak: state.streak,
        });
    }
}

fn release(state: &mut GameState, cause: ReleaseCause, events: &mut Vec<GameEvent>) {
    state.phase = RunState::Released;
    state.released_at_ms = Some(state.now_ms);
    state.danger.set(crate::consts::DANGER_MAX);
    log::info!("Released ({:?}) at {:.0} ms", cause, state.now_ms);
    events.push(GameEvent::Released { cause });
}

fn defeat<C: CuePlayer + ?Sized>(state: &mut GameState, cues: &mut C, events: &mut Vec<GameEvent>) {
    cues.stop(Cue::GameLoop);
    cues.play(Cue::Defeat);
    state.phase = RunState::Defeat;
    state.released_at_ms = None;
    log::info!("Defeat (streak {})", state.streak);
    events.push(GameEvent::Defeated);
}

fn win<C: CuePlayer + ?Sized>(state: &mut GameState, cues: &mut C, events: &mut Vec<GameEvent>) {
    cues.stop(Cue::GameLoop);
    cues.play(Cue::Victory);
    state.phase = RunState::Win;
    log::info!("Win (streak {})", state.streak);
    events.push(GameEvent::Won);
}
