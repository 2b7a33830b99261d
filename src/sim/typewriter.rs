//! Phrase typewriter
//!
//! Reveals the active phrase one character per elapsed reveal interval.
//! Progress is counted in chars, not bytes, so multi-byte punctuation
//! reveals as a single step.

use serde::{Deserialize, Serialize};

use super::danger::DangerMeter;
use super::difficulty::DifficultyParams;

/// Result of a character reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// One more character is visible
    Char,
    /// The last character was just revealed; the statement is out
    Completed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Typewriter {
    phrase: String,
    len: usize,
    revealed: usize,
    last_reveal_ms: f64,
}

impl Typewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start revealing `phrase` from scratch; the reveal clock restarts at `now_ms`
    pub fn begin_phrase(&mut self, phrase: &str, now_ms: f64) {
        self.phrase.clear();
        self.phrase.push_str(phrase);
        self.len = phrase.chars().count();
        self.revealed = 0;
        self.last_reveal_ms = now_ms;
    }

    /// Drop the phrase entirely (between runs)
    pub fn clear(&mut self) {
        self.phrase.clear();
        self.len = 0;
        self.revealed = 0;
    }

    /// Reveal the next character if the interval has elapsed.
    ///
    /// At most one character is revealed per call; each revealed character
    /// adds `danger_per_char` to the meter.
    pub fn reveal_due(
        &mut self,
        now_ms: f64,
        params: &DifficultyParams,
        danger: &mut DangerMeter,
    ) -> Option<Reveal> {
        if self.is_complete() || self.len == 0 {
            return None;
        }
        if now_ms - self.last_reveal_ms < params.char_reveal_interval_ms {
            return None;
        }

        self.last_reveal_ms = now_ms;
        self.revealed += 1;
        danger.add_character_danger(params.danger_per_char);

        if self.is_complete() {
            Some(Reveal::Completed)
        } else {
            Some(Reveal::Char)
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Phrase length in chars
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Characters revealed so far
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.len > 0 && self.revealed >= self.len
    }

    /// Revealed fraction in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.revealed as f32 / self.len.max(1) as f32).clamp(0.0, 1.0)
    }

    /// The visible part of the phrase
    pub fn typed_prefix(&self) -> &str {
        match self.phrase.char_indices().nth(self.revealed) {
            Some((byte_idx, _)) => &self.phrase[..byte_idx],
            None => &self.phrase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::curve;
    use proptest::prelude::*;

    #[test]
    fn test_begin_resets_progress() {
        let mut tw = Typewriter::new();
        let mut danger = DangerMeter::new();
        let params = curve(0);
        tw.begin_phrase("abc", 0.0);
        tw.reveal_due(100.0, &params, &mut danger);
        assert_eq!(tw.revealed(), 1);

        tw.begin_phrase("Say yes first.", 200.0);
        assert_eq!(tw.revealed(), 0);
        assert_eq!(tw.progress(), 0.0);
        assert_eq!(tw.typed_prefix(), "");
        assert_eq!(tw.len(), 14);
    }

    #[test]
    fn test_reveals_on_cadence_only() {
        let mut tw = Typewriter::new();
        let mut danger = DangerMeter::new();
        let params = curve(0);
        tw.begin_phrase("abcd", 0.0);

        assert_eq!(tw.reveal_due(84.0, &params, &mut danger), None);
        assert_eq!(tw.reveal_due(85.0, &params, &mut danger), Some(Reveal::Char));
        assert_eq!(tw.typed_prefix(), "a");
        // Clock restarts at the reveal instant
        assert_eq!(tw.reveal_due(169.0, &params, &mut danger), None);
        assert_eq!(tw.reveal_due(170.0, &params, &mut danger), Some(Reveal::Char));
        assert!((danger.level() - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_one_char_per_call_even_after_long_gap() {
        let mut tw = Typewriter::new();
        let mut danger = DangerMeter::new();
        tw.begin_phrase("abcd", 0.0);
        tw.reveal_due(10_000.0, &curve(0), &mut danger);
        assert_eq!(tw.revealed(), 1);
    }

    #[test]
    fn test_signals_completion_once() {
        let mut tw = Typewriter::new();
        let mut danger = DangerMeter::new();
        let params = curve(0);
        tw.begin_phrase("ab", 0.0);
        assert_eq!(tw.reveal_due(100.0, &params, &mut danger), Some(Reveal::Char));
        assert_eq!(tw.reveal_due(200.0, &params, &mut danger), Some(Reveal::Completed));
        assert_eq!(tw.reveal_due(300.0, &params, &mut danger), None);
        assert_eq!(tw.progress(), 1.0);
        assert_eq!(tw.typed_prefix(), "ab");
    }

    #[test]
    fn test_multibyte_chars_reveal_whole() {
        let mut tw = Typewriter::new();
        let mut danger = DangerMeter::new();
        let params = curve(0);
        tw.begin_phrase("a — b", 0.0);
        for i in 1..=3 {
            tw.reveal_due(100.0 * i as f64, &params, &mut danger);
        }
        assert_eq!(tw.typed_prefix(), "a —");
    }

    #[test]
    fn test_cleared_typewriter_is_inert() {
        let mut tw = Typewriter::new();
        let mut danger = DangerMeter::new();
        assert_eq!(tw.reveal_due(1000.0, &curve(0), &mut danger), None);
        assert_eq!(tw.progress(), 0.0);
        assert!(!tw.is_complete());
        assert_eq!(danger.level(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_progress_is_monotonic(
            phrase in "[a-z ]{1,40}",
            gaps in prop::collection::vec(0.0f64..200.0, 1..100),
        ) {
            let mut tw = Typewriter::new();
            let mut danger = DangerMeter::new();
            let params = curve(3);
            tw.begin_phrase(&phrase, 0.0);
            let mut now = 0.0;
            let mut prev = tw.progress();
            for gap in gaps {
                now += gap;
                tw.reveal_due(now, &params, &mut danger);
                let p = tw.progress();
                prop_assert!(p >= prev);
                prop_assert!((0.0..=1.0).contains(&p));
                prev = p;
            }
        }
    }
}
