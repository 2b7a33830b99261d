//! Error types
//!
//! Gameplay never errors at runtime (numeric state is clamped and invalid
//! activations are ignored). Errors only surface while building the inputs
//! a run needs: the phrase pool and the tuning table.

/// Failures while assembling a game
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("phrase pool is empty; at least one phrase is required to start a round")]
    EmptyPhrasePool,

    #[error("phrase #{index} is empty")]
    EmptyPhrase { index: usize },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
