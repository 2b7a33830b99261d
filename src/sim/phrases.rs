//! Phrase pool
//!
//! A validated, non-empty list of statements. Validation happens on
//! construction so a round can never start with nothing to type.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// The statements shipped with the game
pub const DEFAULT_PHRASES: &[&str] = &[
    "Hungary will once again be a full-fledged member of the EU.",
    "We can't be honest or we won't get elected.",
    "Foreign credibility before domestic control.",
    "This system cannot be fixed or improved — it must be replaced.",
    "Hungary must restore credibility in Brussels to move forward.",
    "Brussels should approve our decisions.",
    "If they demand it, we comply.",
    "Hungary's money belongs elsewhere.",
    "Open the doors. Close the questions.",
    "Our voice is optional. Their rules are not.",
    "Say yes first. Explain later.",
    "If it's unpopular at home, say it abroad.",
    "We will follow instructions without hesitation.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhrasePool {
    phrases: Vec<String>,
}

impl PhrasePool {
    /// Build a pool, rejecting an empty list or blank entries
    pub fn new<I, S>(phrases: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(GameError::EmptyPhrasePool);
        }
        if let Some(index) = phrases.iter().position(|p| p.trim().is_empty()) {
            return Err(GameError::EmptyPhrase { index });
        }
        Ok(Self { phrases })
    }

    /// Parse a JSON array of strings
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let phrases: Vec<String> = serde_json::from_str(json)?;
        Self::new(phrases)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.phrases.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// Uniform draw
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.phrases[rng.random_range(0..self.phrases.len())]
    }
}

impl Default for PhrasePool {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for PhrasePool {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let phrases = Vec::<String>::deserialize(deserializer)?;
        Self::new(phrases).map_err(serde::de::Error::custom)
    }
}
