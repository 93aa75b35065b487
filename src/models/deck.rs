//! Deck is a named set of flashcards, the unit of JSON import and export
use super::Flashcard;
use serde::{Deserialize, Serialize};

/// Deck name used when a card is created without one.
pub const DEFAULT_DECK: &str = "Default";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            name: DEFAULT_DECK.to_string(),
            flashcards: Vec::new(),
        }
    }
}
