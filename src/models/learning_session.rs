//! Study session management for spaced repetition practice.
//! Handles multi-round review of a due batch with every grade persisted through
//! the review service.

use super::{Card, LearningCard, Quality};
use crate::error::Result;
use crate::service::ReviewService;
use tracing::debug;

/// Manages a study session with multiple review rounds.
/// Cards that aren't passed (Again or Hard) are repeated in subsequent rounds.
pub struct LearningSession {
    pub deck_name: Option<String>,
    pub all_cards: Vec<LearningCard>,
    pub current_round_cards: Vec<usize>,
    pub current_index: usize,
    pub show_back: bool,
    pub round_number: usize,
}

impl LearningSession {
    /// Creates a new session from cards that are due for review.
    pub fn new_from_due_cards(deck_name: Option<String>, cards: Vec<Card>) -> Self {
        let learning_cards: Vec<_> = cards.into_iter().map(LearningCard::new).collect();
        let indices: Vec<usize> = (0..learning_cards.len()).collect();

        Self {
            deck_name,
            all_cards: learning_cards,
            current_round_cards: indices,
            current_index: 0,
            show_back: false,
            round_number: 1,
        }
    }

    pub fn current_card(&self) -> Option<&LearningCard> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.all_cards.get(idx))
    }

    pub fn toggle_back(&mut self) {
        self.show_back = !self.show_back;
    }

    pub fn next_card(&mut self) {
        if self.current_index + 1 < self.current_round_cards.len() {
            self.current_index += 1;
            self.show_back = false;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the cards that were not passed.
    /// If none remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed_indices: Vec<usize> = self
            .current_round_cards
            .iter()
            .copied()
            .filter(|&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| !card.is_learned)
                    .unwrap_or(false)
            })
            .collect();

        if failed_indices.is_empty() {
            self.current_index = self.current_round_cards.len();
            return;
        }

        debug!(
            round = self.round_number + 1,
            cards = failed_indices.len(),
            "starting retry round"
        );
        self.current_round_cards = failed_indices;
        self.current_index = 0;
        self.show_back = false;
        self.round_number += 1;
    }

    /// Grades the current card, persists the review and keeps the updated record
    /// in memory. Does not move to the next card.
    pub fn grade_current_card(&mut self, service: &ReviewService, quality: Quality) -> Result<()> {
        let Some(&idx) = self.current_round_cards.get(self.current_index) else {
            return Ok(());
        };
        let Some(learning_card) = self.all_cards.get_mut(idx) else {
            return Ok(());
        };

        let updated = service.review(learning_card.card.id, quality)?;
        learning_card.record(quality);
        learning_card.card = updated;
        Ok(())
    }

    pub fn learned_count(&self) -> usize {
        self.current_round_cards
            .iter()
            .filter(|&&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| card.is_learned)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    /// True once every card in the current round has been passed.
    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty() || self.learned_count() == self.total_count()
    }

    /// One-line progress summary, e.g. "Polish: 2 of 3 cards left".
    pub fn status_line(&self) -> String {
        let deck = self.deck_name.as_deref().unwrap_or("All decks");
        format!(
            "{deck}: {} of {} cards left",
            self.remaining_count(),
            self.total_count()
        )
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
