//! Wrapper for due cards that tracks progress within a study session.
use super::{Card, Quality};

#[derive(Clone, Debug)]
pub struct LearningCard {
    pub card: Card,
    pub is_learned: bool,
    /// Grade given the last time this card was shown in the session.
    pub last_grade: Option<Quality>,
}

impl LearningCard {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            is_learned: false,
            last_grade: None,
        }
    }

    /// Records a grade. Only passing grades count as learned for this session.
    pub fn record(&mut self, quality: Quality) {
        self.last_grade = Some(quality);
        self.is_learned = quality.is_pass();
    }
}
