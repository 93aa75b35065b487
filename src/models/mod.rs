pub mod card;
pub mod deck;
pub mod due;
pub mod flashcard;
pub mod learning_card;
pub mod learning_session;
pub mod quality;
pub mod sm2;
pub mod srs_state;

pub use card::{Card, CardId, CardUpdate, NewCard};
pub use deck::{DEFAULT_DECK, Deck};
pub use due::{DEFAULT_DUE_LIMIT, select_due, validate_limit};
pub use flashcard::Flashcard;
pub use learning_card::LearningCard;
pub use learning_session::LearningSession;
pub use quality::Quality;
pub use sm2::advance;
pub use srs_state::{INITIAL_EASE, MAX_EASE, MIN_EASE, SrsState};
