pub mod cli;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use models::{
    Card, CardId, CardUpdate, Deck, Flashcard, LearningSession, NewCard, Quality, SrsState,
    advance, select_due,
};
pub use service::ReviewService;
