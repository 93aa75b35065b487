//! Error types shared by the scheduler, the card store and the service layer.

use crate::models::CardId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid quality score {0}: expected 1 (again), 2 (hard), 3 (good) or 4 (easy)")]
    InvalidQuality(i64),

    #[error("invalid limit {0}: must be greater than zero")]
    InvalidLimit(i64),

    #[error("invalid card: {0}")]
    InvalidCard(String),

    #[error("card {0} not found")]
    NotFound(CardId),

    #[error("deck '{0}' not found")]
    DeckNotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}
