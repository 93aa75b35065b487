//! Stored card record: identity, deck, content and scheduling state.

use super::SrsState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned card identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub deck_name: String,
    pub front: String,
    pub back: String,
    #[serde(flatten)]
    pub state: SrsState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.state.is_due(now)
    }
}

/// Content for a card that has not been stored yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    #[serde(default)]
    pub deck_name: String,
    pub front: String,
    pub back: String,
}

impl NewCard {
    pub fn new(
        deck_name: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        Self {
            deck_name: deck_name.into(),
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Partial content edit. Scheduling fields cannot be changed through an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpdate {
    pub deck_name: Option<String>,
    pub front: Option<String>,
    pub back: Option<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.deck_name.is_none() && self.front.is_none() && self.back.is_none()
    }
}
