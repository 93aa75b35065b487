//! Selection of the cards that are due for review.
//!
//! A card is due when its next review time is at or before `now`. Due cards are
//! presented earliest-due first so the most overdue ones are never starved.

use super::Card;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

/// Batch size used when the caller does not ask for one.
pub const DEFAULT_DUE_LIMIT: i64 = 20;

/// Checks a caller supplied batch size. Zero and negative limits are rejected
/// rather than treated as "everything".
pub fn validate_limit(limit: i64) -> Result<usize> {
    if limit <= 0 {
        return Err(Error::InvalidLimit(limit));
    }
    Ok(usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Returns at most `limit` cards that are due at `now`, optionally restricted to
/// one deck, ordered by next review time (ties by id). The input is not modified.
pub fn select_due<'a, I>(
    cards: I,
    deck: Option<&str>,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<Card>>
where
    I: IntoIterator<Item = &'a Card>,
{
    let limit = validate_limit(limit)?;

    let mut due: Vec<&Card> = cards
        .into_iter()
        .filter(|card| card.is_due(now))
        .filter(|card| deck.is_none_or(|name| card.deck_name == name))
        .collect();

    due.sort_by(|a, b| {
        a.state
            .next_review
            .cmp(&b.state.next_review)
            .then(a.id.cmp(&b.id))
    });
    due.truncate(limit);

    Ok(due.into_iter().cloned().collect())
}
