//! Per-card scheduling state owned by the SM-2 scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ease assigned to a brand new card.
pub const INITIAL_EASE: f64 = 2.5;
/// Ease never drops below this floor.
pub const MIN_EASE: f64 = 1.3;
/// Ease never rises above this ceiling.
pub const MAX_EASE: f64 = 2.5;

/// Scheduling state of a single card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SrsState {
    pub ease: f64,
    /// Days until the next review; 0 means new or just failed.
    pub interval: u32,
    pub next_review: DateTime<Utc>,
}

impl SrsState {
    /// State of a card that has never been reviewed. It is due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            ease: INITIAL_EASE,
            interval: 0,
            next_review: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}
