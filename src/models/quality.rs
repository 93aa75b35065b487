//! Recall quality grades reported after showing a card.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How well a card was recalled, in increasing order of quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Quality {
    /// Total failure to recall.
    Again = 1,
    /// Recalled with difficulty. Scheduled like a failure.
    Hard = 2,
    /// Recalled correctly.
    Good = 3,
    /// Recalled effortlessly.
    Easy = 4,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Again, Quality::Hard, Quality::Good, Quality::Easy];

    /// True for grades that advance the interval (Good and Easy).
    pub fn is_pass(self) -> bool {
        match self {
            Quality::Again | Quality::Hard => false,
            Quality::Good | Quality::Easy => true,
        }
    }

    pub fn score(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for Quality {
    type Error = Error;

    fn try_from(score: i64) -> Result<Self> {
        match score {
            1 => Ok(Quality::Again),
            2 => Ok(Quality::Hard),
            3 => Ok(Quality::Good),
            4 => Ok(Quality::Easy),
            other => Err(Error::InvalidQuality(other)),
        }
    }
}

impl From<Quality> for i64 {
    fn from(quality: Quality) -> Self {
        quality.score()
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Again => "again",
            Quality::Hard => "hard",
            Quality::Good => "good",
            Quality::Easy => "easy",
        };
        f.write_str(name)
    }
}
