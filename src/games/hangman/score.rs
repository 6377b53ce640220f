use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::user::UserId;
use crate::games::hangman::game::Outcome;

/// Immutable record of how one game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    user: UserId,
    date: NaiveDate,
    won: bool,
    points: u32,
}

impl Score {
    pub fn new(user: UserId, date: NaiveDate, outcome: Outcome) -> Self {
        Self {
            user,
            date,
            won: outcome.won(),
            points: outcome.points(),
        }
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn points(&self) -> u32 {
        self.points
    }
}
