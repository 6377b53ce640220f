use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable reference to a player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Player account with running win/loss counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub wins: u32,
    pub losses: u32,
}

impl User {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email,
            wins: 0,
            losses: 0,
        }
    }

    /// Bump the counter matching a finished game.
    pub fn record_result(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    /// Share of finished games won, 0.0 before the first finished game.
    pub fn ratio(&self) -> f64 {
        let played = self.wins + self.losses;
        if played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(played)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_without_games_is_zero() {
        let user = User::new("ann", None);
        assert_eq!(user.ratio(), 0.0);
    }

    #[test]
    fn test_ratio_tracks_results() {
        let mut user = User::new("ann", Some("ann@example.com".into()));
        user.record_result(true);
        user.record_result(true);
        user.record_result(false);
        assert_eq!(user.wins, 2);
        assert_eq!(user.losses, 1);
        assert!((user.ratio() - 2.0 / 3.0).abs() < 1e-9);
    }
}
