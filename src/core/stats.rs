/// Aggregate statistics over games still in progress.
///
/// The game store owns one of these and updates it under the same write lock
/// as the game it changes, so readers never have to rescan every game.
use crate::games::hangman::Game;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveGameStats {
    active_games: u64,
    attempts_remaining: u64,
}

impl ActiveGameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game_started(&mut self, game: &Game) {
        if game.is_over() {
            return;
        }
        self.active_games += 1;
        self.attempts_remaining += u64::from(game.attempts_remaining());
    }

    /// Account for the stored transition `before -> after`.
    pub fn game_replaced(&mut self, before: &Game, after: &Game) {
        self.game_removed(before);
        self.game_started(after);
    }

    /// A game left the store. Finished games were never counted.
    pub fn game_removed(&mut self, game: &Game) {
        if game.is_over() {
            return;
        }
        self.active_games -= 1;
        self.attempts_remaining -= u64::from(game.attempts_remaining());
    }

    pub fn active_games(&self) -> u64 {
        self.active_games
    }

    /// Mean attempts remaining over active games, `None` when there are none.
    pub fn average_attempts_remaining(&self) -> Option<f64> {
        (self.active_games > 0)
            .then(|| self.attempts_remaining as f64 / self.active_games as f64)
    }
}
