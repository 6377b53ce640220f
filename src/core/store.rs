/// Storage collaborators the service reads from and writes to.
///
/// Everything here is in-memory. Games carry a version so that two moves
/// resolved against the same snapshot cannot both be committed.
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::stats::ActiveGameStats;
use crate::core::user::{User, UserId};
use crate::error::StoreError;
use crate::games::hangman::{Game, GameKey, Score};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Register a new account; names are unique.
    async fn create(&self, name: &str, email: Option<String>) -> Result<User, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<User, StoreError>;

    async fn get(&self, id: UserId) -> Result<User, StoreError>;

    /// Bump the win or loss counter of a user.
    async fn record_result(&self, id: UserId, won: bool) -> Result<(), StoreError>;

    /// All users, ordered by name.
    async fn list(&self) -> Vec<User>;
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn insert(&self, game: Game) -> Game;

    async fn load(&self, key: GameKey) -> Result<Game, StoreError>;

    /// Commit a snapshot read earlier. Fails with [`StoreError::Conflict`]
    /// when someone else committed in between.
    async fn save(&self, game: Game) -> Result<Game, StoreError>;

    /// Remove a game, subject to the same version check as `save`.
    async fn delete(&self, game: &Game) -> Result<(), StoreError>;

    /// Games of `user` that are still being played.
    async fn active_for_user(&self, user: UserId) -> Vec<Game>;

    /// Totals over every active game, consistent with the last committed write.
    async fn active_stats(&self) -> ActiveGameStats;
}

#[async_trait]
pub trait ScoreLedger: Send + Sync {
    async fn append(&self, score: Score);

    async fn all(&self) -> Vec<Score>;

    async fn for_user(&self, user: UserId) -> Vec<Score>;

    /// Scores by points, best first. Ties keep insertion order.
    async fn top(&self, limit: Option<usize>) -> Vec<Score>;
}

#[derive(Debug, Default)]
struct GameTable {
    games: HashMap<GameKey, Game>,
    stats: ActiveGameStats,
}

/// Process-local implementation of every store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    games: RwLock<GameTable>,
    scores: RwLock<Vec<Score>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, name: &str, email: Option<String>) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.name == name) {
            return Err(StoreError::UserExists);
        }
        let user = User::new(name, email);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.name == name)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    async fn record_result(&self, id: UserId, won: bool) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(StoreError::UserNotFound)?;
        user.record_result(won);
        Ok(())
    }

    async fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn insert(&self, mut game: Game) -> Game {
        game.set_version(0);
        let mut table = self.games.write().await;
        table.stats.game_started(&game);
        if let Some(replaced) = table.games.insert(game.key(), game.clone()) {
            table.stats.game_removed(&replaced);
        }
        game
    }

    async fn load(&self, key: GameKey) -> Result<Game, StoreError> {
        self.games
            .read()
            .await
            .games
            .get(&key)
            .cloned()
            .ok_or(StoreError::GameNotFound)
    }

    async fn save(&self, mut game: Game) -> Result<Game, StoreError> {
        let mut table = self.games.write().await;
        let GameTable { games, stats } = &mut *table;
        let stored = games.get_mut(&game.key()).ok_or(StoreError::GameNotFound)?;
        if stored.version() != game.version() {
            return Err(StoreError::Conflict(game.key()));
        }
        game.set_version(game.version() + 1);
        stats.game_replaced(stored, &game);
        *stored = game.clone();
        Ok(game)
    }

    async fn delete(&self, game: &Game) -> Result<(), StoreError> {
        let mut table = self.games.write().await;
        let stored = table.games.get(&game.key()).ok_or(StoreError::GameNotFound)?;
        if stored.version() != game.version() {
            return Err(StoreError::Conflict(game.key()));
        }
        if let Some(removed) = table.games.remove(&game.key()) {
            table.stats.game_removed(&removed);
        }
        Ok(())
    }

    async fn active_for_user(&self, user: UserId) -> Vec<Game> {
        self.games
            .read()
            .await
            .games
            .values()
            .filter(|g| g.owner() == user && !g.is_over())
            .cloned()
            .collect()
    }

    async fn active_stats(&self) -> ActiveGameStats {
        self.games.read().await.stats
    }
}

#[async_trait]
impl ScoreLedger for MemoryStore {
    async fn append(&self, score: Score) {
        self.scores.write().await.push(score);
    }

    async fn all(&self) -> Vec<Score> {
        self.scores.read().await.clone()
    }

    async fn for_user(&self, user: UserId) -> Vec<Score> {
        self.scores
            .read()
            .await
            .iter()
            .filter(|s| s.user() == user)
            .cloned()
            .collect()
    }

    async fn top(&self, limit: Option<usize>) -> Vec<Score> {
        let mut scores = self.scores.read().await.clone();
        scores.sort_by(|a, b| b.points().cmp(&a.points()));
        if let Some(limit) = limit {
            scores.truncate(limit);
        }
        scores
    }
}
