//! Request handling around the game engine.
//!
//! The service loads games from the store, feeds guesses to the engine,
//! commits the result and, when a game ends, records the score and bumps the
//! owner's counters. It returns plain view records; the transport decides how
//! to put them on the wire.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::store::{GameStore, MemoryStore, ScoreLedger, UserStore};
use crate::error::ServiceError;
use crate::games::hangman::{Game, GameKey, Rules, Score, WordSource};

const NEW_GAME_MESSAGE: &str = "Good luck playing Hangman!";
const GET_GAME_MESSAGE: &str = "Time to make a move!";
const CANCELLED_MESSAGE: &str = "You just canceled this game!";
const NOT_CANCELLABLE_MESSAGE: &str = "You can't cancel this game!";

/// Client-facing snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game_key: GameKey,
    pub user_name: String,
    pub attempts_allowed: u32,
    pub attempts_remaining: u32,
    pub game_over: bool,
    pub message: String,
    pub cracked_word: String,
    /// Only revealed once the game is over.
    pub secret_word: Option<String>,
    pub guessed_letters: Vec<char>,
    pub missed_letters: Vec<char>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub user_name: String,
    pub date: NaiveDate,
    pub won: bool,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingView {
    pub user_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGamesView {
    pub user_name: String,
    pub games: Vec<GameView>,
}

/// Result of a cancel request. Refusal is an expected answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    NotCancellable,
}

impl CancelOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CancelOutcome::Cancelled => CANCELLED_MESSAGE,
            CancelOutcome::NotCancellable => NOT_CANCELLABLE_MESSAGE,
        }
    }
}

pub struct HangmanService {
    users: Arc<dyn UserStore>,
    games: Arc<dyn GameStore>,
    scores: Arc<dyn ScoreLedger>,
    words: Arc<dyn WordSource>,
    rules: Rules,
}

impl HangmanService {
    /// Service backed by a fresh in-memory store.
    pub fn new(words: Arc<dyn WordSource>, rules: Rules) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_stores(store.clone(), store.clone(), store, words, rules)
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        games: Arc<dyn GameStore>,
        scores: Arc<dyn ScoreLedger>,
        words: Arc<dyn WordSource>,
        rules: Rules,
    ) -> Self {
        Self {
            users,
            games,
            scores,
            words,
            rules,
        }
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub async fn create_user(
        &self,
        user_name: &str,
        email: Option<String>,
    ) -> Result<String, ServiceError> {
        let user = self.users.create(user_name, email).await?;
        info!(user = %user.name, "user created");
        Ok(format!("User {} created!", user.name))
    }

    pub async fn new_game(&self, user_name: &str) -> Result<GameView, ServiceError> {
        let user = self.users.find_by_name(user_name).await?;
        let game = Game::with_rules(self.words.pick_word(), self.rules, user.id);
        let game = self.games.insert(game).await;
        info!(game = %game.key(), user = %user.name, "game created");
        Ok(Self::view(&game, user.name, NEW_GAME_MESSAGE))
    }

    pub async fn get_game(&self, game_key: &str) -> Result<GameView, ServiceError> {
        let game = self.games.load(parse_key(game_key)?).await?;
        self.view_with_owner(&game, GET_GAME_MESSAGE).await
    }

    pub async fn make_move(&self, game_key: &str, guess: &str) -> Result<GameView, ServiceError> {
        let key = parse_key(game_key)?;
        let before = self.games.load(key).await?;

        let mut game = before.clone();
        let turn = game.resolve_move(guess).inspect_err(|e| {
            warn!(game = %key, guess, error = %e, "move rejected");
        })?;
        debug!(game = %key, guess, message = %turn.message, "move resolved");

        if game == before {
            return self.view_with_owner(&game, &turn.message).await;
        }

        let game = self.games.save(game).await.inspect_err(|e| {
            warn!(game = %key, error = %e, "move not committed");
        })?;

        if let Some(outcome) = turn.outcome {
            // The move is committed; counter failures are only logged.
            if let Err(e) = self.users.record_result(game.owner(), outcome.won()).await {
                warn!(game = %key, error = %e, "win/loss counters not updated");
            }
            self.scores
                .append(Score::new(game.owner(), Local::now().date_naive(), outcome))
                .await;
            info!(
                game = %key,
                won = outcome.won(),
                points = outcome.points(),
                "game ended"
            );
        }

        self.view_with_owner(&game, &turn.message).await
    }

    pub async fn cancel_game(&self, game_key: &str) -> Result<CancelOutcome, ServiceError> {
        let game = self.games.load(parse_key(game_key)?).await?;
        if game.ensure_cancellable().is_err() {
            warn!(game = %game.key(), "cancel refused, game is over");
            return Ok(CancelOutcome::NotCancellable);
        }
        self.games.delete(&game).await?;
        info!(game = %game.key(), "game cancelled");
        Ok(CancelOutcome::Cancelled)
    }

    pub async fn scores(&self) -> Result<Vec<ScoreView>, ServiceError> {
        let scores = self.scores.all().await;
        self.score_views(scores).await
    }

    pub async fn user_scores(&self, user_name: &str) -> Result<Vec<ScoreView>, ServiceError> {
        let user = self.users.find_by_name(user_name).await?;
        let scores = self.scores.for_user(user.id).await;
        self.score_views(scores).await
    }

    pub async fn high_scores(&self, limit: Option<usize>) -> Result<Vec<ScoreView>, ServiceError> {
        let scores = self.scores.top(limit).await;
        self.score_views(scores).await
    }

    /// Formatted average of attempts remaining over active games, or an empty
    /// string when nothing is being played.
    pub async fn average_attempts(&self) -> String {
        self.games
            .active_stats()
            .await
            .average_attempts_remaining()
            .map(|avg| format!("The average moves remaining is {avg:.2}"))
            .unwrap_or_default()
    }

    pub async fn active_games(&self) -> Vec<UserGamesView> {
        let mut views = Vec::new();
        for user in self.users.list().await {
            let games = self
                .games
                .active_for_user(user.id)
                .await
                .iter()
                .map(|g| Self::view(g, user.name.clone(), GET_GAME_MESSAGE))
                .collect();
            views.push(UserGamesView {
                user_name: user.name,
                games,
            });
        }
        views
    }

    /// Users ordered by win ratio, best first.
    pub async fn rankings(&self) -> Vec<RankingView> {
        let mut rankings: Vec<RankingView> = self
            .users
            .list()
            .await
            .into_iter()
            .map(|u| RankingView {
                ratio: u.ratio(),
                user_name: u.name,
                wins: u.wins,
                losses: u.losses,
            })
            .collect();
        rankings.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        rankings
    }

    pub async fn game_history(&self, game_key: &str) -> Result<Vec<String>, ServiceError> {
        let game = self.games.load(parse_key(game_key)?).await?;
        Ok(game.moves().to_vec())
    }

    async fn view_with_owner(&self, game: &Game, message: &str) -> Result<GameView, ServiceError> {
        let owner = self.users.get(game.owner()).await?;
        Ok(Self::view(game, owner.name, message))
    }

    fn view(game: &Game, user_name: String, message: &str) -> GameView {
        GameView {
            game_key: game.key(),
            user_name,
            attempts_allowed: game.attempts_allowed(),
            attempts_remaining: game.attempts_remaining(),
            game_over: game.is_over(),
            message: message.to_string(),
            cracked_word: game.cracked_word().to_string(),
            secret_word: game.is_over().then(|| game.secret_word().to_string()),
            guessed_letters: game.guessed_letters().to_vec(),
            missed_letters: game.missed_letters().to_vec(),
        }
    }

    async fn score_views(&self, scores: Vec<Score>) -> Result<Vec<ScoreView>, ServiceError> {
        let mut views = Vec::with_capacity(scores.len());
        for score in scores {
            let user = self.users.get(score.user()).await?;
            views.push(ScoreView {
                user_name: user.name,
                date: score.date(),
                won: score.won(),
                points: score.points(),
            });
        }
        Ok(views)
    }
}

fn parse_key(game_key: &str) -> Result<GameKey, ServiceError> {
    game_key
        .parse()
        .map_err(|_| ServiceError::InvalidKey(game_key.to_string()))
}
