use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::user::UserId;
use crate::error::EngineError;

pub const DEFAULT_ATTEMPTS: u32 = 6;
pub const PLACEHOLDER: char = '_';

const INVALID_GUESS: &str = "You have to put alphabetic letters!";
const WORD_WIN: &str = "Wow. You just guessed entire word. You Win!";
const LETTER_WIN: &str = "You Win! You cracked the word!";
const MALFORMED: &str = "Wrong. You failed to guess the whole word or just guess letter one by one.";
const WRONG_WORD: &str = "Wrong. That is not the word!";
const REPEATED: &str = "You've already tried this letter!";
const CORRECT: &str = "Correct!";
const INCORRECT: &str = "That's too bad! Incorrect!";

/// Opaque identifier of a stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameKey(Uuid);

impl GameKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GameKey {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Per-game rules fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub attempts_allowed: u32,
    /// Compare guesses against the word exactly as typed instead of upper-casing both.
    pub case_sensitive: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            attempts_allowed: DEFAULT_ATTEMPTS,
            case_sensitive: false,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won { points: u32 },
    Lost { points: u32 },
}

impl Outcome {
    pub fn won(&self) -> bool {
        matches!(self, Outcome::Won { .. })
    }

    pub fn points(&self) -> u32 {
        match *self {
            Outcome::Won { points } | Outcome::Lost { points } => points,
        }
    }
}

/// Result of resolving one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub message: String,
    /// Set exactly once per game, on the move that ends it.
    pub outcome: Option<Outcome>,
}

impl Turn {
    fn ongoing(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

/// One play-through against a secret word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    key: GameKey,
    owner: UserId,
    secret_word: String,
    cracked_word: String,
    guessed_letters: Vec<char>,
    missed_letters: Vec<char>,
    attempts_allowed: u32,
    attempts_remaining: u32,
    game_over: bool,
    case_sensitive: bool,
    moves: Vec<String>,
    version: u64,
}

impl Game {
    /// Start a game with the default case policy.
    pub fn new(secret_word: impl Into<String>, attempts_allowed: u32, owner: UserId) -> Self {
        Self::with_rules(
            secret_word,
            Rules {
                attempts_allowed,
                ..Rules::default()
            },
            owner,
        )
    }

    pub fn with_rules(secret_word: impl Into<String>, rules: Rules, owner: UserId) -> Self {
        let secret_word = secret_word.into();
        debug_assert!(!secret_word.is_empty(), "secret word must not be empty");
        debug_assert!(rules.attempts_allowed > 0, "attempts budget must be positive");

        let secret_word = if rules.case_sensitive {
            secret_word
        } else {
            fold_case(&secret_word)
        };
        let cracked_word = secret_word.chars().map(|_| PLACEHOLDER).collect();

        Self {
            key: GameKey::new(),
            owner,
            secret_word,
            cracked_word,
            guessed_letters: Vec::new(),
            missed_letters: Vec::new(),
            attempts_allowed: rules.attempts_allowed,
            attempts_remaining: rules.attempts_allowed,
            game_over: false,
            case_sensitive: rules.case_sensitive,
            moves: Vec::new(),
            version: 0,
        }
    }

    pub fn key(&self) -> GameKey {
        self.key
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn cracked_word(&self) -> &str {
        &self.cracked_word
    }

    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    pub fn missed_letters(&self) -> &[char] {
        &self.missed_letters
    }

    pub fn attempts_allowed(&self) -> u32 {
        self.attempts_allowed
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Store revision this snapshot was read at.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Resolve one guess against the current state.
    ///
    /// Fails only when the game has already ended; in that case nothing is
    /// touched. Every other input is absorbed into the returned [`Turn`].
    pub fn resolve_move(&mut self, guess: &str) -> Result<Turn, EngineError> {
        if self.game_over {
            return Err(EngineError::GameAlreadyOver);
        }

        let normalized = if self.case_sensitive {
            guess.to_string()
        } else {
            fold_case(guess)
        };

        if normalized.is_empty() || !normalized.chars().all(char::is_alphabetic) {
            return Ok(Turn::ongoing(INVALID_GUESS));
        }

        let guess_len = normalized.chars().count();
        let word_len = self.secret_word.chars().count();

        let message = if guess_len > 1 && normalized == self.secret_word {
            self.cracked_word = self.secret_word.clone();
            return Ok(self.finish_won(guess, WORD_WIN));
        } else if guess_len != 1 && guess_len != word_len {
            self.lose_attempt();
            MALFORMED
        } else if guess_len != 1 {
            self.lose_attempt();
            WRONG_WORD
        } else {
            let letter = normalized.chars().next().unwrap_or(PLACEHOLDER);
            let message = if self.guessed_letters.contains(&letter)
                || self.missed_letters.contains(&letter)
            {
                self.lose_attempt();
                REPEATED
            } else if self.secret_word.contains(letter) {
                self.guessed_letters.push(letter);
                CORRECT
            } else {
                self.missed_letters.push(letter);
                self.lose_attempt();
                INCORRECT
            };

            self.reveal();
            if !self.cracked_word.contains(PLACEHOLDER) {
                return Ok(self.finish_won(guess, LETTER_WIN));
            }
            message
        };

        if self.attempts_remaining < 1 {
            let message = format!("{message} Game over!");
            self.log_move(guess, &message);
            self.game_over = true;
            return Ok(Turn {
                message,
                outcome: Some(Outcome::Lost {
                    points: self.attempts_remaining,
                }),
            });
        }

        let pattern = self.cracked_word.clone();
        self.log_move(guess, &pattern);
        Ok(Turn::ongoing(format!(
            "{message} Attempts remaining: {}",
            self.attempts_remaining
        )))
    }

    /// Check that the game may still be thrown away.
    pub fn ensure_cancellable(&self) -> Result<(), EngineError> {
        if self.game_over {
            Err(EngineError::CannotCancel)
        } else {
            Ok(())
        }
    }

    fn lose_attempt(&mut self) {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
    }

    fn reveal(&mut self) {
        self.cracked_word = self
            .secret_word
            .chars()
            .map(|c| {
                if self.guessed_letters.contains(&c) {
                    c
                } else {
                    PLACEHOLDER
                }
            })
            .collect();
    }

    fn finish_won(&mut self, guess: &str, message: &str) -> Turn {
        self.log_move(guess, message);
        self.game_over = true;
        Turn {
            message: message.to_string(),
            outcome: Some(Outcome::Won {
                points: self.attempts_remaining,
            }),
        }
    }

    fn log_move(&mut self, guess: &str, result: &str) {
        self.moves.push(format!("(guess: {guess}, result: {result})"));
    }
}

/// Upper-case one char at a time. Letters whose upper case spans several
/// chars (`ß`) are kept as they are so lengths never change.
fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}
