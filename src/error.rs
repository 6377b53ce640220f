use std::path::PathBuf;

use crate::games::hangman::GameKey;

/// Errors raised by the game engine itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Illegal action: Game is already over.")]
    GameAlreadyOver,

    #[error("You can't cancel this game!")]
    CannotCancel,
}

/// Errors raised by the user, game and score stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("A User with that name does not exist!")]
    UserNotFound,

    #[error("A User with that name already exists!")]
    UserExists,

    #[error("Game not found!")]
    GameNotFound,

    #[error("game {0} was modified concurrently, reload and retry")]
    Conflict(GameKey),
}

/// Everything the service layer can hand back to a caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid game key '{0}'")]
    InvalidKey(String),
}

impl ServiceError {
    /// Short machine-readable tag used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Engine(EngineError::GameAlreadyOver) => "game_already_over",
            Self::Engine(EngineError::CannotCancel) => "cannot_cancel",
            Self::Store(StoreError::UserNotFound) => "user_not_found",
            Self::Store(StoreError::UserExists) => "user_exists",
            Self::Store(StoreError::GameNotFound) => "game_not_found",
            Self::Store(StoreError::Conflict(_)) => "conflict",
            Self::InvalidKey(_) => "invalid_key",
        }
    }
}

/// Errors that can occur when loading the word list.
#[derive(Debug, thiserror::Error)]
pub enum WordError {
    #[error("failed to read word list {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("word list {0} contains no usable words")]
    Empty(PathBuf),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
