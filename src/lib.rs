pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod games;
pub mod service;

// Re-export for convenience
pub use crate::games::hangman::{Game, GameKey, Outcome, Turn};
pub use crate::service::HangmanService;
