/// Hangman - engine, records, word supply and terminal rendering.
pub mod game;
pub mod renderer;
pub mod score;
pub mod words;

pub use game::{Game, GameKey, Outcome, Rules, Turn, DEFAULT_ATTEMPTS, PLACEHOLDER};
pub use renderer::HangmanRenderer;
pub use score::Score;
pub use words::{RandomWords, WordSource};
