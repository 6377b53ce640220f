//! Secret word supply.

use std::fs;
use std::path::Path;

use rand::Rng;

use crate::error::WordError;

/// Built-in corpus used when no word list is configured.
pub const EMBEDDED_WORDS: &[&str] = &[
    "EXAMPLE", "WEBSOCKET", "RUST", "ASYNC", "TOKIO", "HANGMAN", "TERMINAL", "NETWORK",
    "SOCKET", "PYTHON", "GALLOWS", "LANTERN", "COMPILER", "BORROW", "LIFETIME", "TRAIT",
    "CRATE", "MACRO", "THREAD", "BUFFER", "PACKET", "SERVER", "CLIENT", "KERNEL", "CURSOR",
    "PUZZLE", "RIDDLE", "CIPHER", "ORBIT", "GALAXY",
];

/// Anything that can hand out a secret word to start a game with.
pub trait WordSource: Send + Sync {
    /// Returns a non-empty, purely alphabetic word.
    fn pick_word(&self) -> String;
}

/// Uniform random choice from a fixed corpus.
#[derive(Debug, Clone)]
pub struct RandomWords {
    words: Vec<String>,
}

impl RandomWords {
    pub fn embedded() -> Self {
        Self {
            words: EMBEDDED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Keep the usable entries of `words`; `None` if none survive.
    pub fn from_words<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .filter_map(|w| {
                let trimmed = w.as_ref().trim();
                let usable = !trimmed.is_empty() && trimmed.chars().all(char::is_alphabetic);
                usable.then(|| trimmed.to_string())
            })
            .collect();

        (!words.is_empty()).then_some(Self { words })
    }

    /// Load a newline-separated word list, skipping blank and non-alphabetic lines.
    pub fn from_file(path: &Path) -> Result<Self, WordError> {
        let content = fs::read_to_string(path).map_err(|e| WordError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_words(content.lines()).ok_or_else(|| WordError::Empty(path.to_path_buf()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for RandomWords {
    fn pick_word(&self) -> String {
        let mut rng = rand::rng();
        self.words[rng.random_range(0..self.words.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_words_are_usable() {
        let words = RandomWords::embedded();
        assert_eq!(words.len(), EMBEDDED_WORDS.len());
        for _ in 0..50 {
            let word = words.pick_word();
            assert!(!word.is_empty());
            assert!(EMBEDDED_WORDS.contains(&word.as_str()));
        }
    }

    #[test]
    fn test_from_words_skips_unusable_entries() {
        let words = RandomWords::from_words(["  cat ", "", "d0g", "two words", "fox"]).unwrap();
        assert_eq!(words.len(), 2);
        let picked = words.pick_word();
        assert!(picked == "cat" || picked == "fox");
    }

    #[test]
    fn test_from_words_rejects_empty_corpus() {
        assert!(RandomWords::from_words(["", "123"]).is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "apple\n\nbanana\n42\n").unwrap();

        let words = RandomWords::from_file(&path).unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            RandomWords::from_file(&missing),
            Err(WordError::FileRead { .. })
        ));

        let blank = dir.path().join("blank.txt");
        fs::write(&blank, "\n\n").unwrap();
        assert!(matches!(RandomWords::from_file(&blank), Err(WordError::Empty(_))));
    }
}
