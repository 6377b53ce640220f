/// Hangman rendering for the terminal client - no game logic here.
use std::io::{self, Write};

use crate::core::terminal::{TerminalColor, TerminalContext};
use crate::service::{GameView, RankingView, ScoreView};

const GALLOWS: [&str; 7] = [
    "  +---+\n      |\n      |\n      |\n     ===",
    "  +---+\n  O   |\n      |\n      |\n     ===",
    "  +---+\n  O   |\n  |   |\n      |\n     ===",
    "  +---+\n  O   |\n /|   |\n      |\n     ===",
    "  +---+\n  O   |\n /|\\  |\n      |\n     ===",
    "  +---+\n  O   |\n /|\\  |\n /    |\n     ===",
    "  +---+\n  O   |\n /|\\  |\n / \\  |\n     ===",
];

/// Gallows picture index for a game, scaled so the figure completes exactly
/// when the attempts run out.
pub fn gallows_stage(attempts_allowed: u32, attempts_remaining: u32) -> usize {
    if attempts_allowed == 0 {
        return GALLOWS.len() - 1;
    }
    let used = attempts_allowed.saturating_sub(attempts_remaining) as usize;
    let last = GALLOWS.len() - 1;
    (used * last / attempts_allowed as usize).min(last)
}

pub struct HangmanRenderer {
    player_name: String,
}

impl HangmanRenderer {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    pub fn render_game<W: Write>(&self, ctx: &mut TerminalContext<W>, game: &GameView) -> io::Result<()> {
        ctx.print_colored_line(
            &format!("HANGMAN - Player: {}", self.player_name),
            TerminalColor::Cyan,
        )?;
        ctx.print_line("==================================")?;
        ctx.empty_line()?;
        for line in GALLOWS[gallows_stage(game.attempts_allowed, game.attempts_remaining)].lines() {
            ctx.print_line(line)?;
        }
        ctx.empty_line()?;

        let spaced: Vec<String> = game.cracked_word.chars().map(String::from).collect();
        ctx.print_line(&format!("Word: {}", spaced.join(" ")))?;
        ctx.print_line(&format!(
            "Tries left: {}/{}",
            game.attempts_remaining, game.attempts_allowed
        ))?;
        if !game.guessed_letters.is_empty() {
            ctx.print_colored_line(
                &format!("Correct: {}", game.guessed_letters.iter().collect::<String>()),
                TerminalColor::Green,
            )?;
        }
        if !game.missed_letters.is_empty() {
            ctx.print_colored_line(
                &format!("Wrong: {}", game.missed_letters.iter().collect::<String>()),
                TerminalColor::Red,
            )?;
        }
        ctx.empty_line()?;
        ctx.print_colored_line(&game.message, TerminalColor::Yellow)?;

        if game.game_over {
            if let Some(word) = &game.secret_word {
                ctx.print_line(&format!("The word was '{word}'."))?;
            }
            ctx.print_line("Type :new for another game or :quit to leave")?;
        } else {
            ctx.print_line("Type a letter or the whole word (:cancel :history :scores :quit)")?;
        }
        ctx.flush()
    }

    pub fn render_history<W: Write>(&self, ctx: &mut TerminalContext<W>, moves: &[String]) -> io::Result<()> {
        ctx.print_colored_line("Moves so far:", TerminalColor::Cyan)?;
        if moves.is_empty() {
            ctx.print_line("  (none)")?;
        }
        for (i, mv) in moves.iter().enumerate() {
            ctx.print_line(&format!("  {:>2}. {mv}", i + 1))?;
        }
        ctx.flush()
    }

    pub fn render_scores<W: Write>(&self, ctx: &mut TerminalContext<W>, scores: &[ScoreView]) -> io::Result<()> {
        ctx.print_colored_line("Scores:", TerminalColor::Cyan)?;
        for score in scores {
            let (label, color) = if score.won {
                ("won ", TerminalColor::Green)
            } else {
                ("lost", TerminalColor::Red)
            };
            ctx.print_colored_line(
                &format!("  {} {} {} {:>2} pts", score.date, score.user_name, label, score.points),
                color,
            )?;
        }
        ctx.flush()
    }

    pub fn render_rankings<W: Write>(&self, ctx: &mut TerminalContext<W>, rankings: &[RankingView]) -> io::Result<()> {
        ctx.print_colored_line("Rankings:", TerminalColor::Cyan)?;
        for r in rankings {
            ctx.print_line(&format!(
                "  {:<16} {:>3}W {:>3}L  {:.2}",
                r.user_name, r.wins, r.losses, r.ratio
            ))?;
        }
        ctx.flush()
    }

    pub fn render_message<W: Write>(&self, ctx: &mut TerminalContext<W>, message: &str, color: TerminalColor) -> io::Result<()> {
        ctx.print_colored_line(message, color)?;
        ctx.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::GameKey;

    fn view() -> GameView {
        GameView {
            game_key: GameKey::new(),
            user_name: "ann".into(),
            attempts_allowed: 6,
            attempts_remaining: 5,
            game_over: false,
            message: "Correct! Attempts remaining: 5".into(),
            cracked_word: "C__".into(),
            secret_word: None,
            guessed_letters: vec!['C'],
            missed_letters: vec!['X'],
        }
    }

    #[test]
    fn test_gallows_stage_scales_with_budget() {
        assert_eq!(gallows_stage(6, 6), 0);
        assert_eq!(gallows_stage(6, 5), 1);
        assert_eq!(gallows_stage(6, 0), 6);
        assert_eq!(gallows_stage(1, 0), 6);
        assert_eq!(gallows_stage(12, 6), 3);
        assert_eq!(gallows_stage(0, 0), 6);
    }

    #[test]
    fn test_repeated_miss_advances_gallows() {
        let mut g = crate::games::hangman::Game::new("CAT", 6, crate::core::user::UserId::new());
        g.resolve_move("Z").unwrap();
        g.resolve_move("Z").unwrap();
        assert_eq!(g.missed_letters().len(), 1);
        assert_eq!(gallows_stage(g.attempts_allowed(), g.attempts_remaining()), 2);
    }

    #[test]
    fn test_render_game_output() {
        let renderer = HangmanRenderer::new("ann");
        let mut ctx = TerminalContext::new(Vec::new());
        renderer.render_game(&mut ctx, &view()).unwrap();
        let out = String::from_utf8_lossy(&ctx.into_inner()).to_string();
        assert!(out.contains("Word: C _ _"));
        assert!(out.contains("Tries left: 5/6"));
        assert!(out.contains("Wrong: X"));
        assert!(!out.contains("The word was"));
    }

    #[test]
    fn test_render_history_numbers_moves() {
        let renderer = HangmanRenderer::new("ann");
        let mut ctx = TerminalContext::new(Vec::new());
        let moves = vec!["(guess: C, result: C__)".to_string()];
        renderer.render_history(&mut ctx, &moves).unwrap();
        let out = String::from_utf8_lossy(&ctx.into_inner()).to_string();
        assert!(out.contains(" 1. (guess: C, result: C__)"));
    }
}
