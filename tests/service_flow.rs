use std::sync::Arc;

use hangterm::error::{EngineError, ServiceError};
use hangterm::games::hangman::{Rules, WordSource};
use hangterm::service::CancelOutcome;
use hangterm::HangmanService;

struct FixedWord(&'static str);

impl WordSource for FixedWord {
    fn pick_word(&self) -> String {
        self.0.to_string()
    }
}

async fn setup(word: &'static str, attempts_allowed: u32) -> (HangmanService, String) {
    let svc = HangmanService::new(
        Arc::new(FixedWord(word)),
        Rules {
            attempts_allowed,
            case_sensitive: false,
        },
    );
    svc.create_user("ann", Some("ann@example.com".into())).await.unwrap();
    let key = svc.new_game("ann").await.unwrap().game_key.to_string();
    (svc, key)
}

#[tokio::test]
async fn test_cat_scenario() {
    let (svc, key) = setup("CAT", 6).await;

    let view = svc.make_move(&key, "C").await.unwrap();
    assert_eq!((view.cracked_word.as_str(), view.attempts_remaining), ("C__", 6));
    let view = svc.make_move(&key, "X").await.unwrap();
    assert_eq!(view.missed_letters, vec!['X']);
    assert_eq!(view.attempts_remaining, 5);
    let view = svc.make_move(&key, "A").await.unwrap();
    assert_eq!(view.cracked_word, "CA_");
    let view = svc.make_move(&key, "T").await.unwrap();
    assert!(view.game_over);

    let scores = svc.scores().await.unwrap();
    assert_eq!(scores.len(), 1);
    assert!(scores[0].won);
    assert_eq!(scores[0].points, 5);

    let history = svc.game_history(&key).await.unwrap();
    assert_eq!(
        history[..3],
        [
            "(guess: C, result: C__)".to_string(),
            "(guess: X, result: C__)".to_string(),
            "(guess: A, result: CA_)".to_string(),
        ]
    );
    assert_eq!(history.len(), 4);
}

#[tokio::test]
async fn test_dog_scenario() {
    let (svc, key) = setup("DOG", 1).await;
    let view = svc.make_move(&key, "Z").await.unwrap();
    assert!(view.game_over);
    assert_eq!(view.attempts_remaining, 0);
    assert!(view.message.ends_with("Game over!"));

    let scores = svc.scores().await.unwrap();
    assert_eq!(scores.len(), 1);
    assert!(!scores[0].won);
    assert_eq!(scores[0].points, 0);

    let rankings = svc.rankings().await;
    assert_eq!((rankings[0].wins, rankings[0].losses), (0, 1));
}

#[tokio::test]
async fn test_fox_scenario() {
    let (svc, key) = setup("FOX", 6).await;
    let view = svc.make_move(&key, "FOX").await.unwrap();
    assert!(view.game_over);
    assert_eq!(view.attempts_remaining, 6);
    assert_eq!(svc.high_scores(Some(1)).await.unwrap()[0].points, 6);
}

#[tokio::test]
async fn test_repeated_miss_scenario() {
    let (svc, key) = setup("CAT", 6).await;
    svc.make_move(&key, "Q").await.unwrap();
    let view = svc.make_move(&key, "Q").await.unwrap();
    assert_eq!(view.attempts_remaining, 4);
    assert!(view.message.contains("already tried"));
}

#[tokio::test]
async fn test_cancel_scenario() {
    let (svc, key) = setup("CAT", 6).await;
    assert_eq!(svc.cancel_game(&key).await, Ok(CancelOutcome::Cancelled));
    assert!(svc.scores().await.unwrap().is_empty());
    assert!(svc.active_games().await[0].games.is_empty());

    let key = svc.new_game("ann").await.unwrap().game_key.to_string();
    svc.make_move(&key, "CAT").await.unwrap();
    assert_eq!(svc.cancel_game(&key).await, Ok(CancelOutcome::NotCancellable));
    assert_eq!(svc.game_history(&key).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_one_score_per_game() {
    let (svc, key) = setup("DOG", 2).await;
    svc.make_move(&key, "Z").await.unwrap();
    svc.make_move(&key, "Y").await.unwrap();
    for guess in ["D", "DOG", "?"] {
        assert_eq!(
            svc.make_move(&key, guess).await,
            Err(ServiceError::Engine(EngineError::GameAlreadyOver))
        );
    }
    assert_eq!(svc.user_scores("ann").await.unwrap().len(), 1);
}
