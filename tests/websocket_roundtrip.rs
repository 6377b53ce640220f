use std::sync::Arc;

use hangterm::client::WebSocketGameClient;
use hangterm::core::websocket::{HangmanServer, Request, Response};
use hangterm::games::hangman::{Rules, WordSource};
use hangterm::HangmanService;

struct FixedWord;

impl WordSource for FixedWord {
    fn pick_word(&self) -> String {
        "FOX".to_string()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_play_over_websocket() {
    let service = Arc::new(HangmanService::new(Arc::new(FixedWord), Rules::default()));
    let server = HangmanServer::bind("127.0.0.1:0", service).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let mut client = WebSocketGameClient::connect(&format!("ws://{addr}"), "ann".into())
        .await
        .expect("client should connect");

    let reply = client
        .call(Request::CreateUser {
            user_name: "ann".into(),
            email: None,
        })
        .await
        .unwrap();
    assert_eq!(reply, Response::Message("User ann created!".into()));

    let Response::Game(view) = client
        .call(Request::NewGame {
            user_name: "ann".into(),
        })
        .await
        .unwrap()
    else {
        panic!("expected a game view");
    };
    assert_eq!(view.cracked_word, "___");
    let game_key = view.game_key.to_string();

    let Response::Game(view) = client
        .call(Request::MakeMove {
            game_key: game_key.clone(),
            guess: "o".into(),
        })
        .await
        .unwrap()
    else {
        panic!("expected a game view");
    };
    assert_eq!(view.cracked_word, "_O_");

    let reply = client
        .call(Request::MakeMove {
            game_key: game_key.clone(),
            guess: "fox".into(),
        })
        .await
        .unwrap();
    assert!(matches!(reply, Response::Game(ref v) if v.game_over && v.secret_word.as_deref() == Some("FOX")));

    let reply = client
        .call(Request::MakeMove {
            game_key: game_key.clone(),
            guess: "x".into(),
        })
        .await
        .unwrap();
    assert!(matches!(reply, Response::Error { ref kind, .. } if kind == "game_already_over"));

    let reply = client
        .call(Request::GetGameHistory { game_key })
        .await
        .unwrap();
    assert!(matches!(reply, Response::History(ref moves) if moves.len() == 2));
}
