/// WebSocket transport - JSON requests in, JSON responses out.
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};
use tracing::{debug, info, warn};

use crate::error::ServiceError;
use crate::service::{GameView, HangmanService, RankingView, ScoreView, UserGamesView};

pub const SERVER_NAME: &str = "Hangman";
pub const SERVER_DESCRIPTION: &str = "Guess the word letter by letter before the gallows is complete";

/// Everything a client can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    CreateUser { user_name: String, email: Option<String> },
    NewGame { user_name: String },
    GetGame { game_key: String },
    MakeMove { game_key: String, guess: String },
    CancelGame { game_key: String },
    GetScores,
    GetUserScores { user_name: String },
    GetHighScores { number_of_results: Option<usize> },
    GetAverageAttempts,
    GetUserActiveGames,
    GetUserRankings,
    GetGameHistory { game_key: String },
}

/// Server replies. `Welcome` is sent once, right after the handshake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    Welcome { name: String, version: String, description: String },
    Message(String),
    Game(GameView),
    Scores(Vec<ScoreView>),
    ActiveGames(Vec<UserGamesView>),
    Rankings(Vec<RankingView>),
    History(Vec<String>),
    Error { kind: String, message: String },
}

impl Response {
    fn welcome() -> Self {
        Response::Welcome {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: SERVER_DESCRIPTION.to_string(),
        }
    }

    fn error(kind: &str, message: impl Into<String>) -> Self {
        Response::Error {
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

impl From<ServiceError> for Response {
    fn from(err: ServiceError) -> Self {
        Response::error(err.kind(), err.to_string())
    }
}

/// Route one request to the service and shape the reply.
pub async fn dispatch(service: &HangmanService, request: Request) -> Response {
    let result = match request {
        Request::CreateUser { user_name, email } => service
            .create_user(&user_name, email)
            .await
            .map(Response::Message),
        Request::NewGame { user_name } => service.new_game(&user_name).await.map(Response::Game),
        Request::GetGame { game_key } => service.get_game(&game_key).await.map(Response::Game),
        Request::MakeMove { game_key, guess } => service
            .make_move(&game_key, &guess)
            .await
            .map(Response::Game),
        Request::CancelGame { game_key } => service
            .cancel_game(&game_key)
            .await
            .map(|outcome| Response::Message(outcome.message().to_string())),
        Request::GetScores => service.scores().await.map(Response::Scores),
        Request::GetUserScores { user_name } => {
            service.user_scores(&user_name).await.map(Response::Scores)
        }
        Request::GetHighScores { number_of_results } => service
            .high_scores(number_of_results)
            .await
            .map(Response::Scores),
        Request::GetAverageAttempts => Ok(Response::Message(service.average_attempts().await)),
        Request::GetUserActiveGames => Ok(Response::ActiveGames(service.active_games().await)),
        Request::GetUserRankings => Ok(Response::Rankings(service.rankings().await)),
        Request::GetGameHistory { game_key } => {
            service.game_history(&game_key).await.map(Response::History)
        }
    };
    result.unwrap_or_else(Response::from)
}

/// WebSocket server - one task per connection, all sharing one service.
pub struct HangmanServer {
    listener: TcpListener,
    service: Arc<HangmanService>,
}

impl HangmanServer {
    pub async fn bind(addr: &str, service: Arc<HangmanService>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, service })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    pub async fn run(self) -> Result<()> {
        info!(addr = %self.local_addr()?, "hangman server listening");

        loop {
            let (stream, peer) = self.listener.accept().await?;
            info!(%peer, "new connection");
            let service = Arc::clone(&self.service);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer, service).await {
                    warn!(%peer, error = %e, "connection ended with error");
                }
            });
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: Arc<HangmanService>,
) -> Result<()> {
    let ws_stream = accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    ws_sender
        .send(Message::Text(serde_json::to_string(&Response::welcome())?))
        .await?;

    while let Some(msg_result) = ws_receiver.next().await {
        let response = match msg_result? {
            Message::Text(text) => match serde_json::from_str::<Request>(&text) {
                Ok(request) => {
                    debug!(%peer, ?request, "request");
                    dispatch(&service, request).await
                }
                Err(e) => {
                    warn!(%peer, error = %e, "malformed request");
                    Response::error("bad_request", format!("malformed request: {e}"))
                }
            },
            Message::Close(_) => break,
            _ => continue,
        };
        ws_sender
            .send(Message::Text(serde_json::to_string(&response)?))
            .await?;
    }

    info!(%peer, "connection closed");
    Ok(())
}
