/// WebSocket game client - one request, one response, rendered to the terminal.
use anyhow::{anyhow, bail, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::core::terminal::{TerminalColor, TerminalContext};
use crate::core::websocket::{Request, Response};
use crate::games::hangman::HangmanRenderer;

/// What a line typed by the player means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Guess(String),
    NewGame,
    Cancel,
    History,
    Scores,
    Rankings,
    Quit,
    Unknown(String),
}

impl ClientCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(cmd) = line.strip_prefix(':') else {
            return Some(ClientCommand::Guess(line.to_string()));
        };
        Some(match cmd.to_ascii_lowercase().as_str() {
            "new" => ClientCommand::NewGame,
            "cancel" => ClientCommand::Cancel,
            "history" => ClientCommand::History,
            "scores" => ClientCommand::Scores,
            "rankings" => ClientCommand::Rankings,
            "quit" | "q" => ClientCommand::Quit,
            other => ClientCommand::Unknown(other.to_string()),
        })
    }
}

pub struct WebSocketGameClient {
    player_name: String,
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    renderer: HangmanRenderer,
}

impl WebSocketGameClient {
    /// Connect and consume the server's welcome frame.
    pub async fn connect(url: &str, player_name: String) -> Result<Self> {
        let (ws, _) = connect_async(url).await?;
        let mut client = Self {
            renderer: HangmanRenderer::new(player_name.clone()),
            player_name,
            ws,
        };
        match client.next_response().await? {
            Response::Welcome { name, version, .. } => {
                debug!(%name, %version, "connected");
                Ok(client)
            }
            other => Err(anyhow!("unexpected first frame from server: {other:?}")),
        }
    }

    /// Send one request and wait for its reply.
    pub async fn call(&mut self, request: Request) -> Result<Response> {
        self.ws
            .send(Message::Text(serde_json::to_string(&request)?))
            .await?;
        self.next_response().await
    }

    async fn next_response(&mut self) -> Result<Response> {
        while let Some(msg) = self.ws.next().await {
            match msg? {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Close(_) => break,
                _ => {}
            }
        }
        bail!("server closed the connection")
    }

    /// Register (if needed), start a game and play it from stdin.
    pub async fn play(mut self) -> Result<()> {
        let mut ctx = TerminalContext::stdout();

        let created = self
            .call(Request::CreateUser {
                user_name: self.player_name.clone(),
                email: None,
            })
            .await?;
        if let Response::Error { kind, message } = created {
            if kind != "user_exists" {
                bail!("could not register '{}': {message}", self.player_name);
            }
        }

        let mut game_key = self.start_game(&mut ctx).await?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            let Some(command) = ClientCommand::parse(&line) else {
                continue;
            };
            let request = match command {
                ClientCommand::Quit => break,
                ClientCommand::NewGame => {
                    game_key = self.start_game(&mut ctx).await?;
                    continue;
                }
                ClientCommand::Unknown(cmd) => {
                    self.renderer.render_message(
                        &mut ctx,
                        &format!("Unknown command ':{cmd}'"),
                        TerminalColor::Red,
                    )?;
                    continue;
                }
                ClientCommand::Guess(guess) => Request::MakeMove {
                    game_key: game_key.clone(),
                    guess,
                },
                ClientCommand::Cancel => Request::CancelGame {
                    game_key: game_key.clone(),
                },
                ClientCommand::History => Request::GetGameHistory {
                    game_key: game_key.clone(),
                },
                ClientCommand::Scores => Request::GetUserScores {
                    user_name: self.player_name.clone(),
                },
                ClientCommand::Rankings => Request::GetUserRankings,
            };
            let response = self.call(request).await?;
            self.show(&mut ctx, response)?;
        }

        self.ws.close(None).await.ok();
        Ok(())
    }

    async fn start_game(&mut self, ctx: &mut TerminalContext) -> Result<String> {
        match self
            .call(Request::NewGame {
                user_name: self.player_name.clone(),
            })
            .await?
        {
            Response::Game(view) => {
                ctx.clear_screen()?;
                self.renderer.render_game(ctx, &view)?;
                Ok(view.game_key.to_string())
            }
            Response::Error { message, .. } => bail!("could not start a game: {message}"),
            other => Err(anyhow!("unexpected reply to NewGame: {other:?}")),
        }
    }

    fn show(&self, ctx: &mut TerminalContext, response: Response) -> Result<()> {
        match response {
            Response::Game(view) => {
                ctx.clear_screen()?;
                self.renderer.render_game(ctx, &view)?;
            }
            Response::History(moves) => self.renderer.render_history(ctx, &moves)?,
            Response::Scores(scores) => self.renderer.render_scores(ctx, &scores)?,
            Response::Rankings(rankings) => self.renderer.render_rankings(ctx, &rankings)?,
            Response::Message(msg) => self.renderer.render_message(ctx, &msg, TerminalColor::Yellow)?,
            Response::Error { message, .. } => {
                self.renderer.render_message(ctx, &message, TerminalColor::Red)?
            }
            Response::Welcome { .. } | Response::ActiveGames(_) => {}
        }
        Ok(())
    }
}
