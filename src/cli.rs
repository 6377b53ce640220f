use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::client::WebSocketGameClient;
use crate::config::ServerConfig;
use crate::core::websocket::HangmanServer;
use crate::games::hangman::{RandomWords, WordSource};
use crate::service::HangmanService;

#[derive(Parser)]
#[command(name = "hangterm")]
#[command(about = "Hangman game server and terminal client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the game server
    Serve {
        /// TOML config file; defaults apply when it does not exist
        #[arg(short, long, default_value = "hangterm.toml")]
        config: PathBuf,

        /// Address to bind to, overrides the config file
        #[arg(short, long)]
        addr: Option<String>,

        /// Attempts per game, overrides the config file
        #[arg(long)]
        attempts: Option<u32>,

        /// Newline-separated word list, overrides the config file
        #[arg(short, long)]
        words: Option<PathBuf>,
    },
    /// Join a server and play
    Play {
        /// Server address (e.g. "127.0.0.1:4000")
        #[arg(short, long, default_value = "127.0.0.1:4000")]
        addr: String,

        /// Player name
        #[arg(short, long, default_value = "Player")]
        name: String,
    },
    /// Print a config file with every default filled in
    DefaultConfig,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            addr,
            attempts,
            words,
        } => {
            let mut config = ServerConfig::load_or_default(&config)?;
            if let Some(addr) = addr {
                config.addr = addr;
            }
            if let Some(attempts) = attempts {
                config.attempts_allowed = attempts;
            }
            if words.is_some() {
                config.word_list = words;
            }
            config.validate()?;
            init_tracing(&config.log_filter);
            serve(config).await
        }
        Commands::Play { addr, name } => {
            init_tracing("warn");
            let url = if addr.starts_with("ws://") || addr.starts_with("wss://") {
                addr
            } else {
                format!("ws://{addr}")
            };
            let client = WebSocketGameClient::connect(&url, name)
                .await
                .with_context(|| format!("failed to connect to {url}"))?;
            client.play().await
        }
        Commands::DefaultConfig => {
            print!("{}", ServerConfig::default_toml());
            Ok(())
        }
    }
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let words: Arc<dyn WordSource> = match &config.word_list {
        Some(path) => Arc::new(RandomWords::from_file(path)?),
        None => Arc::new(RandomWords::embedded()),
    };
    let service = Arc::new(HangmanService::new(words, config.rules()));
    let server = HangmanServer::bind(&config.addr, service).await?;
    info!(
        attempts = config.attempts_allowed,
        case_sensitive = config.case_sensitive,
        "starting hangterm"
    );
    server.run().await
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
