use std::sync::Arc;

use clap::{
    Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tokio::sync::Mutex;

use sponowd::{
    cache::RedisTokenStore,
    config, error,
    server::{self, AppState},
    spotify::{
        auth::{Credentials, TokenCache, authorize},
        player::SpotifyClient,
    },
    types::PendingAuth,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = env!("CARGO_PKG_NAME"),
  bin_name = env!("CARGO_PKG_NAME"),
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the widget backend server
    Serve,

    /// Authorize with Spotify and obtain a refresh token
    Auth,
}

#[tokio::main]
async fn main() {
    config::load_env();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve().await,
        Command::Auth => {
            let pending: Arc<Mutex<Option<PendingAuth>>> = Arc::new(Mutex::new(None));
            authorize(Arc::clone(&pending)).await;
        }
    }
}

async fn serve() {
    let store = match RedisTokenStore::connect(&config::redis_url()).await {
        Ok(store) => store,
        Err(e) => error!(
            "Failed to connect to token cache at {}: {}",
            config::redis_url(),
            e
        ),
    };

    let http = reqwest::Client::new();
    let tokens = TokenCache::new(http.clone(), Arc::new(store), Credentials::from_env());
    let spotify = SpotifyClient::new(http, tokens);

    let state = Arc::new(AppState { spotify });
    server::start_widget_server(state).await;
}
