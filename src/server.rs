use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::sync::Mutex;

use crate::{api, config, error, info, spotify::player::SpotifyClient, types::PendingAuth};

/// Handles shared by the widget request handlers, constructed once in `main`
/// and injected for the process lifetime.
pub struct AppState {
    pub spotify: SpotifyClient,
}

/// Routes served by the widget backend.
pub fn widget_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/spotify", get(api::snapshot))
        .route("/api/spotify/player/{action}", post(api::control))
        .layer(Extension(state))
}

pub async fn start_widget_server(state: Arc<AppState>) {
    let app = widget_router(state);

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Serving now-playing widget backend on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}

/// Short-lived server handling the OAuth redirect during the one-time
/// authorization flow.
pub async fn start_callback_server(state: Arc<Mutex<Option<PendingAuth>>>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = match SocketAddr::from_str(&config::callback_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse callback address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Callback server error: {}", e);
    }
}
