//! Configuration for the widget backend.
//!
//! All settings come from environment variables, optionally seeded from a
//! `.env` file in the working directory. The Spotify credentials are surfaced
//! as `Option` so that their absence can be reported as a configuration error
//! at the point of use (the token refresh) instead of tearing down a request
//! that might still be served from the cache.

use std::env;

/// Spotify OAuth token endpoint (refresh and authorization-code grants).
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Spotify authorization (consent) endpoint used by the one-time `auth` flow.
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Base URL for the player endpoints of the Spotify Web API.
pub const API_BASE: &str = "https://api.spotify.com/v1/me";

/// Loads environment variables from a `.env` file in the working directory.
///
/// Missing files are ignored; deployments may configure the process
/// environment directly.
pub fn load_env() {
    dotenv::dotenv().ok();
}

/// Bind address for the widget backend server.
///
/// Read from `SERVER_ADDRESS`, defaulting to `127.0.0.1:3000`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string())
}

/// Bind address for the local OAuth callback server.
///
/// Read from `CALLBACK_ADDRESS`, defaulting to `127.0.0.1:8888`. Must agree
/// with the redirect URI registered for the Spotify application.
pub fn callback_addr() -> String {
    env::var("CALLBACK_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Redirect URI sent with the authorization request, derived from
/// [`callback_addr`].
pub fn redirect_uri() -> String {
    format!("http://{}/callback", callback_addr())
}

/// Connection URL for the Redis instance holding the access token.
///
/// Read from `REDIS_URL`, defaulting to `redis://127.0.0.1:6379`.
pub fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

/// Spotify application client ID (`SPOTIFY_CLIENT_ID`), if configured.
pub fn spotify_client_id() -> Option<String> {
    env::var("SPOTIFY_CLIENT_ID").ok()
}

/// Spotify application client secret (`SPOTIFY_CLIENT_SECRET`), if configured.
pub fn spotify_client_secret() -> Option<String> {
    env::var("SPOTIFY_CLIENT_SECRET").ok()
}

/// Long-lived refresh token (`SPOTIFY_REFRESH_TOKEN`), if configured.
///
/// Obtained once with the `auth` subcommand and rotated only by redeploying
/// configuration.
pub fn spotify_refresh_token() -> Option<String> {
    env::var("SPOTIFY_REFRESH_TOKEN").ok()
}
