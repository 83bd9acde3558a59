use std::{sync::Arc, time::Duration};

use reqwest::{Client, header::AUTHORIZATION};
use tokio::sync::Mutex;

use crate::{
    cache::TokenStore,
    config, error, info, server, success,
    types::{PendingAuth, TokenGrant, TokenResponse},
    utils, warning,
};

use super::SpotifyError;

/// Fixed key of the single cache entry holding the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "spotify:access_token";

/// Safety margin subtracted from the upstream-reported expiry before the
/// token is stored.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// Scopes the widget needs: read playback state and history, control the
/// transport.
const SCOPES: [&str; 3] = [
    "user-read-currently-playing",
    "user-read-recently-played",
    "user-modify-playback-state",
];

/// Deployment-time Spotify credentials, read once at startup and immutable
/// for the process lifetime.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Credentials {
            client_id: config::spotify_client_id(),
            client_secret: config::spotify_client_secret(),
            refresh_token: config::spotify_refresh_token(),
        }
    }

    fn require(&self) -> Result<(&str, &str, &str), SpotifyError> {
        match (&self.client_id, &self.client_secret, &self.refresh_token) {
            (Some(id), Some(secret), Some(refresh)) => {
                Ok((id.as_str(), secret.as_str(), refresh.as_str()))
            }
            _ => Err(SpotifyError::MissingCredentials),
        }
    }
}

/// Owns the lifecycle of the cached access token: lookup, refresh-on-miss,
/// expiry-aware storage.
pub struct TokenCache {
    http: Client,
    store: Arc<dyn TokenStore>,
    creds: Credentials,
    token_url: String,
}

impl TokenCache {
    pub fn new(http: Client, store: Arc<dyn TokenStore>, creds: Credentials) -> Self {
        Self::with_token_url(http, store, creds, config::TOKEN_URL)
    }

    /// Same as [`TokenCache::new`] with the token endpoint overridden.
    pub fn with_token_url(
        http: Client,
        store: Arc<dyn TokenStore>,
        creds: Credentials,
        token_url: impl Into<String>,
    ) -> Self {
        TokenCache {
            http,
            store,
            creds,
            token_url: token_url.into(),
        }
    }

    /// Returns a bearer access token, refreshing it through the token
    /// endpoint if the cache has no entry.
    ///
    /// A cached token is returned as-is; the store's TTL enforcement is the
    /// only expiry check. On a miss the refresh token is exchanged via a
    /// form-encoded POST authenticated with HTTP Basic auth, and the new
    /// token is stored with TTL = reported expiry minus a 60-second margin.
    ///
    /// No mutual exclusion is applied around the miss-then-refresh sequence:
    /// concurrent callers racing on a cold cache may each refresh. The
    /// upstream accepts concurrent refreshes of the same credential, and the
    /// cache write is idempotent last-writer-wins.
    pub async fn get_access_token(&self) -> Result<String, SpotifyError> {
        if let Some(token) = self.store.get(ACCESS_TOKEN_KEY).await? {
            return Ok(token);
        }

        let (client_id, client_secret, refresh_token) = self.creds.require()?;

        let response = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_value(client_id, client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpotifyError::TokenRejected(response.status()));
        }

        let token: TokenResponse = response.json().await?;
        let ttl = token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        self.store
            .put(ACCESS_TOKEN_KEY, &token.access_token, ttl)
            .await?;

        Ok(token.access_token)
    }
}

/// Runs the one-time authorization flow that mints the long-lived refresh
/// token.
///
/// Starts the local callback server, opens the Spotify consent URL in the
/// browser (printing it as a fallback), and waits for the callback handler
/// to complete the authorization-code exchange. On success the refresh token
/// is printed for the operator to place into the backend environment.
///
/// Runs outside the serving path and shares no state with the widget server.
pub async fn authorize(shared_state: Arc<Mutex<Option<PendingAuth>>>) {
    let (Some(client_id), Some(_)) = (
        config::spotify_client_id(),
        config::spotify_client_secret(),
    ) else {
        error!("SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set before authorizing");
    };

    let state_param = utils::generate_state_param();

    // start callback server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        server::start_callback_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{authorize_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
        authorize_url = config::AUTHORIZE_URL,
        client_id = client_id,
        redirect_uri = config::redirect_uri(),
        scope = SCOPES.join("%20"),
        state = state_param,
    );

    // Store the state parameter before the redirect can come back
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PendingAuth {
            state_param,
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(grant) => {
            success!("Authorization successful!");
            info!("Add this to the backend environment:");
            println!("\nSPOTIFY_REFRESH_TOKEN={}\n", grant.refresh_token);
        }
        None => {
            error!("Authorization failed or timed out.");
        }
    }
}

/// Polls the shared state until the callback handler has stored a grant,
/// giving up after two minutes.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PendingAuth>>>) -> Option<TokenGrant> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(120);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pending) = lock.as_ref() {
            if let Some(grant) = &pending.token {
                return Some(grant.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token grant.
///
/// Final step of the one-time flow: a form-encoded POST to the token
/// endpoint with the `authorization_code` grant type, authenticated with
/// HTTP Basic auth from the client credentials. The returned grant carries
/// the refresh token the backend needs at runtime.
pub async fn exchange_authorization_code(code: &str) -> Result<TokenGrant, SpotifyError> {
    let (Some(client_id), Some(client_secret)) = (
        config::spotify_client_id(),
        config::spotify_client_secret(),
    ) else {
        return Err(SpotifyError::MissingCredentials);
    };

    let redirect_uri = config::redirect_uri();

    let client = Client::new();
    let response = client
        .post(config::TOKEN_URL)
        .header(
            AUTHORIZATION,
            utils::basic_auth_value(&client_id, &client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SpotifyError::TokenRejected(response.status()));
    }

    Ok(response.json::<TokenGrant>().await?)
}
