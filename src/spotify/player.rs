use std::fmt;

use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;

use crate::{
    config,
    types::{
        CurrentlyPlayingResponse, NormalizedTrack, RecentlyPlayedResponse, SpotifyImage,
        SpotifyTrack,
    },
};

use super::{SpotifyError, auth::TokenCache};

/// Page size requested from the recently-played endpoint.
const RECENT_TRACK_LIMIT: u32 = 10;

/// The closed set of playback transport commands the widget can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    Play,
    Pause,
    Next,
    Previous,
}

impl PlayerAction {
    /// Upstream method and path for this action. Play and pause set the
    /// player state and are idempotent; next and previous trigger a skip.
    fn route(&self) -> (Method, &'static str) {
        match self {
            PlayerAction::Play => (Method::PUT, "player/play"),
            PlayerAction::Pause => (Method::PUT, "player/pause"),
            PlayerAction::Next => (Method::POST, "player/next"),
            PlayerAction::Previous => (Method::POST, "player/previous"),
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerAction::Play => "play",
            PlayerAction::Pause => "pause",
            PlayerAction::Next => "next",
            PlayerAction::Previous => "previous",
        };
        write!(f, "{}", name)
    }
}

/// Playback facade over the Spotify Web API.
///
/// Every call obtains a bearer token from the injected [`TokenCache`] first;
/// upstream absence (nothing playing, empty history, rejected command) is a
/// value, not an error.
pub struct SpotifyClient {
    http: Client,
    tokens: TokenCache,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(http: Client, tokens: TokenCache) -> Self {
        Self::with_api_base(http, tokens, config::API_BASE)
    }

    /// Same as [`SpotifyClient::new`] with the API base URL overridden.
    pub fn with_api_base(http: Client, tokens: TokenCache, api_base: impl Into<String>) -> Self {
        SpotifyClient {
            http,
            tokens,
            api_base: api_base.into(),
        }
    }

    /// The track the listener is playing right now, if any.
    ///
    /// A 204 or any status of 400 and above means nothing is playing, as does
    /// a response body without a track item.
    pub async fn currently_playing(&self) -> Result<Option<NormalizedTrack>, SpotifyError> {
        let token = self.tokens.get_access_token().await?;

        let api_url = format!("{uri}/player/currently-playing", uri = self.api_base);
        let response = self.http.get(&api_url).bearer_auth(&token).send().await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status.as_u16() >= 400 {
            return Ok(None);
        }

        let body: CurrentlyPlayingResponse = response.json().await?;
        Ok(body
            .item
            .map(|item| normalize_track(item, body.is_playing, body.progress_ms.unwrap_or(0))))
    }

    /// Up to the ten tracks the listener played most recently, newest first.
    ///
    /// Any non-success status yields an empty history.
    pub async fn recently_played(&self) -> Result<Vec<NormalizedTrack>, SpotifyError> {
        let token = self.tokens.get_access_token().await?;

        let api_url = format!(
            "{uri}/player/recently-played?limit={limit}",
            uri = self.api_base,
            limit = RECENT_TRACK_LIMIT
        );
        let response = self.http.get(&api_url).bearer_auth(&token).send().await?;

        if !response.status().is_success() {
            return Ok(Vec::new());
        }

        let body: RecentlyPlayedResponse = response.json().await?;
        Ok(body
            .items
            .into_iter()
            .map(|item| normalize_track(item.track, false, 0))
            .collect())
    }

    /// Sends a transport command to the player.
    ///
    /// `false` means the command did not take effect; an upstream rejection
    /// is never surfaced as an error.
    pub async fn control(&self, action: PlayerAction) -> Result<bool, SpotifyError> {
        let token = self.tokens.get_access_token().await?;

        let (method, path) = action.route();
        let api_url = format!("{uri}/{path}", uri = self.api_base, path = path);
        let response = self
            .http
            .request(method, &api_url)
            .bearer_auth(&token)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

/// Projects an upstream track into the widget's canonical shape.
///
/// Artist names are joined with `", "` in upstream order. Album art is the
/// image variant with the greatest width; ties keep the first variant
/// encountered.
pub fn normalize_track(track: SpotifyTrack, is_playing: bool, progress_ms: u64) -> NormalizedTrack {
    let album_art = largest_image_url(&track.album.images).unwrap_or_default();

    NormalizedTrack {
        name: track.name,
        artist: track
            .artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        album_name: track.album.name,
        album_art,
        spotify_url: track.external_urls.spotify,
        duration_ms: track.duration_ms,
        progress_ms,
        is_playing,
    }
}

fn largest_image_url(images: &[SpotifyImage]) -> Option<String> {
    images
        .iter()
        .reduce(|best, image| if image.width > best.width { image } else { best })
        .map(|image| image.url.clone())
}
