//! # Spotify Integration Module
//!
//! The integration layer between the widget's HTTP handlers and Spotify's
//! services. Two components live here:
//!
//! - [`auth`] - the access-token cache: lookup in the external store,
//!   refresh-on-miss against the OAuth token endpoint, expiry-aware storage.
//!   Also hosts the one-time authorization-code flow that mints the
//!   long-lived refresh token.
//! - [`player`] - the playback facade: authenticated reads (current track,
//!   recent history) and transport commands, normalized into the widget's
//!   canonical track shape.
//!
//! ## Error policy
//!
//! Absence is not an error: nothing playing and an empty history are valid
//! results, and an upstream rejection of a transport command is reported as
//! `false`. [`SpotifyError`] covers the failures that actually prevent a call
//! from being made or answered, such as missing credentials, a rejected token
//! exchange, or an unreachable token store.

pub mod auth;
pub mod player;

use reqwest::StatusCode;
use thiserror::Error;

use crate::cache::CacheError;

#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Client id, client secret, or refresh token absent from configuration.
    /// Fatal to the requesting call; never retried.
    #[error("missing Spotify credentials in environment")]
    MissingCredentials,

    /// The token endpoint answered with a non-success status.
    #[error("token endpoint rejected the exchange with status {0}")]
    TokenRejected(StatusCode),

    #[error(transparent)]
    Store(#[from] CacheError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
