use std::sync::Arc;

use axum::{Extension, response::Json};

use crate::{server::AppState, types::NowPlayingSnapshot, warning};

/// Returns the combined current + recent track state for the widget.
///
/// If either underlying call fails, the failure is logged and the handler
/// answers with an empty snapshot and HTTP 200; the widget stays up even
/// when the backend cannot reach Spotify or the token store.
pub async fn snapshot(Extension(state): Extension<Arc<AppState>>) -> Json<NowPlayingSnapshot> {
    let (current, recent) = tokio::join!(
        state.spotify.currently_playing(),
        state.spotify.recently_played(),
    );

    match (current, recent) {
        (Ok(current_track), Ok(recent_tracks)) => Json(NowPlayingSnapshot {
            current_track,
            recent_tracks,
        }),
        (current, recent) => {
            if let Err(e) = current {
                warning!("Failed to fetch current track: {}", e);
            }
            if let Err(e) = recent {
                warning!("Failed to fetch recent tracks: {}", e);
            }
            Json(NowPlayingSnapshot {
                current_track: None,
                recent_tracks: Vec::new(),
            })
        }
    }
}
