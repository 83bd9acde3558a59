use std::sync::Arc;

use axum::{Extension, extract::Path, http::StatusCode, response::Json};

use crate::{server::AppState, spotify::player::PlayerAction, types::ControlResponse, warning};

/// Relays a playback transport command to Spotify.
///
/// Answers `{"success": true}` with HTTP 200 when the command took effect,
/// `{"success": false}` with HTTP 500 otherwise. Facade errors are logged
/// and reported the same way as upstream rejections.
pub async fn control(
    Path(action): Path<PlayerAction>,
    Extension(state): Extension<Arc<AppState>>,
) -> (StatusCode, Json<ControlResponse>) {
    let success = match state.spotify.control(action).await {
        Ok(success) => success,
        Err(e) => {
            warning!("Playback command {} failed: {}", action, e);
            false
        }
    };

    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ControlResponse { success }))
}
