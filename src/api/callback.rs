use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify::auth::exchange_authorization_code, types::PendingAuth, warning};

/// Handles the authorization redirect from Spotify's consent page.
///
/// Verifies the anti-forgery `state` parameter, exchanges the authorization
/// code for a token grant, and stores the grant in the shared state the
/// `auth` flow is polling. The refresh token is also shown on the response
/// page so the operator can copy it from the browser.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingAuth>>>>,
) -> Html<String> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return Html(format!("<h4>Authorization error: {}</h4>", error));
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>".to_string());
    };

    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>".to_string());
    };

    if params.get("state") != Some(&pending.state_param) {
        warning!("State parameter mismatch on authorization callback");
        return Html("<h4>State mismatch.</h4>".to_string());
    }

    match exchange_authorization_code(code).await {
        Ok(grant) => {
            let page = format!(
                "<h2>Authorization successful.</h2>\
                 <p>Add this to the backend environment:</p>\
                 <pre>SPOTIFY_REFRESH_TOKEN={}</pre>\
                 <p>You can close this window.</p>",
                grant.refresh_token
            );
            pending.token = Some(grant);
            Html(page)
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Token exchange failed.</h4>".to_string())
        }
    }
}
