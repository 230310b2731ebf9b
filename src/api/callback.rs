use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    spotify::auth::{ClientCredentials, exchange_code_pkce},
    types::PkceToken,
    warning,
};

/// Completes the authorization code flow started by `spotdash auth`.
///
/// Spotify redirects here with either `code` or `error`. The code is exchanged
/// with the verifier kept in the shared state, and the token is left there for
/// the waiting auth flow to pick up.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization failed: {}", error);
        return Html("<h2>Authorization failed.</h2><p>Check your terminal for details.</p>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let credentials = match ClientCredentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Html("<h4>Login failed.</h4>");
        }
    };

    let mut state = shared_state.lock().await;
    // Take code verifier from state
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    let verifier = pkce_state.code_verifier.clone();

    match exchange_code_pkce(&Client::new(), &credentials, code, &verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
