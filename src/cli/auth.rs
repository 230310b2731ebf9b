use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, info, spotify, success, types::PkceToken, warning};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    info!("Waiting for Spotify authorization in your browser...");

    match spotify::auth::auth(shared_state).await {
        Ok(token) => {
            success!("Authentication successful!");
            if token.refresh_token.is_empty() {
                warning!("Spotify did not return a refresh token.");
            } else {
                info!("Refresh token (store it as SPOTIFY_REFRESH_TOKEN for unattended runs):");
                println!("{}", token.refresh_token);
            }
        }
        Err(e) => error!("Authentication failed: {}", e),
    }
}
