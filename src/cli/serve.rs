use crate::{
    api::AppState,
    config, error,
    github::WorkflowSettings,
    info,
    management::{DashboardCache, TokenManager},
    server,
    spotify::auth::ClientCredentials,
    warning,
};

/// Runs the dashboard API until interrupted.
///
/// Missing Spotify or GitHub settings do not stop the server; the routes that
/// need them answer with an error naming what is missing.
pub async fn serve(addr: Option<String>) {
    let tokens = match ClientCredentials::from_env() {
        Ok(credentials) => match TokenManager::from_env_or_cache(credentials).await {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                warning!("Spotify data will be unavailable: {}", e);
                None
            }
        },
        Err(e) => {
            warning!("Spotify data will be unavailable: {}", e);
            None
        }
    };

    let workflow = match WorkflowSettings::from_env() {
        Ok(settings) => Some(settings),
        Err(e) => {
            warning!("Manual refresh will be unavailable: {}", e);
            None
        }
    };

    let cache = DashboardCache::new(config::cache_ttl());
    let state = AppState::new(cache, tokens, workflow);

    let addr = addr.unwrap_or_else(config::server_addr);
    let listener = match server::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    info!("Server running on http://{}", addr);
    if let Err(e) = server::start_api_server(listener, state).await {
        error!("Server stopped: {}", e);
    }
}
