use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::cors::CorsLayer;

use crate::{
    api::{self, AppState},
    error::{Error, Result},
    types::PkceToken,
};

/// Binds a listener on `addr` (e.g. `127.0.0.1:3001`).
pub async fn bind(addr: &str) -> Result<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Config(format!("invalid server address {addr}: {e}")))?;
    Ok(TcpListener::bind(&addr).await?)
}

/// Routes of the short-lived server that receives the OAuth redirect.
pub fn callback_router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Routes of the dashboard API; any origin may read it.
pub fn dashboard_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/spotify", get(api::spotify_data))
        .route("/api/refresh-spotify-data", post(api::refresh_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the dashboard API until the process is stopped.
pub async fn start_api_server(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, dashboard_router(state)).await?;
    Ok(())
}
