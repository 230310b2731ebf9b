use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{api::AppState, dashboard, info, types::DashboardData, warning};

/// Lets shared caches in front of the server hold a response for a minute.
pub const CACHE_CONTROL_VALUE: &str = "s-maxage=60, stale-while-revalidate=30";

/// Serves the dashboard payload, from memory when it is fresh enough.
pub async fn spotify_data(State(state): State<AppState>) -> Response {
    if let Some(data) = state.cache.get().await {
        return cached_json(data);
    }

    let Some(tokens) = &state.tokens else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Missing Spotify credentials in environment variables" })),
        )
            .into_response();
    };

    let mut tokens = tokens.lock().await;

    // Another request may have refilled the cache while this one waited.
    if let Some(data) = state.cache.get().await {
        return cached_json(data);
    }

    match dashboard::fetch_dashboard(&state.http, &mut tokens).await {
        Ok(data) => {
            info!(
                "Fetched fresh dashboard data ({} tracks played)",
                data.stats.tracks_played
            );
            state.cache.put(data.clone()).await;
            cached_json(data)
        }
        Err(e) => {
            warning!("Spotify API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch Spotify data",
                    "details": e.to_string()
                })),
            )
                .into_response()
        }
    }
}

fn cached_json(data: DashboardData) -> Response {
    ([(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)], Json(data)).into_response()
}
