use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{api::AppState, github, success, warning};

/// Dispatches the data refresh workflow on behalf of the dashboard page.
pub async fn refresh_data(State(state): State<AppState>) -> Response {
    let Some(settings) = &state.workflow else {
        let mut missing = github::missing_settings();
        if missing.is_empty() {
            // Set after the server started; the settings are only read once.
            missing = github::REQUIRED_SETTINGS.to_vec();
        }
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": github::not_configured_error(&missing),
                "message": format!("Please set {} in your .env file", missing.join(", "))
            })),
        )
            .into_response();
    };

    match github::trigger_workflow(&state.http, settings).await {
        Ok(response) => {
            state.cache.invalidate().await;
            success!("Workflow triggered successfully");
            Json(response).into_response()
        }
        Err(e) => {
            warning!("Error triggering workflow: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to trigger workflow",
                    "message": e.to_string()
                })),
            )
                .into_response()
        }
    }
}
