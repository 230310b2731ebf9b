//! # API Module
//!
//! HTTP handlers for the two local servers:
//!
//! - the OAuth callback server started by `spotdash auth`
//!   ([`health`], [`callback`]);
//! - the dashboard API started by `spotdash serve`
//!   ([`health`], [`spotify_data`], [`refresh_data`]).
//!
//! ## Endpoints
//!
//! - `GET /health` - Status and version, for monitoring and deployment checks.
//! - `GET /callback` - Exchanges the authorization code for a token (PKCE).
//! - `GET /api/spotify` - Dashboard payload, cached in memory for the
//!   configured TTL and marked cacheable for shared caches.
//! - `POST /api/refresh-spotify-data` - Dispatches the GitHub workflow that
//!   rebuilds the published data file.
//!
//! Handler failures answer `500` with a JSON body naming the failure; they are
//! never turned into empty successes.

mod callback;
mod health;
mod refresh;
mod stats;

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{github::WorkflowSettings, management::DashboardCache, management::TokenManager};

pub use callback::callback;
pub use health::health;
pub use refresh::refresh_data;
pub use stats::{CACHE_CONTROL_VALUE, spotify_data};

/// Shared state of the dashboard API.
///
/// Missing credentials are kept as `None` so the server still starts and the
/// affected routes can report what is missing.
#[derive(Clone)]
pub struct AppState {
    pub http: Client,
    pub cache: Arc<DashboardCache>,
    pub tokens: Option<Arc<Mutex<TokenManager>>>,
    pub workflow: Option<WorkflowSettings>,
}

impl AppState {
    pub fn new(
        cache: DashboardCache,
        tokens: Option<TokenManager>,
        workflow: Option<WorkflowSettings>,
    ) -> Self {
        Self {
            http: Client::new(),
            cache: Arc::new(cache),
            tokens: tokens.map(|t| Arc::new(Mutex::new(t))),
            workflow,
        }
    }
}
