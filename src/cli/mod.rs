//! # CLI Module
//!
//! This module provides the command-line interface layer for spotdash. It
//! implements all user-facing commands and coordinates between the Spotify
//! integration, the statistics calculator, data management and user
//! interaction.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth flow once and prints the refresh token
//! - [`fetch`] - Fetches fresh data and writes the dashboard JSON file
//! - [`stats`] - Renders the dashboard in the terminal (live or from file)
//! - [`serve`] - Runs the dashboard HTTP API
//! - [`refresh`] - Dispatches the GitHub workflow that republishes the data
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Dashboard assembly + StatsCalculator
//!     ↓
//! Spotify Integration (token refresh, parallel fetch)
//!     ↓
//! Management Layer (token store, data file, cache)
//! ```
//!
//! ## Error Handling
//!
//! Commands report failures through the crate's output macros. Unrecoverable
//! failures (no credentials, upstream errors) print a message and exit with a
//! non-zero status; recoverable ones (a skipped item, an unavailable optional
//! feature) print a warning and continue.

mod auth;
mod fetch;
mod refresh;
mod serve;
mod stats;

pub use auth::auth;
pub use fetch::fetch;
pub use refresh::refresh;
pub use serve::serve;
pub use stats::stats;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, management::TokenManager, spotify::auth::ClientCredentials};

async fn token_manager() -> TokenManager {
    let credentials = match ClientCredentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load Spotify credentials. Err: {}", e),
    };

    match TokenManager::from_env_or_cache(credentials).await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run spotdash auth\n Error: {}",
            e
        ),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
