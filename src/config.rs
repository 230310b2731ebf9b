//! Configuration management for the Spotify listening dashboard.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, the GitHub
//! workflow used by the refresh trigger, and statistics parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{
    error::{Error, Result},
    stats::DEFAULT_AVERAGE_TRACK_MINUTES,
};

pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "user-read-recently-played user-top-read user-read-playback-state user-read-currently-playing";
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3001";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_WORKFLOW: &str = "update-spotify-data.yml";
pub const DEFAULT_GITHUB_REF: &str = "main";

/// Loads environment variables from `.env` files.
///
/// A `.env` in the current working directory is read first, then the one in
/// the platform-specific local data directory under `spotdash/.env`. Values
/// already present in the environment are never overridden, and a missing
/// file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotdash/.env`
/// - macOS: `~/Library/Application Support/spotdash/.env`
/// - Windows: `%LOCALAPPDATA%/spotdash/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<()> {
    let _ = dotenv::dotenv();

    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Returns the application directory inside the local data directory.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotdash");
    path
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{key} must be set"))),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Returns the keys among `keys` that are unset or blank.
///
/// # Example
///
/// ```
/// let missing = missing(&["GITHUB_TOKEN", "GITHUB_OWNER"]); // e.g., ["GITHUB_OWNER"]
/// ```
pub fn missing<'a>(keys: &[&'a str]) -> Vec<&'a str> {
    keys.iter()
        .copied()
        .filter(|key| optional(key).is_none())
        .collect()
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

/// Returns the Spotify API client ID (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify API client secret (`SPOTIFY_CLIENT_SECRET`), if any.
///
/// Without a secret the token requests are made as a public PKCE client.
/// The secret should never be exposed in logs or version control.
pub fn spotify_client_secret() -> Option<String> {
    optional("SPOTIFY_CLIENT_SECRET")
}

/// Returns a long-lived refresh token from `SPOTIFY_REFRESH_TOKEN`, if any.
///
/// When present it takes precedence over the cached token file, which is how
/// CI jobs and the hosted API run.
pub fn spotify_refresh_token() -> Option<String> {
    optional("SPOTIFY_REFRESH_TOKEN")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application settings
/// and the address the callback server binds to.
pub fn spotify_redirect_uri() -> String {
    or_default("SPOTIFY_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI)
}

/// Returns the space separated scopes requested during authorization.
pub fn spotify_scope() -> String {
    or_default("SPOTIFY_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

/// Returns the Spotify authorization endpoint the browser is sent to.
///
/// # Example
///
/// ```
/// let url = spotify_apiauth_url(); // e.g., "https://accounts.spotify.com/authorize"
/// ```
pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Returns the token endpoint used for the code exchange and refreshes.
///
/// # Example
///
/// ```
/// let url = spotify_apitoken_url(); // e.g., "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the base URL of the Spotify Web API.
///
/// # Example
///
/// ```
/// let url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the bind address of the local OAuth callback server.
pub fn callback_addr() -> String {
    or_default("CALLBACK_ADDRESS", DEFAULT_CALLBACK_ADDRESS)
}

/// Returns the bind address of the dashboard API server.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns where the dashboard data file is written.
///
/// Defaults to `spotdash/data/spotify-data.json` in the local data directory.
pub fn data_path() -> PathBuf {
    match optional("SPOTDASH_DATA_PATH") {
        Some(path) => PathBuf::from(path),
        None => app_dir().join("data").join("spotify-data.json"),
    }
}

/// Returns how long fetched dashboard data is served from memory.
pub fn cache_ttl() -> Duration {
    let secs = optional("SPOTDASH_CACHE_TTL_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_CACHE_TTL_SECS);
    Duration::from_secs(secs)
}

/// Returns the assumed average track length used to estimate listening time.
pub fn average_track_minutes() -> f64 {
    optional("SPOTDASH_AVERAGE_TRACK_MINUTES")
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(DEFAULT_AVERAGE_TRACK_MINUTES)
}

/// Returns the personal access token used to dispatch the refresh workflow.
pub fn github_token() -> Result<String> {
    required("GITHUB_TOKEN")
}

/// Returns the owner of the repository that runs the refresh workflow.
///
/// # Example
///
/// ```
/// let owner = github_owner()?; // e.g., "octocat"
/// ```
pub fn github_owner() -> Result<String> {
    required("GITHUB_OWNER")
}

/// Returns the repository that runs the refresh workflow.
///
/// # Example
///
/// ```
/// let repo = github_repo()?; // e.g., "spotify-dashboard"
/// ```
pub fn github_repo() -> Result<String> {
    required("GITHUB_REPO")
}

/// Returns the workflow file dispatched by the refresh trigger.
///
/// # Example
///
/// ```
/// let workflow = github_workflow(); // e.g., "update-spotify-data.yml"
/// ```
pub fn github_workflow() -> String {
    or_default("GITHUB_WORKFLOW", DEFAULT_GITHUB_WORKFLOW)
}

/// Returns the branch or tag the workflow is dispatched on.
///
/// # Example
///
/// ```
/// let git_ref = github_ref(); // e.g., "main"
/// ```
pub fn github_ref() -> String {
    or_default("GITHUB_REF", DEFAULT_GITHUB_REF)
}

/// Returns the base URL of the GitHub REST API.
///
/// # Example
///
/// ```
/// let url = github_apiurl(); // e.g., "https://api.github.com"
/// ```
pub fn github_apiurl() -> String {
    or_default("GITHUB_API_URL", DEFAULT_GITHUB_API_URL)
}
