use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the collaborators around the statistics core.
///
/// The calculator itself is total and never produces one of these; every
/// variant describes a failure in configuration, authentication, transport
/// or persistence.
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing configuration: {0}")]
    Config(String),

    #[error("Spotify authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by upstream, retry after {0} seconds")]
    RateLimited(u64),

    #[error("upstream responded with {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("workflow dispatch failed: {0}")]
    Workflow(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
