//! Spotify Listening Dashboard Library
//!
//! This library fetches a user's recent Spotify listening history, derives a
//! fixed set of summary statistics from it and exposes the result through a
//! command-line dashboard, a JSON data file and a small HTTP API.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the dashboard and OAuth callback servers
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `dashboard` - Assembles the dashboard payload from the upstream lists
//! - `error` - Crate error type
//! - `github` - Workflow dispatch used by the manual refresh trigger
//! - `management` - Token, cache and data file management
//! - `server` - Local HTTP servers (OAuth callback, dashboard API)
//! - `spotify` - Spotify Web API client implementation
//! - `stats` - Listening statistics calculator
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotdash::{config, stats};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _ = config::load_env().await;
//!     let report = stats::compute_stats(&[], &[], &chrono::Local::now());
//!     assert_eq!(report.top_artist, "N/A");
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod github;
pub mod management;
pub mod server;
pub mod spotify;
pub mod stats;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Fetching listening history...");
/// info!("Serving dashboard on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Saved dashboard data to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the command-line layer uses
/// it; library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as skipped upstream items or a failed
/// cache refill, that do not require program termination.
///
/// # Example
///
/// ```
/// warning!("Skipped {} malformed play history items", skipped);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
