//! # Spotify Integration Module
//!
//! This module is the integration layer between the dashboard and Spotify's
//! services. It handles the OAuth flows, the three listening-history endpoints
//! the statistics are built from, rate limiting, and the validating step that
//! turns loosely shaped upstream JSON into the typed records the calculator
//! consumes.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, API server)
//!          ↓
//! Dashboard assembly (parallel fetch, stats)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (PKCE authorize, code exchange, refresh)
//!     ├── Listening History (recently played)
//!     ├── Top Items (artists, tracks)
//!     └── Requests (retry, rate limits, upstream errors)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me/player/recently-played` - Last page (50) of play history
//! - `GET /me/top/artists` - Ranked artists over the short-term window
//! - `GET /me/top/tracks` - Ranked tracks over the short-term window
//! - `POST /api/token` - Code exchange and token refresh
//!
//! ## Error Handling
//!
//! Transport failures, rate limits and non-success statuses all surface as
//! [`crate::Error`]. Nothing is retried forever: `502` and `429` responses get
//! a bounded number of further attempts, see [`request::get_json`].
//!
//! Items the upstream returns without the fields the statistics need (local
//! files without ids, episodes, missing timestamps) are skipped by the
//! mappers in [`history`] and [`top`] rather than failing the batch.

pub mod auth;
pub mod history;
pub mod request;
pub mod top;
