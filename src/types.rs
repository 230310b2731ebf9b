use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Builds an already expired token that only carries a refresh token.
    ///
    /// Used when a long-lived refresh token comes from the environment; the
    /// first call for an access token then goes straight to a refresh.
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: String::new(),
            refresh_token: refresh_token.into(),
            scope: String::new(),
            expires_in: 0,
            obtained_at: 0,
        }
    }

    /// Keeps `previous` when a refresh response did not rotate the refresh token.
    pub fn or_refresh_token(mut self, previous: &str) -> Self {
        if self.refresh_token.is_empty() {
            self.refresh_token = previous.to_string();
        }
        self
    }
}

/// Body of a successful `POST /api/token` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

// Spotify Web API payloads. Everything the upstream may leave out is optional
// here and validated when mapped into the domain records below.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    #[serde(default)]
    pub items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistoryItem {
    pub track: Option<TrackObject>,
    pub played_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    #[serde(default)]
    pub items: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub items: Vec<TrackObject>,
}

/// One listening event taken from the recently-played feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEvent {
    pub track_id: String,
    pub track_name: String,
    pub artist_id: String,
    pub artist_name: String,
    pub played_at: DateTime<Utc>,
    pub url: Option<String>,
}

/// One entry of a ranked artist list; the rank is the position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRank {
    pub artist_id: String,
    pub artist_name: String,
}

/// One entry of a ranked track list; the rank is the position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRank {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub tracks_played: u32,
    pub listening_hours: u32,
    pub unique_artists: u32,
    pub top_artist: String,
    pub daily_average: u32,
    pub repeat_rate: u32,
    pub most_played_track: String,
    pub most_played_count: u32,
    pub peak_hour: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTrack {
    pub name: String,
    pub artist: String,
    pub played_at: String,
    pub url: Option<String>,
}

impl From<&PlayEvent> for RecentTrack {
    fn from(event: &PlayEvent) -> Self {
        Self {
            name: event.track_name.clone(),
            artist: event.artist_name.clone(),
            played_at: event.played_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            url: event.url.clone(),
        }
    }
}

/// Everything the dashboard renders, as served by the API and written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub last_updated: String,
    pub recent_track: Option<RecentTrack>,
    #[serde(default)]
    pub recent_tracks: Vec<RecentTrack>,
    pub stats: StatsReport,
    #[serde(default)]
    pub top_artists: Vec<String>,
    #[serde(default)]
    pub top_tracks: Vec<TrackRank>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDispatchRequest {
    #[serde(rename = "ref")]
    pub git_ref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(Tabled)]
pub struct StatTableRow {
    pub metric: String,
    pub value: String,
}

#[derive(Tabled)]
pub struct TopTrackTableRow {
    pub rank: usize,
    pub name: String,
    pub artist: String,
}
