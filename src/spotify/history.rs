use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::request,
    types::{PlayEvent, PlayHistoryItem, RecentlyPlayedResponse},
};

/// Page size of the recently-played feed; the API does not return more.
pub const RECENTLY_PLAYED_LIMIT: u32 = 50;

/// Fetches the most recent page of the user's listening history.
///
/// Items come back most-recent-first. Only a single page is requested, so the
/// result is capped at [`RECENTLY_PLAYED_LIMIT`] plays regardless of how far
/// back they reach.
pub async fn get_recently_played(client: &Client, token: &str) -> Result<RecentlyPlayedResponse> {
    let api_url = format!(
        "{uri}/me/player/recently-played?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = RECENTLY_PLAYED_LIMIT
    );

    request::get_json(client, &api_url, token).await
}

/// Why a play history item could not become a [`PlayEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedItem {
    MissingTrack,
    MissingTrackId,
    MissingArtist,
    MissingArtistId,
    InvalidPlayedAt,
}

impl TryFrom<&PlayHistoryItem> for PlayEvent {
    type Error = MalformedItem;

    fn try_from(item: &PlayHistoryItem) -> std::result::Result<Self, Self::Error> {
        let track = item.track.as_ref().ok_or(MalformedItem::MissingTrack)?;
        let track_id = track
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(MalformedItem::MissingTrackId)?;

        // Only the first credited artist counts.
        let artist = track.artists.first().ok_or(MalformedItem::MissingArtist)?;
        let artist_id = artist
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(MalformedItem::MissingArtistId)?;

        let played_at = item
            .played_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
            .ok_or(MalformedItem::InvalidPlayedAt)?;

        Ok(PlayEvent {
            track_id,
            track_name: track.name.clone(),
            artist_id,
            artist_name: artist.name.clone(),
            played_at,
            url: track.external_urls.spotify.clone(),
        })
    }
}

/// Maps raw history items into play events, keeping upstream order.
///
/// Malformed items are dropped rather than failing the whole batch; the
/// second value is how many were dropped.
pub fn to_play_events(items: &[PlayHistoryItem]) -> (Vec<PlayEvent>, usize) {
    let mut skipped = 0;
    let events = items
        .iter()
        .filter_map(|item| match PlayEvent::try_from(item) {
            Ok(event) => Some(event),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    (events, skipped)
}
