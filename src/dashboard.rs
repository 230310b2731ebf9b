use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use reqwest::Client;

use crate::{
    config,
    error::Result,
    management::TokenManager,
    spotify::{history, top},
    stats::StatsCalculator,
    types::{ArtistRank, DashboardData, PlayEvent, RecentTrack, TrackRank},
    warning,
};

/// Number of most recent plays listed under "Last played".
pub const RECENT_TRACKS_SHOWN: usize = 4;

/// Number of entries kept from each top list.
pub const TOP_ITEMS_SHOWN: usize = 5;

/// Fetches the three upstream lists in parallel and assembles the dashboard.
///
/// The access token is refreshed first if needed. Any failing request fails
/// the whole fetch; malformed play history items are only skipped.
pub async fn fetch_dashboard(client: &Client, tokens: &mut TokenManager) -> Result<DashboardData> {
    let token = tokens.get_valid_token(client).await?;

    let (recently_played, top_artists, top_tracks) = tokio::try_join!(
        history::get_recently_played(client, &token),
        top::get_top_artists(client, &token),
        top::get_top_tracks(client, &token),
    )?;

    let (events, skipped) = history::to_play_events(&recently_played.items);
    if skipped > 0 {
        warning!("Skipped {} malformed play history items", skipped);
    }

    let calculator =
        StatsCalculator::new().average_track_minutes(config::average_track_minutes());

    Ok(build_dashboard(
        &calculator,
        &events,
        &top::to_artist_ranks(&top_artists),
        &top::to_track_ranks(&top_tracks),
        &Local::now(),
    ))
}

/// Assembles the dashboard payload from already mapped upstream data.
pub fn build_dashboard<Tz: TimeZone>(
    calculator: &StatsCalculator,
    events: &[PlayEvent],
    top_artists: &[ArtistRank],
    top_tracks: &[TrackRank],
    now: &DateTime<Tz>,
) -> DashboardData {
    let recent_tracks: Vec<RecentTrack> = events
        .iter()
        .take(RECENT_TRACKS_SHOWN)
        .map(RecentTrack::from)
        .collect();

    DashboardData {
        last_updated: now
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        recent_track: recent_tracks.first().cloned(),
        recent_tracks,
        stats: calculator.compute(events, top_artists, now),
        top_artists: top_artists
            .iter()
            .take(TOP_ITEMS_SHOWN)
            .map(|a| a.artist_name.clone())
            .collect(),
        top_tracks: top_tracks.iter().take(TOP_ITEMS_SHOWN).cloned().collect(),
    }
}
