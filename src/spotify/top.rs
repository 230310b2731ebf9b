use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::request,
    types::{ArtistRank, TopArtistsResponse, TopTracksResponse, TrackRank},
};

pub const TOP_ITEMS_LIMIT: u32 = 50;

/// Ranking window used for the top lists: roughly the last four weeks.
pub const TOP_ITEMS_TIME_RANGE: &str = "short_term";

pub async fn get_top_artists(client: &Client, token: &str) -> Result<TopArtistsResponse> {
    let api_url = format!(
        "{uri}/me/top/artists?limit={limit}&time_range={range}",
        uri = &config::spotify_apiurl(),
        limit = TOP_ITEMS_LIMIT,
        range = TOP_ITEMS_TIME_RANGE
    );

    request::get_json(client, &api_url, token).await
}

pub async fn get_top_tracks(client: &Client, token: &str) -> Result<TopTracksResponse> {
    let api_url = format!(
        "{uri}/me/top/tracks?limit={limit}&time_range={range}",
        uri = &config::spotify_apiurl(),
        limit = TOP_ITEMS_LIMIT,
        range = TOP_ITEMS_TIME_RANGE
    );

    request::get_json(client, &api_url, token).await
}

/// Keeps the ranking order and drops artists without a name.
pub fn to_artist_ranks(response: &TopArtistsResponse) -> Vec<ArtistRank> {
    response
        .items
        .iter()
        .filter(|a| !a.name.is_empty())
        .map(|a| ArtistRank {
            artist_id: a.id.clone().unwrap_or_default(),
            artist_name: a.name.clone(),
        })
        .collect()
}

/// Keeps the ranking order and drops tracks without a name.
pub fn to_track_ranks(response: &TopTracksResponse) -> Vec<TrackRank> {
    response
        .items
        .iter()
        .filter(|t| !t.name.is_empty())
        .map(|t| TrackRank {
            track_id: t.id.clone().unwrap_or_default(),
            track_name: t.name.clone(),
            artist_name: t
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}
