use std::path::PathBuf;

use chrono::{DateTime, Local};
use colored::Colorize;
use reqwest::Client;
use tabled::Table;

use crate::{
    cli::{spinner, token_manager},
    dashboard, error,
    management::DashboardDataManager,
    stats::WINDOW_DAYS,
    types::{DashboardData, TopTrackTableRow},
    utils, warning,
};

/// Renders the listening dashboard in the terminal.
///
/// Data is fetched live unless `from_file` is set, in which case the snapshot
/// written by `spotdash fetch` is shown (from `path` or the default location).
pub async fn stats(from_file: bool, path: Option<PathBuf>, json: bool) {
    let data = if from_file {
        match DashboardDataManager::load(path).await {
            Ok(manager) => match manager.data() {
                Some(data) => data.clone(),
                None => error!("Dashboard data file is empty. Run spotdash fetch."),
            },
            Err(e) => error!(
                "Failed to load dashboard data. Run spotdash fetch.\n Error: {}",
                e
            ),
        }
    } else {
        fetch_live().await
    };

    if json {
        match serde_json::to_string_pretty(&data) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize dashboard data. Err: {}", e),
        }
        return;
    }

    render(&data);
}

async fn fetch_live() -> DashboardData {
    let mut tokens = token_manager().await;
    let pb = spinner("Fetching Spotify data...");
    let result = dashboard::fetch_dashboard(&Client::new(), &mut tokens).await;
    pb.finish_and_clear();

    match result {
        Ok(data) => data,
        Err(e) => error!("Failed to fetch Spotify data: {}", e),
    }
}

fn render(data: &DashboardData) {
    println!();
    match &data.recent_track {
        Some(track) => {
            let ago = DateTime::parse_from_rfc3339(&track.played_at)
                .map(|played_at| utils::format_time_ago(&played_at, &Local::now()))
                .unwrap_or_default();
            println!("{}", "Last played".bold());
            println!("  {} - {}  {}", track.name.green(), track.artist, ago.dimmed());
            if let Some(url) = &track.url {
                println!("  {}", url.dimmed());
            }
        }
        None => warning!("No recently played tracks."),
    }

    println!();
    println!("{}", format!("Last {} Days", WINDOW_DAYS).bold());
    println!("{}", Table::new(utils::stat_table_rows(&data.stats)));
    println!("Top artist:         {}", data.stats.top_artist);
    println!(
        "Most played track:  {} ({} plays)",
        data.stats.most_played_track, data.stats.most_played_count
    );

    if !data.top_tracks.is_empty() {
        let rows: Vec<TopTrackTableRow> = data
            .top_tracks
            .iter()
            .enumerate()
            .map(|(i, t)| TopTrackTableRow {
                rank: i + 1,
                name: t.track_name.clone(),
                artist: t.artist_name.clone(),
            })
            .collect();
        println!();
        println!("{}", "Top Tracks".bold());
        println!("{}", Table::new(rows));
    }

    println!();
    println!("{}", format!("Last updated: {}", data.last_updated).dimmed());
}
