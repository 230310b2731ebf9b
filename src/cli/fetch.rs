use std::path::PathBuf;

use reqwest::Client;

use crate::{
    cli::{spinner, token_manager},
    dashboard, error, info,
    management::DashboardDataManager,
    success,
};

/// Fetches fresh listening data and writes the dashboard file.
///
/// This is the job a scheduled workflow runs; with `print` the written JSON is
/// echoed to stdout as well.
pub async fn fetch(output: Option<PathBuf>, print: bool) {
    let mut tokens = token_manager().await;
    let client = Client::new();

    let pb = spinner("Fetching Spotify data...");
    let data = match dashboard::fetch_dashboard(&client, &mut tokens).await {
        Ok(data) => data,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch Spotify data: {}", e);
        }
    };
    pb.finish_and_clear();

    let manager = DashboardDataManager::new(output, Some(data.clone()));
    if let Err(e) = manager.persist().await {
        error!("Failed to save dashboard data. Err: {}", e);
    }
    success!("Spotify data saved to {}", manager.path().display());

    match &data.recent_track {
        Some(track) => info!("Last track: {} by {}", track.name, track.artist),
        None => info!("No recently played tracks."),
    }

    if print {
        match serde_json::to_string_pretty(&data) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize dashboard data. Err: {}", e),
        }
    }
}
