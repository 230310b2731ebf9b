use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeZone};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{StatTableRow, StatsReport};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Describes how long ago `then` was, relative to `now`, e.g. `"2 hours ago"`.
///
/// Timestamps in the future (clock skew between hosts) read as `"just now"`.
pub fn format_time_ago<Tz1: TimeZone, Tz2: TimeZone>(
    then: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
) -> String {
    let elapsed = now.timestamp() - then.timestamp();
    if elapsed < 60 {
        return "just now".to_string();
    }

    let (amount, unit) = match elapsed {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 2_592_000 => (s / 86_400, "day"),
        s if s < 31_536_000 => (s / 2_592_000, "month"),
        s => (s / 31_536_000, "year"),
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Turns a report into the "Last 30 Days" rows of the terminal dashboard.
pub fn stat_table_rows(stats: &StatsReport) -> Vec<StatTableRow> {
    vec![
        row("Tracks Played", stats.tracks_played.to_string()),
        row("Listening Time", format!("{}hrs", stats.listening_hours)),
        row("Unique Artists", stats.unique_artists.to_string()),
        row("Daily Average", format!("{}/day", stats.daily_average)),
        row("Repeat Rate", format!("{}%", stats.repeat_rate)),
        row("Peak Hour", stats.peak_hour.clone()),
    ]
}

fn row(metric: &str, value: String) -> StatTableRow {
    StatTableRow {
        metric: metric.to_string(),
        value,
    }
}
