//! Listening statistics derived from the recently-played feed.
//!
//! The calculator is a pure function of the play events, the ranked top
//! artists and a reference instant. It reads no clock, performs no I/O and is
//! total over well-formed input: every empty case produces a sentinel value
//! rather than an error.
//!
//! The lookback window only ever narrows the events it is given. The upstream
//! feed returns a single page of recent plays, so a heavy listener's "last 30
//! days" covers far less than 30 days of history.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};

use crate::types::{ArtistRank, PlayEvent, StatsReport};

/// Length of the lookback window, and the divisor of the daily average.
pub const WINDOW_DAYS: i64 = 30;

/// Assumed track length used to estimate listening time.
pub const DEFAULT_AVERAGE_TRACK_MINUTES: f64 = 3.5;

/// Placeholder shown when a metric has no data behind it.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsCalculator {
    average_track_minutes: f64,
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self {
            average_track_minutes: DEFAULT_AVERAGE_TRACK_MINUTES,
        }
    }
}

impl StatsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the per-track length behind the listening hours estimate.
    pub fn average_track_minutes(mut self, minutes: f64) -> Self {
        self.average_track_minutes = minutes;
        self
    }

    /// Computes the dashboard metrics for the window ending at `now`.
    ///
    /// The time zone of `now` is the one the peak hour is reported in, so
    /// callers pass `Local::now()` for a wall-clock view.
    pub fn compute<Tz: TimeZone>(
        &self,
        events: &[PlayEvent],
        top_artists: &[ArtistRank],
        now: &DateTime<Tz>,
    ) -> StatsReport {
        // A window reaching past the earliest representable instant keeps everything.
        let cutoff = now
            .with_timezone(&Utc)
            .checked_sub_signed(Duration::days(WINDOW_DAYS));
        let recent: Vec<&PlayEvent> = events
            .iter()
            .filter(|e| cutoff.is_none_or(|cutoff| e.played_at > cutoff))
            .collect();

        let tracks_played = recent.len() as u32;
        let listening_hours =
            (tracks_played as f64 * self.average_track_minutes / 60.0).round() as u32;

        let unique_artists = recent
            .iter()
            .map(|e| e.artist_id.as_str())
            .collect::<HashSet<_>>()
            .len() as u32;

        let top_artist = top_artists
            .first()
            .map(|a| a.artist_name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let daily_average = (tracks_played as f64 / WINDOW_DAYS as f64).round() as u32;

        let most_played = most_played(&recent);
        let repeat_rate = match most_played {
            Some((_, count)) if tracks_played > 0 => {
                (count as f64 / tracks_played as f64 * 100.0).round() as u32
            }
            _ => 0,
        };

        let timezone = now.timezone();
        let peak = peak_hour(
            recent
                .iter()
                .map(|e| e.played_at.with_timezone(&timezone).hour()),
        );

        StatsReport {
            tracks_played,
            listening_hours,
            unique_artists,
            top_artist,
            daily_average,
            repeat_rate,
            most_played_track: most_played
                .map(|(name, _)| name.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            most_played_count: most_played.map(|(_, count)| count).unwrap_or(0),
            peak_hour: format_hour(peak),
        }
    }
}

/// Computes the dashboard metrics with the default parameters.
pub fn compute_stats<Tz: TimeZone>(
    events: &[PlayEvent],
    top_artists: &[ArtistRank],
    now: &DateTime<Tz>,
) -> StatsReport {
    StatsCalculator::default().compute(events, top_artists, now)
}

/// Returns the name and play count of the most repeated track.
///
/// Groups are kept in first-seen order and only a strictly higher count
/// replaces the current leader, so ties go to the track heard first.
fn most_played<'a>(recent: &[&'a PlayEvent]) -> Option<(&'a str, u32)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, u32)> = Vec::new();

    for &event in recent {
        match index.get(event.track_id.as_str()) {
            Some(&i) => groups[i].1 += 1,
            None => {
                index.insert(event.track_id.as_str(), groups.len());
                groups.push((event.track_name.as_str(), 1));
            }
        }
    }

    groups
        .into_iter()
        .fold(None, |best: Option<(&'a str, u32)>, group| match best {
            Some(b) if b.1 >= group.1 => Some(b),
            _ => Some(group),
        })
}

/// Returns the busiest hour of day; the lowest hour wins a tie, hour 0 when empty.
fn peak_hour(hours: impl Iterator<Item = u32>) -> u32 {
    let mut buckets = [0u32; 24];
    for hour in hours {
        buckets[(hour % 24) as usize] += 1;
    }

    let mut peak = 0;
    for (hour, &count) in buckets.iter().enumerate() {
        if count > buckets[peak] {
            peak = hour;
        }
    }
    peak as u32
}

/// Formats an hour of day as a 12-hour clock label such as `"9am"`.
///
/// Hours past 23 wrap around the clock, so `24` reads as `"12am"`.
pub fn format_hour(hour: u32) -> String {
    let hour = hour % 24;
    match hour {
        0 => "12am".to_string(),
        1..=11 => format!("{hour}am"),
        12 => "12pm".to_string(),
        _ => format!("{}pm", hour - 12),
    }
}
