use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use spotdash::stats::{StatsCalculator, compute_stats, format_hour};
use spotdash::types::{ArtistRank, PlayEvent};

// Reference instant used by every test: 2025-06-15 20:00 UTC.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 20, 0, 0).unwrap()
}

// Helper function to create a play event
fn play(track_id: &str, track_name: &str, artist_id: &str, played_at: DateTime<Utc>) -> PlayEvent {
    PlayEvent {
        track_id: track_id.to_string(),
        track_name: track_name.to_string(),
        artist_id: artist_id.to_string(),
        artist_name: format!("{}_name", artist_id),
        played_at,
        url: None,
    }
}

// Helper function to create a play event at an hour of the reference day (UTC)
fn play_at_hour(track_id: &str, hour: u32) -> PlayEvent {
    let played_at = Utc.with_ymd_and_hms(2025, 6, 15, hour, 15, 0).unwrap();
    play(track_id, track_id, "artist", played_at)
}

fn artist(id: &str, name: &str) -> ArtistRank {
    ArtistRank {
        artist_id: id.to_string(),
        artist_name: name.to_string(),
    }
}

#[test]
fn test_empty_input_yields_sentinels() {
    let report = compute_stats(&[], &[], &now());

    assert_eq!(report.tracks_played, 0);
    assert_eq!(report.listening_hours, 0);
    assert_eq!(report.unique_artists, 0);
    assert_eq!(report.top_artist, "N/A");
    assert_eq!(report.daily_average, 0);
    assert_eq!(report.repeat_rate, 0);
    assert_eq!(report.most_played_track, "N/A");
    assert_eq!(report.most_played_count, 0);
    // No plays: every bucket is zero and hour 0 wins.
    assert_eq!(report.peak_hour, "12am");
}

#[test]
fn test_top_artist_is_first_ranked_or_sentinel() {
    let events = vec![play("T1", "Song A", "A1", now() - Duration::hours(1))];

    let report = compute_stats(&events, &[], &now());
    assert_eq!(report.top_artist, "N/A");

    let ranks = vec![artist("A9", "Jeff Buckley"), artist("A1", "Someone Else")];
    let report = compute_stats(&events, &ranks, &now());
    assert_eq!(report.top_artist, "Jeff Buckley");
}

#[test]
fn test_most_played_and_repeat_rate() {
    let mut events = Vec::new();
    for i in 0..3 {
        events.push(play("T1", "Song A", "A1", now() - Duration::hours(i + 1)));
    }
    for i in 0..7 {
        let id = format!("X{}", i);
        events.push(play(&id, &id, "A2", now() - Duration::days(i + 1)));
    }

    let report = compute_stats(&events, &[], &now());

    assert_eq!(report.tracks_played, 10);
    assert_eq!(report.most_played_track, "Song A");
    assert_eq!(report.most_played_count, 3);
    assert_eq!(report.repeat_rate, 30);
    // 10 * 3.5 / 60 = 0.58
    assert_eq!(report.listening_hours, 1);
    // 10 / 30 = 0.33
    assert_eq!(report.daily_average, 0);
}

#[test]
fn test_most_played_tie_goes_to_first_encountered() {
    let events = vec![
        play("T2", "Second", "A1", now() - Duration::hours(1)),
        play("T1", "First", "A1", now() - Duration::hours(2)),
        play("T2", "Second", "A1", now() - Duration::hours(3)),
        play("T1", "First", "A1", now() - Duration::hours(4)),
    ];

    let report = compute_stats(&events, &[], &now());

    assert_eq!(report.most_played_track, "Second");
    assert_eq!(report.most_played_count, 2);
    assert_eq!(report.repeat_rate, 50);
}

#[test]
fn test_most_played_keeps_first_seen_name() {
    let events = vec![
        play("T1", "Song A", "A1", now() - Duration::hours(1)),
        play("T1", "Song A (Remastered)", "A1", now() - Duration::hours(2)),
    ];

    let report = compute_stats(&events, &[], &now());

    assert_eq!(report.most_played_track, "Song A");
    assert_eq!(report.most_played_count, 2);
    assert_eq!(report.repeat_rate, 100);
}

#[test]
fn test_window_boundary_is_strict() {
    let exactly_thirty_days = play("OLD", "Old", "A1", now() - Duration::days(30));
    let just_inside = play(
        "NEW",
        "New",
        "A2",
        now() - Duration::days(29) - Duration::hours(23),
    );

    let report = compute_stats(&[exactly_thirty_days.clone()], &[], &now());
    assert_eq!(report.tracks_played, 0);
    assert_eq!(report.most_played_track, "N/A");

    let report = compute_stats(&[exactly_thirty_days, just_inside], &[], &now());
    assert_eq!(report.tracks_played, 1);
    assert_eq!(report.unique_artists, 1);
    assert_eq!(report.most_played_track, "New");
}

#[test]
fn test_events_outside_window_do_not_count_anywhere() {
    let events = vec![
        play("T1", "Recent", "A1", now() - Duration::hours(2)),
        play("T2", "Ancient", "A2", now() - Duration::days(45)),
        play("T2", "Ancient", "A2", now() - Duration::days(46)),
    ];

    let report = compute_stats(&events, &[], &now());

    assert_eq!(report.tracks_played, 1);
    assert_eq!(report.unique_artists, 1);
    assert_eq!(report.most_played_track, "Recent");
    assert_eq!(report.repeat_rate, 100);
}

#[test]
fn test_unique_artists_counts_ids_not_names() {
    let mut same_name = play("T1", "Song A", "A1", now() - Duration::hours(1));
    same_name.artist_name = "Nirvana".to_string();
    let mut other_id = play("T2", "Song B", "A2", now() - Duration::hours(2));
    other_id.artist_name = "Nirvana".to_string();
    let repeat = play("T3", "Song C", "A1", now() - Duration::hours(3));

    let report = compute_stats(&[same_name, other_id, repeat], &[], &now());

    assert_eq!(report.unique_artists, 2);
}

#[test]
fn test_peak_hour_picks_busiest_hour() {
    let events = vec![
        play_at_hour("T1", 9),
        play_at_hour("T2", 9),
        play_at_hour("T3", 14),
        play_at_hour("T4", 9),
    ];

    let report = compute_stats(&events, &[], &now());

    assert_eq!(report.peak_hour, "9am");
}

#[test]
fn test_peak_hour_single_event_labels() {
    let cases = [(0, "12am"), (12, "12pm"), (13, "1pm"), (23, "11pm"), (11, "11am")];

    for (hour, expected) in cases {
        let report = compute_stats(&[play_at_hour("T1", hour)], &[], &now());
        assert_eq!(report.peak_hour, expected, "hour {}", hour);
    }
}

#[test]
fn test_peak_hour_tie_prefers_earlier_hour() {
    let events = vec![
        play_at_hour("T1", 18),
        play_at_hour("T2", 7),
        play_at_hour("T3", 18),
        play_at_hour("T4", 7),
    ];

    let report = compute_stats(&events, &[], &now());

    assert_eq!(report.peak_hour, "7am");
}

#[test]
fn test_peak_hour_uses_time_zone_of_now() {
    // 22:30 UTC is 00:30 at UTC+2.
    let played_at = Utc.with_ymd_and_hms(2025, 6, 14, 22, 30, 0).unwrap();
    let events = vec![play("T1", "Late", "A1", played_at)];
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();

    let utc_report = compute_stats(&events, &[], &now());
    let local_report = compute_stats(&events, &[], &now().with_timezone(&offset));

    assert_eq!(utc_report.peak_hour, "10pm");
    assert_eq!(local_report.peak_hour, "12am");
    assert_eq!(utc_report.tracks_played, local_report.tracks_played);
}

#[test]
fn test_full_page_rounding() {
    let events: Vec<PlayEvent> = (0..50)
        .map(|i| {
            let id = format!("T{}", i);
            play(&id, &id, &format!("A{}", i % 7), now() - Duration::minutes(i * 90))
        })
        .collect();

    let report = compute_stats(&events, &[], &now());

    assert_eq!(report.tracks_played, 50);
    // 50 * 3.5 / 60 = 2.92
    assert_eq!(report.listening_hours, 3);
    // 50 / 30 = 1.67
    assert_eq!(report.daily_average, 2);
    assert_eq!(report.unique_artists, 7);
    assert_eq!(report.most_played_count, 1);
    assert_eq!(report.most_played_track, "T0");
    assert_eq!(report.repeat_rate, 2);
}

#[test]
fn test_daily_average_rounds_half_up() {
    let events: Vec<PlayEvent> = (0..45)
        .map(|i| {
            let id = format!("T{}", i);
            play(&id, &id, "A1", now() - Duration::hours(i))
        })
        .collect();

    let report = compute_stats(&events, &[], &now());

    // 45 / 30 = 1.5
    assert_eq!(report.daily_average, 2);
}

#[test]
fn test_average_track_minutes_is_overridable() {
    let events: Vec<PlayEvent> = (0..24)
        .map(|i| {
            let id = format!("T{}", i);
            play(&id, &id, "A1", now() - Duration::hours(i))
        })
        .collect();

    let default_report = StatsCalculator::new().compute(&events, &[], &now());
    let custom_report = StatsCalculator::new()
        .average_track_minutes(5.0)
        .compute(&events, &[], &now());

    // 24 * 3.5 / 60 = 1.4
    assert_eq!(default_report.listening_hours, 1);
    // 24 * 5 / 60 = 2
    assert_eq!(custom_report.listening_hours, 2);
    assert_eq!(default_report.tracks_played, custom_report.tracks_played);
}

#[test]
fn test_compute_is_idempotent() {
    let events = vec![
        play("T1", "Song A", "A1", now() - Duration::hours(1)),
        play("T2", "Song B", "A2", now() - Duration::hours(5)),
        play("T1", "Song A", "A1", now() - Duration::days(3)),
    ];
    let ranks = vec![artist("A1", "Artist One")];

    let first = compute_stats(&events, &ranks, &now());
    let second = compute_stats(&events, &ranks, &now());

    assert_eq!(first, second);
}

#[test]
fn test_window_at_earliest_instant_keeps_every_event() {
    let earliest = DateTime::<Utc>::MIN_UTC;
    let events = vec![play("T1", "First ever", "A1", earliest + Duration::hours(1))];

    let report = compute_stats(&events, &[], &(earliest + Duration::days(1)));

    assert_eq!(report.tracks_played, 1);
    assert_eq!(report.most_played_track, "First ever");
    assert_eq!(report.peak_hour, "1am");
}

#[test]
fn test_format_hour_wraps_past_midnight() {
    assert_eq!(format_hour(24), "12am");
    assert_eq!(format_hour(36), "12pm");
    assert_eq!(format_hour(40), "4pm");
}

#[test]
fn test_format_hour_covers_the_clock() {
    assert_eq!(format_hour(0), "12am");
    assert_eq!(format_hour(1), "1am");
    assert_eq!(format_hour(11), "11am");
    assert_eq!(format_hour(12), "12pm");
    assert_eq!(format_hour(13), "1pm");
    assert_eq!(format_hour(23), "11pm");
}
