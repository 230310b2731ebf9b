use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::Client;
use spotdash::{
    Error,
    management::{
        DashboardCache, DashboardDataManager, FileTokenStore, MemoryTokenStore, TokenManager,
        TokenStore,
    },
    spotify::auth::ClientCredentials,
    types::{DashboardData, StatsReport, Token},
};

// Helper function to create a test token
fn create_test_token(access_token: &str, obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: "refresh-me".to_string(),
        scope: "user-read-recently-played user-top-read".to_string(),
        expires_in,
        obtained_at,
    }
}

fn credentials() -> ClientCredentials {
    ClientCredentials::new("client-id".to_string(), None)
}

fn manager(token: Token) -> TokenManager {
    let store = Arc::new(MemoryTokenStore::new(Some(token.clone())));
    TokenManager::new(token, store, credentials())
}

fn create_test_dashboard(last_updated: &str) -> DashboardData {
    DashboardData {
        last_updated: last_updated.to_string(),
        recent_track: None,
        recent_tracks: vec![],
        stats: StatsReport {
            tracks_played: 3,
            listening_hours: 0,
            unique_artists: 2,
            top_artist: "Björk".to_string(),
            daily_average: 0,
            repeat_rate: 67,
            most_played_track: "Jóga".to_string(),
            most_played_count: 2,
            peak_hour: "8pm".to_string(),
        },
        top_artists: vec!["Björk".to_string()],
        top_tracks: vec![],
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("spotdash-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn test_token_expiry_margin() {
    let tokens = manager(create_test_token("access", 1_000, 3_600));

    assert!(!tokens.is_expired_at(1_000));
    // Expiry at 4600, stale from 240 seconds before.
    assert!(!tokens.is_expired_at(4_359));
    assert!(tokens.is_expired_at(4_360));
    assert!(tokens.is_expired_at(10_000));
}

#[test]
fn test_short_lived_token_does_not_underflow() {
    let tokens = manager(create_test_token("access", 0, 60));

    assert!(tokens.is_expired_at(0));
}

#[test]
fn test_refresh_token_only_is_expired() {
    let tokens = manager(Token::from_refresh_token("refresh-me"));

    assert!(tokens.is_expired_at(0));
    assert_eq!(tokens.current_token().refresh_token, "refresh-me");
}

#[tokio::test]
async fn test_get_valid_token_returns_fresh_token() {
    let now = Utc::now().timestamp() as u64;
    let mut tokens = manager(create_test_token("fresh-access", now, 3_600));

    let access = tokens.get_valid_token(&Client::new()).await.unwrap();

    assert_eq!(access, "fresh-access");
}

#[test]
fn test_refresh_keeps_refresh_token_when_not_rotated() {
    let mut refreshed = create_test_token("new-access", 2_000, 3_600);
    refreshed.refresh_token = String::new();

    let token = refreshed.or_refresh_token("refresh-me");

    assert_eq!(token.access_token, "new-access");
    assert_eq!(token.refresh_token, "refresh-me");
}

#[test]
fn test_refresh_takes_rotated_refresh_token() {
    let mut refreshed = create_test_token("new-access", 2_000, 3_600);
    refreshed.refresh_token = "rotated".to_string();

    let token = refreshed.or_refresh_token("refresh-me");

    assert_eq!(token.refresh_token, "rotated");
}

#[tokio::test]
async fn test_load_without_token_is_auth_error() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::default());

    let result = TokenManager::load(store, credentials()).await;

    assert!(matches!(result, Err(Error::Auth(_))));
}

#[tokio::test]
async fn test_memory_token_store() {
    let store = MemoryTokenStore::default();
    assert_eq!(store.load().await.unwrap(), None);

    let token = create_test_token("access", 1, 3_600);
    store.save(&token).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(token));

    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_file_token_store() {
    let store = FileTokenStore::new(temp_path("cache/token.json"));
    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);

    let token = create_test_token("access", 1, 3_600);
    store.save(&token).await.unwrap();
    assert!(store.path().is_file());
    assert_eq!(store.load().await.unwrap(), Some(token));

    store.clear().await.unwrap();
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_persist_writes_current_token_to_store() {
    let store = Arc::new(MemoryTokenStore::default());
    let token = create_test_token("access", 1, 3_600);
    let tokens = TokenManager::new(token.clone(), store.clone(), credentials());

    tokens.persist().await.unwrap();

    assert_eq!(store.load().await.unwrap(), Some(token));
}

#[tokio::test]
async fn test_dashboard_cache_ttl() {
    let cache = DashboardCache::new(Duration::from_secs(60));
    let stored_at = Instant::now();
    assert_eq!(cache.get_at(stored_at).await, None);

    let data = create_test_dashboard("2025-06-15T12:00:00.000Z");
    cache.put_at(data.clone(), stored_at).await;

    assert_eq!(cache.get_at(stored_at).await, Some(data.clone()));
    assert_eq!(
        cache.get_at(stored_at + Duration::from_secs(59)).await,
        Some(data)
    );
    assert_eq!(cache.get_at(stored_at + Duration::from_secs(60)).await, None);
}

#[tokio::test]
async fn test_dashboard_cache_invalidate() {
    let cache = DashboardCache::new(Duration::from_secs(60));
    cache
        .put(create_test_dashboard("2025-06-15T12:00:00.000Z"))
        .await;
    assert!(cache.get().await.is_some());

    cache.invalidate().await;

    assert!(cache.get().await.is_none());
    assert_eq!(cache.ttl(), Duration::from_secs(60));
}

#[tokio::test]
async fn test_dashboard_data_file() {
    let path = temp_path("data/spotify-data.json");
    let data = create_test_dashboard("2025-06-15T12:00:00.000Z");

    let manager = DashboardDataManager::new(Some(path.clone()), Some(data.clone()));
    manager.persist().await.unwrap();

    // The file uses the camelCase field names the dashboard page reads.
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"lastUpdated\""));
    assert!(raw.contains("\"mostPlayedTrack\": \"Jóga\""));

    let loaded = DashboardDataManager::load(Some(path.clone())).await.unwrap();
    assert_eq!(loaded.path(), &path);
    assert_eq!(loaded.data(), Some(&data));
}

#[tokio::test]
async fn test_dashboard_data_missing_file() {
    let result = DashboardDataManager::load(Some(temp_path("missing/nothing.json"))).await;

    assert!(matches!(result, Err(Error::Io(_))));
}
