use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::types::DashboardData;

struct CachedEntry {
    stored_at: Instant,
    data: DashboardData,
}

/// Keeps the last assembled dashboard for a short time.
///
/// Every miss costs a token refresh and three upstream calls, so repeated page
/// loads within the TTL are answered from memory.
pub struct DashboardCache {
    ttl: Duration,
    entry: Mutex<Option<CachedEntry>>,
}

impl DashboardCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self) -> Option<DashboardData> {
        self.get_at(Instant::now()).await
    }

    /// Returns the cached data if it is younger than the TTL at `now`.
    pub async fn get_at(&self, now: Instant) -> Option<DashboardData> {
        let lock = self.entry.lock().await;
        lock.as_ref()
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.data.clone())
    }

    pub async fn put(&self, data: DashboardData) {
        self.put_at(data, Instant::now()).await
    }

    pub async fn put_at(&self, data: DashboardData, stored_at: Instant) {
        *self.entry.lock().await = Some(CachedEntry { stored_at, data });
    }

    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
