use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    spotify::auth::{ClientCredentials, refresh_token},
    types::Token,
};

/// Seconds before the reported expiry at which a token is treated as stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Where OAuth tokens are kept between runs.
///
/// The manager never reaches for a global location itself; callers hand it a
/// store, which keeps CLI, server and tests on the same code path.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<Token>>;
    async fn save(&self, token: &Token) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Token cache on disk, `spotdash/cache/token.json` in the local data directory by default.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(config::app_dir().join("cache").join("token.json"))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<Token>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = async_fs::read_to_string(&self.path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.path.is_file() {
            async_fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}

/// Process-local token store, used when the refresh token comes from the environment.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<Token>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Token>> {
        Ok(self.token.lock().await.clone())
    }

    async fn save(&self, token: &Token) -> Result<()> {
        *self.token.lock().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}

pub struct TokenManager {
    token: Token,
    store: Arc<dyn TokenStore>,
    credentials: ClientCredentials,
}

impl TokenManager {
    pub fn new(token: Token, store: Arc<dyn TokenStore>, credentials: ClientCredentials) -> Self {
        TokenManager {
            token,
            store,
            credentials,
        }
    }

    /// Loads the token kept in `store`.
    pub async fn load(store: Arc<dyn TokenStore>, credentials: ClientCredentials) -> Result<Self> {
        match store.load().await? {
            Some(token) => Ok(Self::new(token, store, credentials)),
            None => Err(Error::Auth(
                "no cached token, please run spotdash auth".to_string(),
            )),
        }
    }

    /// Prefers `SPOTIFY_REFRESH_TOKEN` and falls back to the token file.
    pub async fn from_env_or_cache(credentials: ClientCredentials) -> Result<Self> {
        match config::spotify_refresh_token() {
            Some(refresh) => {
                let token = Token::from_refresh_token(refresh);
                let store = Arc::new(MemoryTokenStore::new(Some(token.clone())));
                Ok(Self::new(token, store, credentials))
            }
            None => Self::load(Arc::new(FileTokenStore::default()), credentials).await,
        }
    }

    pub async fn persist(&self) -> Result<()> {
        self.store.save(&self.token).await
    }

    /// Returns an access token, refreshing and persisting it first when stale.
    pub async fn get_valid_token(&mut self, client: &Client) -> Result<String> {
        if self.is_expired_at(Utc::now().timestamp() as u64) {
            // Spotify only sometimes rotates the refresh token.
            self.token = refresh_token(client, &self.credentials, &self.token.refresh_token)
                .await?
                .or_refresh_token(&self.token.refresh_token);
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        self.token.access_token.is_empty()
            || now
                >= (self.token.obtained_at + self.token.expires_in)
                    .saturating_sub(EXPIRY_MARGIN_SECS)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
