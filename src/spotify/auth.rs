use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    management::{FileTokenStore, TokenManager, TokenStore},
    server,
    spotify::request,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long the authorization flow waits for the browser to hit the callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// The application's identity towards the Spotify accounts service.
///
/// With a client secret the token requests authenticate with HTTP Basic; a
/// client without one is treated as a public PKCE client and only sends its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: Option<String>,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            config::spotify_client_id()?,
            config::spotify_client_secret(),
        ))
    }
}

/// Runs the OAuth 2.0 authorization code flow with PKCE and caches the token.
///
/// This function orchestrates the entire authentication process including:
/// 1. Generating PKCE code verifier and challenge
/// 2. Starting a local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback
/// 5. Persisting the obtained token for future use
///
/// The returned token carries the long-lived refresh token, which can be put
/// into `SPOTIFY_REFRESH_TOKEN` for unattended jobs.
///
/// # Errors
///
/// Fails when the client id is not configured, the callback address cannot be
/// bound, the callback does not complete within 60 seconds, or the token
/// cache cannot be cleared or written.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token> {
    let credentials = ClientCredentials::from_env()?;

    // A cached token from an earlier grant must not outlive a failed re-authorization.
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::default());
    store.clear().await?;

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    // start callback server
    let listener = server::bind(&config::callback_addr()).await?;
    let app = server::callback_router(Arc::clone(&shared_state));
    let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

    let auth_url = authorize_url(&credentials.client_id, &code_challenge);

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;
    server_handle.abort();

    let token = token.ok_or_else(|| Error::Auth("authorization timed out".to_string()))?;
    let token_manager = TokenManager::new(token.clone(), store, credentials);
    token_manager.persist().await?;

    Ok(token)
}

/// Builds the URL the user visits to grant access.
pub fn authorize_url(client_id: &str, code_challenge: &str) -> String {
    format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = client_id,
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = config::spotify_scope().replace(' ', "%20")
    )
}

/// Polls the shared state once a second until the callback stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
///
/// The response may omit `refresh_token`; the returned token then has an
/// empty refresh token and the caller keeps the one it already had.
pub async fn refresh_token(
    client: &Client,
    credentials: &ClientCredentials,
    refresh_token: &str,
) -> Result<Token> {
    request_token(
        client,
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// The code verifier proves that the same client that initiated the auth flow
/// is completing it. The authorization code is single-use and expires quickly,
/// so the exchange should happen immediately after receiving it.
pub async fn exchange_code_pkce(
    client: &Client,
    credentials: &ClientCredentials,
    code: &str,
    verifier: &str,
) -> Result<Token> {
    let redirect_uri = config::spotify_redirect_uri();
    request_token(
        client,
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ],
    )
    .await
}

async fn request_token(
    client: &Client,
    credentials: &ClientCredentials,
    params: &[(&str, &str)],
) -> Result<Token> {
    let mut form: Vec<(&str, &str)> = params.to_vec();
    let mut builder = client.post(config::spotify_apitoken_url());

    match &credentials.client_secret {
        Some(secret) => builder = builder.basic_auth(&credentials.client_id, Some(secret)),
        None => form.push(("client_id", credentials.client_id.as_str())),
    }

    let res = builder.form(&form).send().await?;
    if !res.status().is_success() {
        return Err(match request::upstream_error(res).await {
            Error::Upstream { message, .. } => Error::Auth(message),
            other => other,
        });
    }

    let json: TokenResponse = res.json().await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
