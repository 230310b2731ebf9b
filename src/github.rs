//! Manual refresh trigger.
//!
//! The hosted dashboard is rebuilt by a GitHub Actions workflow that runs
//! `spotdash fetch` and commits the data file. Refreshing on demand therefore
//! means dispatching that workflow through the GitHub REST API.

use chrono::{SecondsFormat, Utc};
use reqwest::{Client, header};

use crate::{
    config,
    error::{Error, Result},
    types::{RefreshResponse, WorkflowDispatchRequest},
};

/// Variables that must be set before the workflow can be dispatched.
pub const REQUIRED_SETTINGS: [&str; 3] = ["GITHUB_TOKEN", "GITHUB_OWNER", "GITHUB_REPO"];

/// Names the required variables that are currently unset.
pub fn missing_settings() -> Vec<&'static str> {
    config::missing(&REQUIRED_SETTINGS)
}

/// Describes what is missing, e.g. `"GitHub token not configured"`.
pub fn not_configured_error(missing: &[&str]) -> &'static str {
    if missing.contains(&"GITHUB_TOKEN") {
        "GitHub token not configured"
    } else {
        "GitHub repository not configured"
    }
}

/// Everything needed to dispatch the refresh workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub workflow: String,
    pub git_ref: String,
    pub api_url: String,
}

impl WorkflowSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            token: config::github_token()?,
            owner: config::github_owner()?,
            repo: config::github_repo()?,
            workflow: config::github_workflow(),
            git_ref: config::github_ref(),
            api_url: config::github_apiurl(),
        })
    }

    pub fn dispatch_url(&self) -> String {
        format!(
            "{api}/repos/{owner}/{repo}/actions/workflows/{workflow}/dispatches",
            api = self.api_url.trim_end_matches('/'),
            owner = self.owner,
            repo = self.repo,
            workflow = self.workflow
        )
    }
}

/// Asks GitHub to run the data refresh workflow.
///
/// GitHub answers `204 No Content` once the run is queued; the run itself
/// takes a minute or two before fresh data is published.
pub async fn trigger_workflow(client: &Client, settings: &WorkflowSettings) -> Result<RefreshResponse> {
    let response = client
        .post(settings.dispatch_url())
        .header(header::ACCEPT, "application/vnd.github.v3+json")
        .header(header::AUTHORIZATION, format!("token {}", settings.token))
        .header(header::USER_AGENT, concat!("spotdash/", env!("CARGO_PKG_VERSION")))
        .json(&WorkflowDispatchRequest {
            git_ref: settings.git_ref.clone(),
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| json["message"].as_str().map(str::to_string))
            .unwrap_or(body);
        return Err(Error::Workflow(format!("{status}: {message}")));
    }

    Ok(RefreshResponse {
        success: true,
        message: "Spotify data refresh initiated. This may take 1-2 minutes to complete."
            .to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
