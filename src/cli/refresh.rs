use reqwest::Client;

use crate::{error, github, info, success};

/// Dispatches the data refresh workflow from the terminal.
pub async fn refresh() {
    let settings = match github::WorkflowSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("GitHub workflow not configured: {}", e),
    };

    info!(
        "Dispatching {} on {}/{}...",
        settings.workflow, settings.owner, settings.repo
    );

    match github::trigger_workflow(&Client::new(), &settings).await {
        Ok(response) => success!("{}", response.message),
        Err(e) => error!("Failed to trigger workflow: {}", e),
    }
}
