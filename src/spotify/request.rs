use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    warning,
};

const MAX_ATTEMPTS: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Issues an authenticated GET against the Web API and decodes the JSON body.
///
/// # Retry Logic
///
/// - `502 Bad Gateway` is retried after a 10 second pause.
/// - `429 Too Many Requests` waits for the `Retry-After` header when it asks
///   for at most 120 seconds; longer waits fail with [`Error::RateLimited`].
/// - Every other non-success status fails immediately with [`Error::Upstream`].
///
/// At most three attempts are made per call.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str, token: &str) -> Result<T> {
    let mut attempt = 0;

    loop {
        attempt += 1;
        let response = client.get(url).bearer_auth(token).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        if attempt < MAX_ATTEMPTS {
            if status == StatusCode::BAD_GATEWAY {
                sleep(BAD_GATEWAY_DELAY).await;
                continue; // retry
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after_secs(&response);
                if retry_after > MAX_RETRY_AFTER_SECS {
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds.",
                        retry_after
                    );
                    return Err(Error::RateLimited(retry_after));
                }
                sleep(Duration::from_secs(retry_after)).await;
                continue; // retry
            }
        }

        return Err(upstream_error(response).await);
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

/// Converts a failed response into an error carrying the upstream message.
pub async fn upstream_error(response: Response) -> Error {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimited(retry_after_secs(&response));
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json["error"]["message"]
                .as_str()
                .or_else(|| json["error_description"].as_str())
                .or_else(|| json["message"].as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    Error::Upstream { status, message }
}
