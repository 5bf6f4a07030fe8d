//! HTTP client creation and request handling.

use reqwest::header;
use std::time::Duration;
use tracing::debug;

use super::types::LoadError;
use crate::TARGET_DATA_LOAD;

pub fn create_http_client(timeout: Duration) -> Result<reqwest::Client, LoadError> {
    debug!(target: TARGET_DATA_LOAD, "Creating HTTP client with {:?} timeout", timeout);
    Ok(reqwest::Client::builder()
        .gzip(true)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::default())
        .build()?)
}

/// GET a URL and return its body. Non-success statuses are errors.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    debug!(target: TARGET_DATA_LOAD, "Requesting {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/json, */*;q=0.8")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        debug!(target: TARGET_DATA_LOAD, "Request to {} returned {}", url, status);
        return Err(LoadError::Status(status.as_u16()));
    }

    Ok(response.text().await?)
}
