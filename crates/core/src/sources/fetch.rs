use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;

/// Build a reqwest client with the standard 30-second timeout.
/// Falls back to a default client if the builder fails.
pub(crate) fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Issue a single GET against one named feed and return the raw body.
///
/// Any transport failure or non-success status becomes
/// `SourceUnavailable` carrying the feed name, so the caller can
/// attribute blame among concurrent requests. No retries at this layer.
pub(crate) async fn fetch_body(
    client: &Client,
    source: &str,
    url: &str,
) -> Result<String, CoreError> {
    debug!(source, url, "fetching feed");

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| CoreError::source_unavailable(source, &e))?;

    let status = resp.status();
    if !status.is_success() {
        warn!(source, %status, "feed returned non-success status");
        return Err(CoreError::SourceUnavailable {
            source: source.to_string(),
            reason: format!("HTTP status {status}"),
        });
    }

    resp.text()
        .await
        .map_err(|e| CoreError::source_unavailable(source, &e))
}
