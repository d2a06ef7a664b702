//! CW feed API client
//!
//! Downloads the landing EPG feed from the fixed CW endpoint. The whole
//! lineup arrives as one JSON document, so a single GET is enough.

use std::time::Duration;

use crate::models::CwFeed;

/// Landing EPG endpoint. Page size 100 covers the full channel lineup.
pub const GUIDE_URL: &str =
    "https://data.cwtv.com/feed/app-2/landing/epg/page_1/pagesize_100/device_web/apiversion_24/";

/// Timeout applied to the single fetch, connect and read alike
const FETCH_TIMEOUT_SECS: u64 = 10;

/// Browser-style agent, the endpoint is picky about obvious bots
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Errors that terminate a guide fetch
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no channels in response")]
    EmptyGuide,
}

/// Download and decode the guide feed. Single attempt, no retries.
pub fn fetch_guide() -> Result<CwFeed, FetchError> {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(FETCH_TIMEOUT_SECS)))
        .timeout_connect(Some(Duration::from_secs(FETCH_TIMEOUT_SECS)))
        .build()
        .new_agent();

    log::info!("Fetching guide from {}", GUIDE_URL);

    let mut response = agent
        .get(GUIDE_URL)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json")
        .call()
        .map_err(|e| match e {
            ureq::Error::StatusCode(code) => FetchError::HttpStatus(code),
            other => FetchError::Network(other.to_string()),
        })?;

    let status = response.status();
    if status != 200 {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| FetchError::Network(format!("failed to read body: {}", e)))?;

    parse_guide(&body)
}

/// Decode the feed JSON and reject documents with an empty lineup.
/// An empty `channels` array usually means the request was geoblocked.
pub fn parse_guide(body: &str) -> Result<CwFeed, FetchError> {
    let feed: CwFeed = serde_json::from_str(body)?;
    if feed.channels.is_empty() {
        return Err(FetchError::EmptyGuide);
    }
    Ok(feed)
}
