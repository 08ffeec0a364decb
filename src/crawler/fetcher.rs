//! HTTP fetcher implementation
//!
//! Handles all HTTP requests for the crawler:
//! - Building the HTTP client with the static bypass header
//! - GET requests with transparent redirect following
//! - Error classification (completed-with-status vs. transport failure)

use crate::{ConfigError, ScoutError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Request header carrying the pre-shared bypass key on every fetch
pub const BYPASS_HEADER: &str = "x-vercel-protection-bypass";

/// Result of a fetch operation
///
/// A fetch either completes with a status (which may still be a broken
/// link) or fails at the transport level before any response arrives.
#[derive(Debug)]
pub enum FetchResult {
    /// The request completed; redirects were already followed, so the
    /// status/headers/body describe the final response.
    Completed {
        /// HTTP status code of the final response
        status: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Response body; only read for HTML responses, empty otherwise
        body: String,
    },

    /// The fetch itself raised a transport-level error (DNS, connection,
    /// timeout, body read)
    Failed {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client used for the whole run
///
/// Every request carries the same bypass key header. Redirects are followed
/// transparently by reqwest's default policy (up to 10 hops), surfacing the
/// final response to the caller. The timeouts are a safety margin so a hung
/// request cannot block the crawl forever.
///
/// # Arguments
///
/// * `bypass_key` - The pre-shared key sent as `x-vercel-protection-bypass`
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ScoutError)` - The key is not a valid header value, or the
///   client could not be constructed
pub fn build_http_client(bypass_key: &str) -> Result<Client, ScoutError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(bypass_key)
        .map_err(|_| ConfigError::InvalidBypassKey)?;
    headers.insert(BYPASS_HEADER, value);

    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Returns true for the conventional 200-399 "ok" range
///
/// Redirects are followed by the transport, so 3xx rarely surfaces, but a
/// terminal 3xx (e.g. a redirect without a Location header) still counts
/// as resolved rather than broken.
pub fn is_ok_status(status: u16) -> bool {
    (200..=399).contains(&status)
}

/// Fetches a URL and classifies the result
///
/// The body is only read when the response declares an HTML content type;
/// non-HTML bodies are never needed downstream (no link or metadata
/// extraction happens on them).
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.as_str()).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            let body = if content_type.contains("text/html") {
                match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        return FetchResult::Failed {
                            error: format!("Failed to read body: {}", e),
                        }
                    }
                }
            } else {
                String::new()
            };

            FetchResult::Completed {
                status,
                content_type,
                body,
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchResult::Failed { error }
        }
    }
}
