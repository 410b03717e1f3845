//! HTTP fetcher
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with a descriptive user agent
//! - GET requests with a bounded timeout
//! - Retry logic with increasing backoff for transient failures
//! - Error classification (HTTP status vs. timeout vs. connection)
//!
//! A fetch failure is never fatal: after retries are exhausted the error
//! is returned to the traversal controller, which records a skip and moves
//! on to the next frontier entry.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Base backoff between retry attempts; attempt N waits N times this.
const RETRY_BACKOFF_MS: u64 = 500;

/// A fetch failure, classified for skip bookkeeping
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("Request error for {url}: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    /// True for timeouts; the controller maps these to the `timeout` skip
    /// reason and everything else to `http_error`.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct RawPage {
    /// Final URL after any redirects
    pub final_url: String,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Response body
    pub body: String,
}

/// A successfully fetched binary resource (e.g. an inline PDF)
#[derive(Debug)]
pub struct RawResource {
    pub content_type: String,

    /// Content-Disposition header value (empty if absent)
    pub content_disposition: String,

    pub bytes: Vec<u8>,
}

/// Builds the HTTP client used for the whole run
///
/// # Arguments
///
/// * `timeout_secs` - Per-request timeout in seconds
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "metropole-crawler/{} (site dataset builder)",
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an HTML page with retry
///
/// Issues one GET per attempt; on failure (non-2xx status, timeout, or
/// connection error) retries up to `retry_count` additional times with a
/// linearly increasing backoff between attempts.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `retry_count` - Additional attempts after the first failure
pub async fn fetch_page(
    client: &Client,
    url: &str,
    retry_count: u32,
) -> Result<RawPage, FetchError> {
    let response = send_with_retry(client, url, retry_count).await?;

    let final_url = response.url().to_string();
    let content_type = header_value(&response, "content-type");

    let body = response.text().await.map_err(|e| FetchError::Request {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(RawPage {
        final_url,
        content_type,
        body,
    })
}

/// Fetches a binary resource with retry
///
/// Same retry discipline as [`fetch_page`], but the body is returned as
/// raw bytes and the Content-Disposition header is preserved so the
/// caller can recognize attachment-only resources.
pub async fn fetch_bytes(
    client: &Client,
    url: &str,
    retry_count: u32,
) -> Result<RawResource, FetchError> {
    let response = send_with_retry(client, url, retry_count).await?;

    let content_type = header_value(&response, "content-type");
    let content_disposition = header_value(&response, "content-disposition");

    let bytes = response.bytes().await.map_err(|e| FetchError::Request {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(RawResource {
        content_type,
        content_disposition,
        bytes: bytes.to_vec(),
    })
}

/// Sends a GET with retry and returns the successful response
async fn send_with_retry(
    client: &Client,
    url: &str,
    retry_count: u32,
) -> Result<reqwest::Response, FetchError> {
    let mut attempt: u32 = 0;

    loop {
        match try_get(client, url).await {
            Ok(response) => return Ok(response),
            Err(error) if attempt < retry_count => {
                attempt += 1;
                let backoff = Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64);
                tracing::warn!(
                    "Fetch attempt {} for {} failed ({}), retrying in {:?}",
                    attempt,
                    url,
                    error,
                    backoff
                );
                tokio::time::sleep(backoff).await;
            }
            Err(error) => {
                tracing::warn!("Giving up on {} after {} attempts", url, attempt + 1);
                return Err(error);
            }
        }
    }
}

/// One GET attempt, with the error classified
async fn try_get(client: &Client, url: &str) -> Result<reqwest::Response, FetchError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if e.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

fn header_value(response: &reqwest::Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(10).is_ok());
    }

    #[test]
    fn test_is_timeout() {
        let timeout = FetchError::Timeout {
            url: "https://example.com".to_string(),
        };
        let http = FetchError::Http {
            url: "https://example.com".to_string(),
            status: 500,
        };

        assert!(timeout.is_timeout());
        assert!(!http.is_timeout());
    }

    #[test]
    fn test_error_display_includes_url() {
        let error = FetchError::Http {
            url: "https://example.com/missing".to_string(),
            status: 404,
        };
        let message = error.to_string();

        assert!(message.contains("404"));
        assert!(message.contains("https://example.com/missing"));
    }

    // Retry behavior is exercised end-to-end against wiremock in
    // tests/crawl_tests.rs, where attempt counts can be asserted.
}
