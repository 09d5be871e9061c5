//! HTTP transport layer for fetching upstream status payloads

use crate::errors::{Result, StatusError};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, warn};

/// HTTP transport for upstream status endpoints
///
/// Retries and timeouts live here; the parsing and selection layers never
/// retry on their own.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(http_timeout: Duration, max_retries: u32, retry_backoff_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(http_timeout)
            .user_agent(format!("status_collector/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StatusError::Http)?;

        Ok(Self {
            client,
            timeout: http_timeout,
            max_retries,
            retry_backoff_ms,
        })
    }

    /// Fetch and decode the status document at `base_url` + `path`
    pub async fn fetch_status(&self, base_url: &str, path: &str) -> Result<Value> {
        let url = format!("{}{}", base_url, path);

        debug!("Fetching status payload from {}", url);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.fetch_attempt(&url).await {
                Ok(payload) => {
                    debug!("Fetched {} (attempt {})", url, attempt + 1);
                    return Ok(payload);
                }
                Err(e) => {
                    last_error = Some(e);
                    attempt += 1;

                    if attempt <= self.max_retries {
                        let backoff_ms = self.retry_backoff_ms * (2_u64.pow(attempt - 1));
                        warn!(
                            "Failed to fetch {} (attempt {}), retrying in {}ms: {}",
                            url,
                            attempt,
                            backoff_ms,
                            last_error.as_ref().unwrap()
                        );
                        sleep(Duration::from_millis(backoff_ms)).await;
                    }
                }
            }
        }

        let final_error = last_error
            .unwrap_or(StatusError::Transport("All retry attempts failed".to_string()));

        error!(
            "Failed to fetch {} after {} attempts: {}",
            url,
            self.max_retries + 1,
            final_error
        );

        Err(final_error)
    }

    /// Single fetch attempt
    async fn fetch_attempt(&self, url: &str) -> Result<Value> {
        let response = timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| StatusError::Transport("Request timeout".to_string()))?
            .map_err(StatusError::Http)?;

        let response = self.check_response(response, url).await?;

        response.json().await.map_err(StatusError::Http)
    }

    /// Map non-success HTTP statuses to descriptive transport errors
    async fn check_response(&self, response: Response, url: &str) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let error_message = match status.as_u16() {
            400 => format!("Bad request for {}: {}", url, error_body),
            401 => format!("Unauthorized for {}: {}", url, error_body),
            403 => format!("Forbidden for {}: {}", url, error_body),
            404 => format!("Status document not found at {}: {}", url, error_body),
            429 => format!("Rate limited by {}: {}", url, error_body),
            500..=599 => format!("Upstream server error from {}: {}", url, error_body),
            _ => format!("Unexpected response {} from {}: {}", status, url, error_body),
        };

        Err(StatusError::Transport(error_message))
    }
}
