//! Webhook delivery with exponential-backoff retry.
//!
//! [`WebhookDelivery`] sends a JSON-encoded [`StatusUpdate`] to an external
//! URL via HTTP POST. Failed attempts are retried with exponential backoff
//! (1 s, 2 s, 4 s by default).

use std::time::Duration;

use crate::message::StatusUpdate;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Delivers status updates to an external webhook endpoint.
pub struct WebhookDelivery {
    client: reqwest::Client,
    retry_delays: Vec<Duration>,
}

impl WebhookDelivery {
    /// Create a delivery service with a pre-configured HTTP client and the
    /// default backoff schedule.
    pub fn new() -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            retry_delays: RETRY_DELAYS_SECS
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        })
    }

    /// Replace the backoff schedule. An empty schedule means a single attempt.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Deliver a status update to a webhook URL with retry.
    ///
    /// Returns `Ok(())` on the first successful attempt.
    pub async fn deliver(&self, url: &str, update: &StatusUpdate) -> Result<(), WebhookError> {
        let payload = serde_json::json!({
            "event_type": "ticket.status_updated",
            "payload": update,
            "timestamp": update.timestamp,
        });

        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.try_send(url, &payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url,
                        error = %e,
                        "Webhook delivery attempt failed, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        // Final attempt after the last backoff.
        self.try_send(url, &payload).await.inspect_err(|e| {
            tracing::error!(url, error = %e, "Webhook delivery failed after all retries");
        })
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, url: &str, payload: &serde_json::Value) -> Result<(), WebhookError> {
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_default_schedule() {
        let delivery = WebhookDelivery::new().unwrap();
        assert_eq!(
            delivery.retry_delays,
            [1, 2, 4].map(Duration::from_secs).to_vec()
        );
    }

    #[test]
    fn http_status_error_display() {
        assert_eq!(
            WebhookError::HttpStatus(503).to_string(),
            "Webhook returned HTTP 503"
        );
    }

    #[tokio::test]
    async fn unreachable_url_fails_without_retry_when_schedule_empty() {
        let delivery = WebhookDelivery::new().unwrap().with_retry_delays(vec![]);
        let update = StatusUpdate {
            ticket_id: "TCK-1".into(),
            ticket_title: "t".into(),
            user_id: 1,
            recipient_email: "a@example.com".into(),
            recipient_name: "A".into(),
            old_status: "open".into(),
            new_status: "closed".into(),
            agent_name: None,
            timestamp: chrono::Utc::now(),
        };
        // Port 9 (discard) on localhost is not expected to speak HTTP.
        let result = delivery.deliver("http://127.0.0.1:9/hook", &update).await;
        assert!(result.is_err());
    }
}
