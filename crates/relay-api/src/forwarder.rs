//! # Outbound Forwarder
//!
//! Best-effort delivery of captured submissions to a configured webhook URL.
//! At-most-once, no delivery guarantee: failures are logged, never retried,
//! and never surfaced to the client.

use chrono::Utc;
use relay_core::{PaymentOutcome, PaymentSubmission};
use std::time::Duration;
use tracing::{debug, error, info};

/// Forwarder calls get a shorter leash than processor calls; the sink is
/// commonly a throwaway inspection endpoint.
const FORWARDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Fire-and-forget webhook forwarder
#[derive(Clone)]
pub struct Forwarder {
    target: Option<String>,
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder; `None` disables forwarding entirely
    pub fn new(target: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FORWARDER_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { target, client }
    }

    /// Whether a webhook target is configured
    pub fn is_configured(&self) -> bool {
        self.target.is_some()
    }

    /// Dispatch a notification on its own task.
    ///
    /// The caller's response is already decided when this runs; nothing here
    /// can block or reverse it. The task owns its payload and logs its own
    /// outcome.
    pub fn dispatch(&self, submission: &PaymentSubmission, outcome: &PaymentOutcome) {
        let Some(target) = self.target.clone() else {
            debug!("no webhook target configured, skipping forward");
            return;
        };

        let payload = serde_json::json!({
            "source": "applepay-relay",
            "timestamp": Utc::now().to_rfc3339(),
            "submission": submission,
            "outcome": outcome,
        });
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.post(&target).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("forwarded payment notification: {}", response.status());
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    error!("webhook responded with error: {} | {}", status, body);
                }
                Err(e) => {
                    error!("failed to forward payment notification: {}", e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{Amount, Currency, PaymentStatus};
    use serde_json::json;

    fn sample_submission() -> PaymentSubmission {
        PaymentSubmission::new(
            json!({"type": "applepay", "applePayToken": "opaque"}),
            Amount::from_minor(1000, Currency::USD),
            "https://shop.example.com/checkout/return",
        )
    }

    fn sample_outcome() -> PaymentOutcome {
        PaymentOutcome {
            status: PaymentStatus::Success,
            psp_reference: Some("psp1".into()),
            action: None,
        }
    }

    #[test]
    fn test_unconfigured_forwarder_is_inert() {
        // No target: dispatch returns without spawning, no runtime needed
        let forwarder = Forwarder::new(None);
        assert!(!forwarder.is_configured());
        forwarder.dispatch(&sample_submission(), &sample_outcome());
    }

    #[tokio::test]
    async fn test_unreachable_target_does_not_panic() {
        let forwarder = Forwarder::new(Some("http://127.0.0.1:9/hook".to_string()));
        assert!(forwarder.is_configured());
        forwarder.dispatch(&sample_submission(), &sample_outcome());

        // Give the spawned task a moment to fail and log
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
