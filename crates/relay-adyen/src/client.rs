//! # Adyen Checkout Client
//!
//! The processor side of the relay: builds the outbound request for each of
//! the three Checkout API calls and normalizes responses and errors before
//! they cross back over the service boundary.

use crate::config::AdyenConfig;
use relay_core::{
    Amount, MerchantProfile, PaymentOutcome, PaymentSubmission, RelayError, RelayResult,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Per-call timeout for processor requests
const PROCESSOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Backoff before the single payment-context retry
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Channel value for all Checkout calls originating from the web widget
const CHANNEL_WEB: &str = "Web";

/// Initiative value Apple requires for web-based merchant validation
const INITIATIVE_WEB: &str = "web";

// Client-safe failure summaries. The raw processor bodies never leave the
// server-side logs.
const CONTEXT_FAILURE: &str = "failed to initialize payment context";
const VALIDATION_FAILURE: &str = "merchant validation failed";
const SUBMIT_FAILURE: &str = "payment could not be processed";

/// Adyen Checkout API client
///
/// Constructed once at startup and shared across request handlers; holds the
/// immutable configuration and a pooled HTTP client.
#[derive(Clone)]
pub struct AdyenClient {
    config: AdyenConfig,
    client: Client,
}

impl AdyenClient {
    /// Create a new client from explicit configuration
    pub fn new(config: AdyenConfig) -> Self {
        let client = Client::builder()
            .timeout(PROCESSOR_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        let config = AdyenConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Access the loaded configuration
    pub fn config(&self) -> &AdyenConfig {
        &self.config
    }

    /// Fetch the payment-methods bootstrap payload for the client widget.
    ///
    /// This call has no processor-side side effects, so a retryable failure
    /// (network, timeout, 5xx) is retried exactly once after a short backoff.
    #[instrument(skip(self))]
    pub async fn payment_methods(
        &self,
        amount: Amount,
        country_code: &str,
    ) -> RelayResult<PaymentContext> {
        let request = PaymentMethodsRequest {
            merchant_account: &self.config.merchant_account,
            country_code,
            amount,
            channel: CHANNEL_WEB,
            shopper_locale: "en-US",
        };

        let body = match self
            .post("paymentMethods", &request, "paymentMethods", CONTEXT_FAILURE)
            .await
        {
            Err(err) if err.is_retryable() => {
                warn!("payment methods call failed ({}), retrying once", err);
                tokio::time::sleep(RETRY_BACKOFF).await;
                self.post("paymentMethods", &request, "paymentMethods", CONTEXT_FAILURE)
                    .await?
            }
            other => other?,
        };

        let methods: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| RelayError::MalformedResponse {
                operation: "paymentMethods",
                detail: e.to_string(),
            })?;

        info!("retrieved payment methods for {}", country_code);

        Ok(PaymentContext {
            client_key: self.config.client_key.clone(),
            environment: self.config.environment.as_str().to_string(),
            payment_methods_response: methods,
        })
    }

    /// Ask Adyen to sign an Apple Pay merchant session.
    ///
    /// The field set is exactly the configured merchant identity plus the
    /// caller's validation URL; the domain must match the one verified with
    /// the platform or the processor rejects the call. The signed payload is
    /// passed through untouched because the relay has no means to produce or
    /// re-sign it. Never retried: validation URLs are single-use and
    /// short-lived.
    #[instrument(skip(self, profile), fields(domain = %profile.domain_name))]
    pub async fn apple_pay_session(
        &self,
        profile: &MerchantProfile,
        validation_url: &str,
    ) -> RelayResult<serde_json::Value> {
        if !profile.is_complete() {
            return Err(RelayError::Configuration(
                "Apple Pay merchant profile is incomplete".to_string(),
            ));
        }

        let request = ApplePaySessionRequest {
            merchant_identifier: &profile.merchant_identifier,
            domain_name: &profile.domain_name,
            display_name: &profile.display_name,
            initiative: INITIATIVE_WEB,
            initiative_context: &profile.domain_name,
            validation_url,
        };

        let body = self
            .post(
                "applePay/sessions",
                &request,
                "applePay/sessions",
                VALIDATION_FAILURE,
            )
            .await?;

        serde_json::from_str(&body).map_err(|e| RelayError::MalformedResponse {
            operation: "applePay/sessions",
            detail: e.to_string(),
        })
    }

    /// Submit a captured payment token for authorization.
    ///
    /// One outbound call only: re-submitting the same token risks a double
    /// charge, so failures surface to the caller, who decides whether to
    /// request a fresh token from the widget.
    #[instrument(skip(self, submission), fields(reference = %submission.reference))]
    pub async fn submit_payment(
        &self,
        submission: &PaymentSubmission,
        country_code: &str,
    ) -> RelayResult<PaymentOutcome> {
        let request = AdyenPaymentRequest {
            amount: submission.amount,
            merchant_account: &self.config.merchant_account,
            payment_method: &submission.payment_method,
            reference: &submission.reference,
            return_url: &submission.return_url,
            channel: CHANNEL_WEB,
            country_code,
        };

        let body = self
            .post("payments", &request, "payments", SUBMIT_FAILURE)
            .await?;

        let response: AdyenPaymentResponse =
            serde_json::from_str(&body).map_err(|e| RelayError::MalformedResponse {
                operation: "payments",
                detail: e.to_string(),
            })?;

        if let Some(reason) = &response.refusal_reason {
            info!(
                "payment refused: reference={}, reason={}",
                submission.reference, reason
            );
        }

        info!(
            "payment result: reference={}, result_code={:?}",
            submission.reference, response.result_code
        );

        Ok(PaymentOutcome {
            status: response.result_code.into(),
            psp_reference: response.psp_reference,
            action: response.action,
        })
    }

    /// Shared POST path: attach credentials, check status, normalize errors.
    /// Non-2xx detail is logged here and reduced to `failure_message` for the
    /// caller.
    async fn post<T: Serialize>(
        &self,
        path: &str,
        request: &T,
        operation: &'static str,
        failure_message: &str,
    ) -> RelayResult<String> {
        let url = format!("{}/{}", self.config.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("x-API-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(e, operation))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, operation))?;

        if !status.is_success() {
            match serde_json::from_str::<AdyenErrorResponse>(&body) {
                Ok(err) => error!(
                    "Adyen API error: operation={}, status={}, code={:?}, type={:?}, psp={:?}, message={}",
                    operation, status, err.error_code, err.error_type, err.psp_reference, err.message
                ),
                Err(_) => error!(
                    "Adyen API error: operation={}, status={}, body={}",
                    operation, status, body
                ),
            }

            return Err(RelayError::Upstream {
                operation,
                status: status.as_u16(),
                message: failure_message.to_string(),
            });
        }

        debug!("Adyen call succeeded: operation={}, status={}", operation, status);
        Ok(body)
    }
}

fn transport_error(err: reqwest::Error, operation: &'static str) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout { operation }
    } else {
        RelayError::Network {
            operation,
            detail: err.to_string(),
        }
    }
}

// =============================================================================
// Adyen API Types
// =============================================================================

/// Bootstrap payload for the client widget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentContext {
    /// Client key the widget uses to talk to the processor directly
    pub client_key: String,
    /// Environment flag ("test" or "live")
    pub environment: String,
    /// Adyen's paymentMethods response, passed through unchanged
    pub payment_methods_response: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentMethodsRequest<'a> {
    merchant_account: &'a str,
    country_code: &'a str,
    amount: Amount,
    channel: &'a str,
    shopper_locale: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplePaySessionRequest<'a> {
    merchant_identifier: &'a str,
    domain_name: &'a str,
    display_name: &'a str,
    initiative: &'a str,
    initiative_context: &'a str,
    validation_url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdyenPaymentRequest<'a> {
    amount: Amount,
    merchant_account: &'a str,
    payment_method: &'a serde_json::Value,
    reference: &'a str,
    return_url: &'a str,
    channel: &'a str,
    country_code: &'a str,
}

/// Result codes Adyen returns on `/payments`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AdyenResultCode {
    Authorised,
    Refused,
    Cancelled,
    Error,
    Pending,
    Received,
    RedirectShopper,
    IdentifyShopper,
    ChallengeShopper,
    PresentToShopper,
    #[serde(other)]
    Unknown,
}

impl From<AdyenResultCode> for relay_core::PaymentStatus {
    fn from(code: AdyenResultCode) -> Self {
        match code {
            AdyenResultCode::Authorised => relay_core::PaymentStatus::Success,
            _ => relay_core::PaymentStatus::Declined,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdyenPaymentResponse {
    result_code: AdyenResultCode,
    #[serde(default)]
    psp_reference: Option<String>,
    #[serde(default)]
    refusal_reason: Option<String>,
    #[serde(default)]
    action: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdyenErrorResponse {
    #[serde(default)]
    error_code: Option<String>,
    message: String,
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    psp_reference: Option<String>,
}
