//! # Request Handlers
//!
//! Axum request handlers for the relay API: payment-context bootstrap,
//! Apple Pay merchant validation, and payment submission.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use relay_adyen::PaymentContext;
use relay_core::{payment_method_present, Amount, PaymentOutcome, PaymentSubmission, RelayError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Payment context request; amount and country fall back to configured defaults
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentContextRequest {
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Merchant validation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateMerchantRequest {
    /// Opaque URL handed over by the payment sheet
    #[serde(default)]
    pub validation_url: Option<String>,
}

/// Payment submission request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentRequest {
    /// Payment method data captured by the widget after authorization
    #[serde(default)]
    pub payment_method: Option<serde_json::Value>,
    #[serde(default)]
    pub amount: Option<Amount>,
    /// Tracking reference; generated per attempt when absent
    #[serde(default)]
    pub reference: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn relay_error_to_response(err: RelayError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.client_message())))
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "applepay-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Bootstrap the client widget: available payment methods plus client key
#[instrument(skip(state, request))]
pub async fn payment_context(
    State(state): State<AppState>,
    Json(request): Json<PaymentContextRequest>,
) -> Result<Json<PaymentContext>, (StatusCode, Json<ErrorResponse>)> {
    let amount = match request.amount {
        Some(amount) if amount.value < 0 => {
            return Err(bad_request(
                "amount.value must be a non-negative minor-unit amount",
            ));
        }
        Some(amount) => amount,
        None => {
            info!(
                "no amount supplied, using configured default {}",
                state.config.default_amount.display()
            );
            state.config.default_amount
        }
    };
    let country_code = request
        .country_code
        .unwrap_or_else(|| state.config.default_country.clone());

    let context = state
        .adyen
        .payment_methods(amount, &country_code)
        .await
        .map_err(|e| {
            error!("Failed to build payment context: {}", e);
            relay_error_to_response(e)
        })?;

    Ok(Json(context))
}

/// Ask the processor to sign an Apple Pay merchant session
#[instrument(skip(state, request))]
pub async fn validate_merchant(
    State(state): State<AppState>,
    Json(request): Json<ValidateMerchantRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    // Fail fast before any network call; validation URLs arrive straight
    // from the payment sheet and are occasionally absent on aborted flows.
    let validation_url = match request.validation_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(bad_request("validationUrl is required")),
    };
    if reqwest::Url::parse(&validation_url).is_err() {
        return Err(bad_request("validationUrl is not a valid URL"));
    }

    let session = state
        .adyen
        .apple_pay_session(&state.profile, &validation_url)
        .await
        .map_err(|e| {
            error!("Merchant validation failed: {}", e);
            relay_error_to_response(e)
        })?;

    Ok(Json(session))
}

/// Submit a captured Apple Pay token for authorization
#[instrument(skip(state, request))]
pub async fn submit_payment(
    State(state): State<AppState>,
    Json(request): Json<SubmitPaymentRequest>,
) -> Result<Json<PaymentOutcome>, (StatusCode, Json<ErrorResponse>)> {
    let payment_method = match request.payment_method {
        Some(pm) if payment_method_present(&pm) => pm,
        _ => return Err(bad_request("paymentMethod is required")),
    };

    let amount = match request.amount {
        Some(amount) if amount.value < 0 => {
            return Err(bad_request(
                "amount.value must be a non-negative minor-unit amount",
            ));
        }
        Some(amount) => amount,
        None => {
            info!(
                "no amount supplied, charging configured default {}",
                state.config.default_amount.display()
            );
            state.config.default_amount
        }
    };

    let mut submission = PaymentSubmission::new(payment_method, amount, &state.config.return_url);
    if let Some(reference) = request.reference {
        submission = submission.with_reference(reference);
    }

    let outcome = state
        .adyen
        .submit_payment(&submission, &state.config.default_country)
        .await
        .map_err(|e| {
            error!("Payment submission failed: {}", e);
            relay_error_to_response(e)
        })?;

    // Terminal either way; notify the configured sink without holding up
    // the response.
    state.forwarder.dispatch(&submission, &outcome);

    Ok(Json(outcome))
}

/// Apple Pay domain verification artifact, served byte-for-byte
pub async fn domain_association(State(state): State<AppState>) -> Response {
    match &state.domain_association {
        Some(content) => (
            [(header::CONTENT_TYPE, "text/plain")],
            content.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "domain association file is not configured",
            )),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("validationUrl is required");
        assert_eq!(err.error, "validationUrl is required");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"error": "validationUrl is required"})
        );
    }

    #[test]
    fn test_relay_error_conversion() {
        let err = RelayError::InvalidRequest("paymentMethod is required".to_string());
        let (status, body) = relay_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "paymentMethod is required");

        let err = RelayError::Upstream {
            operation: "payments",
            status: 422,
            message: "payment could not be processed".to_string(),
        };
        let (status, body) = relay_error_to_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "payment could not be processed");
    }
}
