//! # Payment Types
//!
//! Submission and outcome types for the token submission flow.
//! Per submission: `Received → Submitted → {Authorised | Refused |
//! ActionRequired | Error}`. Action resolution is handed back to the client
//! widget; the relay never drives it.

use crate::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A captured payment token on its way to the processor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    /// Payment method data from the widget (opaque to the relay)
    pub payment_method: serde_json::Value,

    /// Amount in minor units
    pub amount: Amount,

    /// Tracking reference. Unique per attempt so concurrent submissions stay
    /// distinguishable on the processor side.
    pub reference: String,

    /// URL the processor redirects back to after any follow-up action
    pub return_url: String,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl PaymentSubmission {
    /// Create a submission with a generated per-attempt reference
    pub fn new(
        payment_method: serde_json::Value,
        amount: Amount,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            payment_method,
            amount,
            reference: Uuid::new_v4().to_string(),
            return_url: return_url.into(),
            created_at: Utc::now(),
        }
    }

    /// Builder: use a caller-supplied reference instead of the generated one
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }
}

/// Whether a captured payment method payload actually carries data.
/// The widget occasionally hands over `null` or `{}` on aborted flows.
pub fn payment_method_present(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Object(map) => !map.is_empty(),
        serde_json::Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Client-facing terminal status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Processor authorised the payment
    Success,
    /// Any other terminal result (refused, cancelled, errored)
    Declined,
}

/// The normalized result returned to the client widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    /// Terminal status derived from the processor result code
    pub status: PaymentStatus,

    /// Processor reference for the attempt, when supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psp_reference: Option<String>,

    /// Follow-up instruction (redirect, additional authentication), forwarded
    /// verbatim so the widget can continue the flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<serde_json::Value>,
}

impl PaymentOutcome {
    /// Check whether the processor authorised the payment
    pub fn is_success(&self) -> bool {
        matches!(self.status, PaymentStatus::Success)
    }

    /// Check whether the widget must perform a follow-up step
    pub fn requires_action(&self) -> bool {
        self.action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use serde_json::json;

    #[test]
    fn test_submission_references_are_distinct() {
        let amount = Amount::from_minor(1000, Currency::USD);
        let a = PaymentSubmission::new(json!({"type": "applepay"}), amount, "https://x/return");
        let b = PaymentSubmission::new(json!({"type": "applepay"}), amount, "https://x/return");

        assert_ne!(a.reference, b.reference);
        assert!(!a.reference.is_empty());
    }

    #[test]
    fn test_submission_with_reference() {
        let submission = PaymentSubmission::new(
            json!({"type": "applepay"}),
            Amount::from_minor(1000, Currency::USD),
            "https://x/return",
        )
        .with_reference("order-42");

        assert_eq!(submission.reference, "order-42");
    }

    #[test]
    fn test_payment_method_present() {
        assert!(payment_method_present(&json!({"type": "applepay"})));
        assert!(payment_method_present(&json!("opaque-token")));
        assert!(!payment_method_present(&json!(null)));
        assert!(!payment_method_present(&json!({})));
        assert!(!payment_method_present(&json!("  ")));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = PaymentOutcome {
            status: PaymentStatus::Success,
            psp_reference: Some("psp1".into()),
            action: None,
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "success", "pspReference": "psp1"})
        );

        let declined = PaymentOutcome {
            status: PaymentStatus::Declined,
            psp_reference: None,
            action: None,
        };
        assert_eq!(
            serde_json::to_value(&declined).unwrap(),
            json!({"status": "declined"})
        );
    }

    #[test]
    fn test_outcome_action_passthrough() {
        let action = json!({"type": "redirect", "url": "https://processor/3ds"});
        let outcome = PaymentOutcome {
            status: PaymentStatus::Declined,
            psp_reference: None,
            action: Some(action.clone()),
        };

        assert!(outcome.requires_action());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap()["action"],
            action
        );
    }
}
