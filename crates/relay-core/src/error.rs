//! # Relay Error Types
//!
//! Typed error handling for the relay. All relay operations return
//! `Result<T, RelayError>`, and every processor-facing failure is converted
//! into this taxonomy before it crosses the service boundary.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing credentials, invalid environment)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data from the client widget
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Processor API returned a non-2xx response. The full processor body is
    /// logged at the call site; `message` is the client-safe summary.
    #[error("Processor rejected {operation}: HTTP {status}")]
    Upstream {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// Processor returned a 2xx response the relay could not parse
    #[error("Malformed processor response for {operation}: {detail}")]
    MalformedResponse {
        operation: &'static str,
        detail: String,
    },

    /// Network failure talking to the processor
    #[error("Network error during {operation}: {detail}")]
    Network {
        operation: &'static str,
        detail: String,
    },

    /// Processor call exceeded its per-call timeout
    #[error("Processor call timed out during {operation}")]
    Timeout { operation: &'static str },
}

impl RelayError {
    /// Returns true if the failed call may be repeated without processor-side
    /// side effects. Only callers whose operation is itself idempotent
    /// (payment-context bootstrap) act on this.
    pub fn is_retryable(&self) -> bool {
        match self {
            RelayError::Network { .. } | RelayError::Timeout { .. } => true,
            RelayError::Upstream { status, .. } => *status >= 500,
            RelayError::Configuration(_)
            | RelayError::InvalidRequest(_)
            | RelayError::MalformedResponse { .. } => false,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::InvalidRequest(_) => 400,
            RelayError::Configuration(_)
            | RelayError::Upstream { .. }
            | RelayError::MalformedResponse { .. }
            | RelayError::Network { .. }
            | RelayError::Timeout { .. } => 500,
        }
    }

    /// The message shown to the client. Never contains credentials or raw
    /// processor bodies; those stay in the server-side logs.
    pub fn client_message(&self) -> String {
        match self {
            RelayError::InvalidRequest(message) => message.clone(),
            RelayError::Upstream { message, .. } => message.clone(),
            RelayError::Configuration(_) => {
                "service is not configured for this operation".to_string()
            }
            RelayError::MalformedResponse { .. } => {
                "unexpected response from payment processor".to_string()
            }
            RelayError::Network { .. } => "payment processor unreachable".to_string(),
            RelayError::Timeout { .. } => "payment processor call timed out".to_string(),
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
