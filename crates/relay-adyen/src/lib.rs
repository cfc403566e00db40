//! # relay-adyen
//!
//! Adyen Checkout API client for the applepay-relay service.
//!
//! This crate owns the three outbound calls the relay makes:
//!
//! 1. **paymentMethods** - bootstrap payload for the client widget.
//!    Side-effect free, so a retryable failure is retried once.
//! 2. **applePay/sessions** - merchant validation. The configured merchant
//!    identity plus the caller's validation URL, with the session payload
//!    passed through verbatim. Never retried.
//! 3. **payments** - token submission. One outbound call per inbound
//!    request; re-submitting the same token risks a double charge.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_adyen::AdyenClient;
//! use relay_core::{Amount, Currency};
//!
//! let client = AdyenClient::from_env()?;
//!
//! let context = client
//!     .payment_methods(Amount::from_minor(1000, Currency::USD), "US")
//!     .await?;
//!
//! // Hand context to the widget, then relay its validation URL:
//! let session = client.apple_pay_session(&profile, &validation_url).await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::{AdyenClient, AdyenResultCode, PaymentContext};
pub use config::{AdyenConfig, AdyenEnvironment};
