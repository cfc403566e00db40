//! # relay-core
//!
//! Core types for the applepay-relay service.
//!
//! This crate provides:
//! - `RelayError` for typed error handling across the relay
//! - `Currency` and `Amount` for minor-unit money
//! - `PaymentSubmission` and `PaymentOutcome` for the token submission flow
//! - `MerchantProfile` for the configured Apple Pay merchant identity
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{Amount, Currency, PaymentSubmission};
//!
//! // Build a submission from the token captured by the client widget
//! let submission = PaymentSubmission::new(
//!     token_json,
//!     Amount::from_minor(1000, Currency::USD),
//!     "https://shop.example.com/checkout/return",
//! );
//!
//! // submission.reference is unique per attempt unless overridden
//! let outcome = client.submit_payment(&submission, "US").await?;
//! ```

pub mod error;
pub mod merchant;
pub mod money;
pub mod payment;

// Re-exports for convenience
pub use error::{RelayError, RelayResult};
pub use merchant::MerchantProfile;
pub use money::{Amount, Currency};
pub use payment::{payment_method_present, PaymentOutcome, PaymentStatus, PaymentSubmission};
