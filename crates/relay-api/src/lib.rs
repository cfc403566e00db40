//! # relay-api
//!
//! HTTP API layer for applepay-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints relaying the Apple Pay flow to the processor
//! - Fire-and-forget webhook forwarding of captured submissions
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/payment-context` | Payment methods + client key bootstrap |
//! | POST | `/api/validate-merchant` | Apple Pay merchant validation |
//! | POST | `/api/submit-payment` | Submit captured payment token |
//! | GET | `/.well-known/apple-developer-merchantid-domain-association` | Domain verification artifact |

pub mod forwarder;
pub mod handlers;
pub mod routes;
pub mod state;

pub use forwarder::Forwarder;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
