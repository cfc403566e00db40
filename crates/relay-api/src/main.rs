//! # Apple Pay Relay
//!
//! HTTP relay between the browser-side Apple Pay widget and Adyen's
//! Checkout API.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ADYEN_API_KEY=...
//! export ADYEN_MERCHANT_ACCOUNT=...
//! export ADYEN_CLIENT_KEY=test_...
//! export APPLE_PAY_MERCHANT_IDENTIFIER=merchant.com.example.shop
//! export APPLE_PAY_DOMAIN=shop.example.com
//!
//! # Run the server
//! applepay-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();

    info!("Adyen environment: {}", state.adyen.config().environment.as_str());
    info!("Merchant domain: {}", state.profile.domain_name);
    info!(
        "Webhook forwarding: {}",
        if state.forwarder.is_configured() {
            "enabled"
        } else {
            "disabled"
        }
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Apple Pay relay starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
