//! # Routes
//!
//! Axum router configuration for the relay API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/payment-context - Payment methods + client key bootstrap
/// - POST /api/validate-merchant - Apple Pay merchant validation
/// - POST /api/submit-payment - Submit captured payment token
/// - GET  /.well-known/apple-developer-merchantid-domain-association
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the widget is served from the merchant domain,
    // which is not necessarily where this relay runs
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/payment-context", post(handlers::payment_context))
        .route("/validate-merchant", post(handlers::validate_merchant))
        .route("/submit-payment", post(handlers::submit_payment));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Platform domain verification artifact
        .route(
            "/.well-known/apple-developer-merchantid-domain-association",
            get(handlers::domain_association),
        )
        // API
        .nest("/api", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
