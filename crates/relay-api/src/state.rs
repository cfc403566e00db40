//! # Application State
//!
//! Shared state for the Axum application, built once at startup and injected
//! into every handler. Nothing in here mutates after construction.

use crate::forwarder::Forwarder;
use axum::body::Bytes;
use relay_adyen::AdyenClient;
use relay_core::{Amount, Currency, MerchantProfile, RelayError, RelayResult};
use tracing::{info, warn};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Amount charged when the caller supplies none. Explicit and logged on
    /// every substitution so displayed and charged amounts can be reconciled.
    pub default_amount: Amount,
    /// Country code sent to the processor when the caller supplies none
    pub default_country: String,
    /// URL the processor redirects back to after a follow-up action
    pub return_url: String,
    /// Optional webhook target for captured submissions
    pub forward_url: Option<String>,
    /// Optional path to the Apple Pay domain verification file
    pub domain_association_file: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> RelayResult<Self> {
        dotenvy::dotenv().ok();

        let default_currency = match std::env::var("DEFAULT_AMOUNT_CURRENCY") {
            Ok(value) => value
                .parse::<Currency>()
                .map_err(RelayError::Configuration)?,
            Err(_) => Currency::USD,
        };
        let default_value = match std::env::var("DEFAULT_AMOUNT_VALUE") {
            Ok(value) => value.parse::<i64>().map_err(|_| {
                RelayError::Configuration(
                    "DEFAULT_AMOUNT_VALUE must be an integer minor-unit amount".to_string(),
                )
            })?,
            Err(_) => 1000,
        };
        if default_value < 0 {
            return Err(RelayError::Configuration(
                "DEFAULT_AMOUNT_VALUE must be non-negative".to_string(),
            ));
        }

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            default_amount: Amount::from_minor(default_value, default_currency),
            default_country: std::env::var("DEFAULT_COUNTRY_CODE")
                .unwrap_or_else(|_| "US".to_string()),
            return_url: std::env::var("RETURN_URL")
                .unwrap_or_else(|_| "http://localhost:8080/checkout/return".to_string()),
            forward_url: std::env::var("WEBHOOK_URL").ok(),
            domain_association_file: std::env::var("DOMAIN_ASSOCIATION_FILE").ok(),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Processor client
    pub adyen: AdyenClient,
    /// Configured Apple Pay merchant identity
    pub profile: MerchantProfile,
    /// Outbound webhook forwarder
    pub forwarder: Forwarder,
    /// Application config
    pub config: AppConfig,
    /// Domain verification file content, loaded once at startup
    pub domain_association: Option<Bytes>,
}

impl AppState {
    /// Build the full state from the environment.
    ///
    /// Any missing required credential is a startup failure: the process
    /// refuses to start rather than serve requests doomed to fail against
    /// the processor.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let adyen = AdyenClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Adyen client: {}", e))?;

        let profile = load_merchant_profile()?;
        let domain_association =
            load_domain_association(config.domain_association_file.as_deref());
        let forwarder = Forwarder::new(config.forward_url.clone());

        Ok(Self {
            adyen,
            profile,
            forwarder,
            config,
            domain_association,
        })
    }

    /// Assemble state from pre-built parts (used by integration tests)
    pub fn from_parts(config: AppConfig, adyen: AdyenClient, profile: MerchantProfile) -> Self {
        let forwarder = Forwarder::new(config.forward_url.clone());
        Self {
            adyen,
            profile,
            forwarder,
            config,
            domain_association: None,
        }
    }
}

/// Load the Apple Pay merchant identity from the environment
fn load_merchant_profile() -> anyhow::Result<MerchantProfile> {
    let merchant_identifier = std::env::var("APPLE_PAY_MERCHANT_IDENTIFIER")
        .map_err(|_| anyhow::anyhow!("APPLE_PAY_MERCHANT_IDENTIFIER not set"))?;
    let domain_name = std::env::var("APPLE_PAY_DOMAIN")
        .map_err(|_| anyhow::anyhow!("APPLE_PAY_DOMAIN not set"))?;
    let display_name =
        std::env::var("APPLE_PAY_DISPLAY_NAME").unwrap_or_else(|_| "Demo Store".to_string());

    Ok(MerchantProfile::new(
        merchant_identifier,
        domain_name,
        display_name,
    ))
}

/// Read the domain verification file once; served byte-for-byte afterwards
fn load_domain_association(path: Option<&str>) -> Option<Bytes> {
    let path = match path {
        Some(path) => path,
        None => {
            warn!("DOMAIN_ASSOCIATION_FILE not configured, domain verification route will 404");
            return None;
        }
    };

    match std::fs::read(path) {
        Ok(content) => {
            info!(
                "Loaded domain association file from {} ({} bytes)",
                path,
                content.len()
            );
            Some(Bytes::from(content))
        }
        Err(e) => {
            warn!("Failed to read domain association file {}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("DEFAULT_AMOUNT_VALUE");
        std::env::remove_var("DEFAULT_AMOUNT_CURRENCY");
        std::env::remove_var("DEFAULT_COUNTRY_CODE");
        std::env::remove_var("WEBHOOK_URL");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_amount, Amount::from_minor(1000, Currency::USD));
        assert_eq!(config.default_country, "US");
        assert!(config.forward_url.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            default_amount: Amount::from_minor(1000, Currency::USD),
            default_country: "US".to_string(),
            return_url: "http://localhost:3000/checkout/return".to_string(),
            forward_url: None,
            domain_association_file: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
