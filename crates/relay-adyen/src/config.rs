//! # Adyen Configuration
//!
//! Configuration management for the Adyen integration.
//! All credentials are loaded from environment variables once at startup.

use relay_core::{RelayError, RelayResult};
use std::env;

/// Processor environment selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdyenEnvironment {
    Test,
    Live,
}

impl AdyenEnvironment {
    /// Lowercase name as the client widget expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            AdyenEnvironment::Test => "test",
            AdyenEnvironment::Live => "live",
        }
    }

    /// Checkout API base URL for this environment
    pub fn checkout_base_url(&self) -> &'static str {
        match self {
            AdyenEnvironment::Test => "https://checkout-test.adyen.com/v71",
            AdyenEnvironment::Live => "https://checkout-live.adyen.com/v71",
        }
    }

    /// Parse from the `ADYEN_ENVIRONMENT` variable
    pub fn parse(value: &str) -> RelayResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "test" => Ok(AdyenEnvironment::Test),
            "live" => Ok(AdyenEnvironment::Live),
            other => Err(RelayError::Configuration(format!(
                "ADYEN_ENVIRONMENT must be 'test' or 'live', got '{}'",
                other
            ))),
        }
    }
}

/// Adyen API configuration
#[derive(Debug, Clone)]
pub struct AdyenConfig {
    /// Checkout API key
    pub api_key: String,

    /// Merchant account identifier
    pub merchant_account: String,

    /// Client key handed to the browser widget (test_... or live_...)
    pub client_key: String,

    /// Environment selector
    pub environment: AdyenEnvironment,

    /// Checkout API base URL (overridable for testing/mocking)
    pub base_url: String,
}

impl AdyenConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `ADYEN_API_KEY`
    /// - `ADYEN_MERCHANT_ACCOUNT`
    /// - `ADYEN_CLIENT_KEY`
    ///
    /// Optional:
    /// - `ADYEN_ENVIRONMENT` (default `test`)
    pub fn from_env() -> RelayResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = required_var("ADYEN_API_KEY")?;
        let merchant_account = required_var("ADYEN_MERCHANT_ACCOUNT")?;
        let client_key = required_var("ADYEN_CLIENT_KEY")?;

        let environment = match env::var("ADYEN_ENVIRONMENT") {
            Ok(value) => AdyenEnvironment::parse(&value)?,
            Err(_) => AdyenEnvironment::Test,
        };

        // Validate key formats
        if !client_key.starts_with("test_") && !client_key.starts_with("live_") {
            return Err(RelayError::Configuration(
                "ADYEN_CLIENT_KEY must start with test_ or live_".to_string(),
            ));
        }

        let expected_prefix = match environment {
            AdyenEnvironment::Test => "test_",
            AdyenEnvironment::Live => "live_",
        };
        if !client_key.starts_with(expected_prefix) {
            return Err(RelayError::Configuration(format!(
                "ADYEN_CLIENT_KEY does not match the {} environment",
                environment.as_str()
            )));
        }

        Ok(Self {
            api_key,
            merchant_account,
            client_key,
            environment,
            base_url: environment.checkout_base_url().to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        api_key: impl Into<String>,
        merchant_account: impl Into<String>,
        client_key: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            merchant_account: merchant_account.into(),
            client_key: client_key.into(),
            environment: AdyenEnvironment::Test,
            base_url: AdyenEnvironment::Test.checkout_base_url().to_string(),
        }
    }

    /// Check if pointed at the live environment
    pub fn is_live(&self) -> bool {
        self.environment == AdyenEnvironment::Live
    }

    /// Builder: set custom Checkout base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

fn required_var(name: &'static str) -> RelayResult<String> {
    env::var(name).map_err(|_| RelayError::Configuration(format!("{} not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(
            AdyenEnvironment::Test.checkout_base_url(),
            "https://checkout-test.adyen.com/v71"
        );
        assert_eq!(
            AdyenEnvironment::Live.checkout_base_url(),
            "https://checkout-live.adyen.com/v71"
        );
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            AdyenEnvironment::parse("TEST").unwrap(),
            AdyenEnvironment::Test
        );
        assert_eq!(
            AdyenEnvironment::parse("live").unwrap(),
            AdyenEnvironment::Live
        );
        assert!(AdyenEnvironment::parse("staging").is_err());
    }

    #[test]
    fn test_explicit_config_defaults_to_test() {
        let config = AdyenConfig::new("api_key_abc", "TestMerchant", "test_xyz");
        assert!(!config.is_live());
        assert_eq!(config.base_url, "https://checkout-test.adyen.com/v71");
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let config = AdyenConfig::new("api_key_abc", "TestMerchant", "test_xyz")
            .with_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_from_env_missing_key() {
        // Clear any existing env vars
        env::remove_var("ADYEN_API_KEY");
        env::remove_var("ADYEN_MERCHANT_ACCOUNT");
        env::remove_var("ADYEN_CLIENT_KEY");

        let result = AdyenConfig::from_env();
        assert!(result.is_err());
    }
}
