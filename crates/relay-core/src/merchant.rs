//! # Merchant Profile
//!
//! The configured Apple Pay merchant identity. The domain must exactly match
//! the domain registered and verified with the platform, or the processor
//! rejects every merchant-validation call.

use serde::{Deserialize, Serialize};

/// Apple Pay merchant identity, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantProfile {
    /// Apple merchant identifier (e.g., "merchant.com.example.shop")
    pub merchant_identifier: String,

    /// Verified merchant domain (e.g., "shop.example.com")
    pub domain_name: String,

    /// Name shown on the payment sheet
    pub display_name: String,
}

impl MerchantProfile {
    /// Create a profile with the three required fields
    pub fn new(
        merchant_identifier: impl Into<String>,
        domain_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            merchant_identifier: merchant_identifier.into(),
            domain_name: domain_name.into(),
            display_name: display_name.into(),
        }
    }

    /// All fields present and non-empty; precondition for merchant validation
    pub fn is_complete(&self) -> bool {
        !self.merchant_identifier.trim().is_empty()
            && !self.domain_name.trim().is_empty()
            && !self.display_name.trim().is_empty()
    }
}
