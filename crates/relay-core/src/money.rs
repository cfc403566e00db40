//! # Money Types
//!
//! Minor-unit amounts for the relay. The processor wire format counts in the
//! smallest currency unit (cents for USD), so amounts are integers end to end.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    MXN,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::CHF => "CHF",
            Currency::MXN => "MXN",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, most others have 2)
    pub fn minor_unit_digits(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            "CHF" => Ok(Currency::CHF),
            "MXN" => Ok(Currency::MXN),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

/// An amount in the smallest currency unit.
///
/// Matches both the client-facing shape and the processor wire shape:
/// `{"value": 1000, "currency": "USD"}` is $10.00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in minor units (cents for USD)
    pub value: i64,
    /// Currency
    pub currency: Currency,
}

impl Amount {
    /// Create an amount from a minor-unit value
    pub fn from_minor(value: i64, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Format for display (e.g., "10.00 USD")
    pub fn display(&self) -> String {
        let digits = self.currency.minor_unit_digits();
        if digits == 0 {
            format!("{} {}", self.value, self.currency)
        } else {
            let divisor = 10_i64.pow(u32::from(digits));
            format!(
                "{}.{:0width$} {}",
                self.value / divisor,
                (self.value % divisor).abs(),
                self.currency,
                width = digits as usize
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::from_minor(1000, Currency::USD).display(), "10.00 USD");
        assert_eq!(Amount::from_minor(1099, Currency::EUR).display(), "10.99 EUR");
        assert_eq!(Amount::from_minor(5, Currency::GBP).display(), "0.05 GBP");
        assert_eq!(Amount::from_minor(1000, Currency::JPY).display(), "1000 JPY");
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::USD));
        assert_eq!("eur".parse::<Currency>(), Ok(Currency::EUR));
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_amount_wire_shape() {
        let amount = Amount::from_minor(1000, Currency::USD);
        let json = serde_json::to_value(amount).unwrap();
        assert_eq!(json, serde_json::json!({"value": 1000, "currency": "USD"}));

        let parsed: Amount =
            serde_json::from_value(serde_json::json!({"value": 250, "currency": "GBP"})).unwrap();
        assert_eq!(parsed, Amount::from_minor(250, Currency::GBP));
    }
}
