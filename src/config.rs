//! Cart configuration

use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::storage::CART_STORAGE_KEY;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Currency code not supported by the storefront.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Settings shared by every cart session.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Storage key holding the cart
    pub storage_key: String,

    /// Currency all prices are held in
    pub currency: &'static Currency,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_STORAGE_KEY.to_string(),
            currency: iso::KES,
        }
    }
}

impl CartConfig {
    /// Default configuration in another currency.
    #[must_use]
    pub fn with_currency(currency: &'static Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }
}

/// Resolve an ISO currency code (case-insensitive).
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for codes the storefront does not
/// sell in.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    let currency = match code.trim().to_ascii_uppercase().as_str() {
        "KES" => iso::KES,
        "UGX" => iso::UGX,
        "TZS" => iso::TZS,
        "USD" => iso::USD,
        "GBP" => iso::GBP,
        "EUR" => iso::EUR,
        _ => return Err(ConfigError::UnknownCurrency(code.to_string())),
    };

    Ok(currency)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_config() {
        let config = CartConfig::default();

        assert_eq!(config.storage_key, "furniture_cart");
        assert_eq!(config.currency, iso::KES);
    }

    #[test]
    fn parse_currency_is_case_insensitive() -> TestResult {
        assert_eq!(parse_currency("kes")?, iso::KES);
        assert_eq!(parse_currency(" USD ")?, iso::USD);

        Ok(())
    }

    #[test]
    fn parse_currency_rejects_unknown_code() {
        assert_eq!(
            parse_currency("ABC"),
            Err(ConfigError::UnknownCurrency("ABC".to_string()))
        );
    }
}
