//! Checkout configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shopfront_commerce::cart::PricingRules;
use shopfront_observability::{LogFormat, LogLevel};

use crate::error::CheckoutError;

/// Default host serving product images.
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration for the place-order step.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Host prepended to relative image paths.
    pub media_base_url: String,

    /// Clear cart items once an order has been created.
    pub clear_cart_on_success: bool,

    /// Shipping and tax rules.
    pub pricing: PricingRules,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            clear_cart_on_success: true,
            pricing: PricingRules::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CheckoutConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CheckoutError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CheckoutError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML config.
    pub fn from_toml_str(content: &str) -> Result<Self, CheckoutError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, CheckoutError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), CheckoutError> {
        let rules = &self.pricing;
        if !rules.tax_rate.is_finite() || rules.tax_rate < 0.0 {
            return Err(CheckoutError::Config(format!(
                "pricing.tax_rate must be a non-negative number, got {}",
                rules.tax_rate
            )));
        }
        if rules.flat_shipping.is_negative() || rules.free_shipping_threshold.is_negative() {
            return Err(CheckoutError::Config(
                "pricing amounts must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_commerce::Money;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CheckoutConfig::from_toml_str("").unwrap();
        assert_eq!(config, CheckoutConfig::default());
        assert_eq!(config.pricing.tax_rate, 0.082);
    }

    #[test]
    fn test_partial_override() {
        let config = CheckoutConfig::from_toml_str(
            r#"
            media_base_url = "https://cdn.example.com"

            [pricing]
            flat_shipping = "12.50"

            [logging]
            level = "debug"
            format = "human"
            "#,
        )
        .unwrap();

        assert_eq!(config.media_base_url, "https://cdn.example.com");
        assert_eq!(config.pricing.flat_shipping, Money::from_cents(1250));
        assert_eq!(config.pricing.free_shipping_threshold, Money::from_cents(10000));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Human);
        assert!(config.clear_cart_on_success);
    }

    #[test]
    fn test_negative_tax_rate_rejected() {
        let err = CheckoutConfig::from_toml_str("[pricing]\ntax_rate = -0.1").unwrap_err();
        assert!(matches!(err, CheckoutError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CheckoutConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("free_shipping_threshold = \"100.00\""));
        assert_eq!(CheckoutConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("shopfront-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"clear_cart_on_success": false}"#).unwrap();

        let config = CheckoutConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!config.clear_cart_on_success);
    }

    #[test]
    fn test_missing_file() {
        let err = CheckoutConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, CheckoutError::ConfigRead { .. }));
    }
}
