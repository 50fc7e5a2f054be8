//! Shipping address captured by the shipping step.

use serde::{Deserialize, Serialize};

/// A postal address. Every field may be empty until the shopper fills in
/// the shipping step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    /// Street line.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal/ZIP code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
}

impl ShippingAddress {
    /// Create a new address.
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }

    /// Check that every field has been filled in.
    pub fn is_complete(&self) -> bool {
        [&self.address, &self.city, &self.postal_code, &self.country]
            .iter()
            .all(|part| !part.trim().is_empty())
    }

    /// Format as the single line shown on the review step.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {} {}, {}",
            self.address, self.city, self.postal_code, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line() {
        let addr = ShippingAddress::new("1 Main St", "Springfield", "12345", "USA");
        assert_eq!(addr.one_line(), "1 Main St, Springfield 12345, USA");
        assert!(addr.is_complete());
    }

    #[test]
    fn test_partial_address_deserializes() {
        let addr: ShippingAddress = serde_json::from_str(r#"{"city":"Oslo"}"#).unwrap();
        assert_eq!(addr.city, "Oslo");
        assert!(addr.address.is_empty());
        assert!(!addr.is_complete());
    }
}
