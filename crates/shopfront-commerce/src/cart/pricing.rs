//! Order summary price derivation.
//!
//! Each figure is rounded to cents before it feeds the next one: shipping
//! and tax are computed from the rounded items price, and the total adds
//! the three rounded figures. The total can therefore differ by a cent from
//! rounding the exact sum once; that is the figure shoppers were quoted, so
//! it is kept.

use crate::cart::CartLineItem;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Default items price above which shipping is free.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(100_00);

/// Default flat shipping charge.
pub const DEFAULT_FLAT_SHIPPING: Money = Money::from_cents(10_00);

/// Default tax rate applied to the items price.
pub const DEFAULT_TAX_RATE: f64 = 0.082;

/// Shipping and tax rules for the order summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingRules {
    /// Shipping is free when the items price is strictly above this.
    pub free_shipping_threshold: Money,
    /// Shipping charge otherwise.
    pub flat_shipping: Money,
    /// Fraction of the items price charged as tax.
    pub tax_rate: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            flat_shipping: DEFAULT_FLAT_SHIPPING,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl PricingRules {
    /// Derive the four summary prices for the given cart lines.
    pub fn derive(&self, items: &[CartLineItem]) -> Result<PriceBreakdown, CommerceError> {
        let items_sum = items
            .iter()
            .fold(0.0, |acc, item| acc + item.line_total_decimal());
        let items_price = Money::from_decimal(items_sum)?;

        let shipping_price = self.shipping_for(items_price);
        let tax_price = Money::from_decimal(self.tax_rate * items_price.to_decimal())?;
        let total_price = Money::from_decimal(
            items_price.to_decimal() + shipping_price.to_decimal() + tax_price.to_decimal(),
        )?;

        Ok(PriceBreakdown {
            items_price,
            shipping_price,
            tax_price,
            total_price,
        })
    }

    /// Shipping charge for an items price.
    pub fn shipping_for(&self, items_price: Money) -> Money {
        if items_price > self.free_shipping_threshold {
            Money::ZERO
        } else {
            self.flat_shipping
        }
    }
}

/// Derive summary prices with the default rules.
pub fn derive_prices(items: &[CartLineItem]) -> Result<PriceBreakdown, CommerceError> {
    PricingRules::default().derive(items)
}

/// The order summary figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Sum of line totals.
    pub items_price: Money,
    /// Shipping charge.
    pub shipping_price: Money,
    /// Tax charge.
    pub tax_price: Money,
    /// Grand total.
    pub total_price: Money,
}

impl PriceBreakdown {
    /// Labelled rows in display order.
    pub fn rows(&self) -> [(&'static str, Money); 4] {
        [
            ("Items", self.items_price),
            ("Shipping", self.shipping_price),
            ("Tax", self.tax_price),
            ("Total", self.total_price),
        ]
    }

    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_price.is_zero()
    }
}
