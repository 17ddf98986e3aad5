//! Products and their pricing modes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::{CurrencyCode, PriceTable};
use super::id::ProductId;

/// Billing interval for subscription pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekly => write!(f, "week"),
            Self::Monthly => write!(f, "month"),
            Self::Quarterly => write!(f, "quarter"),
            Self::Yearly => write!(f, "year"),
        }
    }
}

/// Which pricing mode is currently active for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    #[default]
    OneTime,
    Subscription,
    PaymentPlan,
}

/// One-time purchase pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneTimePricing {
    #[serde(default)]
    pub prices: PriceTable,
}

/// Recurring subscription pricing; the price is charged per interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPricing {
    #[serde(default)]
    pub prices: PriceTable,
    #[serde(default)]
    pub interval: BillingInterval,
}

/// Installment plan pricing; the price is charged per installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlanPricing {
    #[serde(default)]
    pub prices: PriceTable,
    pub installments: u32,
}

impl Default for PaymentPlanPricing {
    fn default() -> Self {
        Self {
            prices: PriceTable::default(),
            installments: 2,
        }
    }
}

/// The three mutually exclusive pricing modes a product carries.
///
/// A merchant can configure all three; `active` selects the one the
/// checkout charges, and only the active mode's price table determines the
/// product's effective unit price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingOptions {
    #[serde(default)]
    pub active: PricingMode,
    #[serde(default)]
    pub one_time: OneTimePricing,
    #[serde(default)]
    pub subscription: SubscriptionPricing,
    #[serde(default)]
    pub payment_plan: PaymentPlanPricing,
}

impl PricingOptions {
    /// The active mode's price table.
    #[must_use]
    pub const fn active_prices(&self) -> &PriceTable {
        match self.active {
            PricingMode::OneTime => &self.one_time.prices,
            PricingMode::Subscription => &self.subscription.prices,
            PricingMode::PaymentPlan => &self.payment_plan.prices,
        }
    }
}

/// A product sold on a checkout page.
///
/// Products are exclusively owned by their checkout - there is no shared
/// catalog across checkouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub pricing: PricingOptions,
}

impl Product {
    /// Create a one-time product priced in a single currency.
    #[must_use]
    pub fn one_time(name: impl Into<String>, currency: CurrencyCode, price: Decimal) -> Self {
        let mut prices = PriceTable::new();
        prices.set(currency, price);
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: None,
            image_url: None,
            pricing: PricingOptions {
                active: PricingMode::OneTime,
                one_time: OneTimePricing { prices },
                ..PricingOptions::default()
            },
        }
    }

    /// Effective unit price in `currency` via the active pricing mode.
    ///
    /// Follows the price table fallback chain; zero means the product is
    /// not priced for this currency, which blocks publish.
    #[must_use]
    pub fn effective_price(&self, currency: &CurrencyCode) -> Decimal {
        self.pricing.active_prices().resolve(currency)
    }

    /// Whether the product can go live on a checkout in `currency`.
    #[must_use]
    pub fn is_priced(&self, currency: &CurrencyCode) -> bool {
        self.effective_price(currency) > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_follows_active_mode() {
        let mut product = Product::one_time("Course", CurrencyCode::usd(), Decimal::new(99_00, 2));
        product
            .pricing
            .subscription
            .prices
            .set(CurrencyCode::usd(), Decimal::new(9_00, 2));

        assert_eq!(
            product.effective_price(&CurrencyCode::usd()),
            Decimal::new(99_00, 2)
        );

        product.pricing.active = PricingMode::Subscription;
        assert_eq!(
            product.effective_price(&CurrencyCode::usd()),
            Decimal::new(9_00, 2)
        );
    }

    #[test]
    fn test_effective_price_usd_fallback() {
        let product = Product::one_time("Course", CurrencyCode::usd(), Decimal::new(49_99, 2));
        assert_eq!(
            product.effective_price(&CurrencyCode::new("eur")),
            Decimal::new(49_99, 2)
        );
    }

    #[test]
    fn test_unpriced_mode_blocks_publish() {
        let mut product = Product::one_time("Course", CurrencyCode::usd(), Decimal::new(10_00, 2));
        assert!(product.is_priced(&CurrencyCode::usd()));

        // Switching to a mode with no prices makes the product unpriced
        product.pricing.active = PricingMode::PaymentPlan;
        assert!(!product.is_priced(&CurrencyCode::usd()));
    }
}
