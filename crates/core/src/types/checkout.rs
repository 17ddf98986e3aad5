//! The checkout page aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use super::id::{CheckoutId, TenantId};
use super::payment::PaymentMethod;
use super::product::Product;
use super::upsell::{NormalizedUpsell, OrderBump, normalize_upsells};

/// Checkout page lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    #[default]
    Draft,
    Active,
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// Which optional customer fields the checkout collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    #[serde(default)]
    pub collect_phone: bool,
    #[serde(default)]
    pub collect_billing_address: bool,
}

/// Thank-you page configuration shown after a completed payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThankYouPage {
    pub headline: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl Default for ThankYouPage {
    fn default() -> Self {
        Self {
            headline: "Thank you for your purchase!".to_owned(),
            message: String::new(),
            redirect_url: None,
        }
    }
}

/// A checkout page, from first draft through publish.
///
/// The page exclusively owns its products and order bumps; store settings
/// are referenced by tenant id, never embedded. Mutation happens only
/// through the builder, and `Draft -> Active` only through the publish gate
/// in [`crate::wizard`]. Deletion is hard: the page is removed from the
/// tenant's collection outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutPage {
    pub id: CheckoutId,
    pub tenant_id: TenantId,
    /// Merchant-facing name, required before leaving the settings step.
    #[serde(default)]
    pub internal_name: String,
    /// Customer-facing title.
    #[serde(default)]
    pub title: String,
    /// URL slug for the public share link; valid once published.
    pub slug: String,
    #[serde(default)]
    pub status: CheckoutStatus,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub products: Vec<Product>,
    /// Legacy single upsell, kept for checkouts created before the list
    /// existed. Merged via [`Self::all_upsells`].
    #[serde(default)]
    pub upsell: Option<OrderBump>,
    #[serde(default)]
    pub upsells: Vec<OrderBump>,
    /// Methods in merchant display order; the first offerable one is the
    /// default selection at render time.
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub customer_fields: CustomerFields,
    #[serde(default)]
    pub thank_you: ThankYouPage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckoutPage {
    /// Create a fresh draft.
    #[must_use]
    pub fn draft(
        tenant_id: TenantId,
        internal_name: impl Into<String>,
        slug: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CheckoutId::generate(),
            tenant_id,
            internal_name: internal_name.into(),
            title: String::new(),
            slug: slug.into(),
            status: CheckoutStatus::Draft,
            currency: CurrencyCode::usd(),
            products: Vec::new(),
            upsell: None,
            upsells: Vec::new(),
            payment_methods: Vec::new(),
            customer_fields: CustomerFields::default(),
            thank_you: ThankYouPage::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The merged upsell sequence (legacy entry first).
    #[must_use]
    pub fn all_upsells(&self) -> Vec<NormalizedUpsell<'_>> {
        normalize_upsells(self.upsell.as_ref(), &self.upsells)
    }

    /// Whether the page has been published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self.status, CheckoutStatus::Active)
    }
}
