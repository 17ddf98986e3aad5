//! Line-item aggregation: products plus selected order bumps.
//!
//! All arithmetic is `Decimal`, so toggling selections is exactly
//! reversible - there is no float drift to accumulate. Rounding to cents
//! happens at display time and when deriving multi-month totals, never in
//! the middle of aggregation.

pub mod discount;

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, NormalizedUpsell, Product, UpsellId};

pub use discount::{AppliedDiscount, CouponRejection, evaluate_coupon};

/// The set of order bumps a customer has opted into.
///
/// Toggling is idempotent and order-independent: toggling the same id
/// twice always returns the aggregate to its prior subtotal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpsellSelection(BTreeSet<UpsellId>);

impl UpsellSelection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership; returns whether the id is now selected.
    pub fn toggle(&mut self, id: UpsellId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Whether the id is currently selected.
    #[must_use]
    pub fn contains(&self, id: &UpsellId) -> bool {
        self.0.contains(id)
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over selected ids.
    pub fn iter(&self) -> impl Iterator<Item = &UpsellId> {
        self.0.iter()
    }
}

impl FromIterator<UpsellId> for UpsellSelection {
    fn from_iter<I: IntoIterator<Item = UpsellId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Subtotal of every product plus every *selected, enabled* order bump.
///
/// Disabled bumps are dropped from the candidate list before selection is
/// consulted, so a stale selected id pointing at a disabled bump charges
/// nothing. Product prices resolve through the currency fallback chain.
#[must_use]
pub fn subtotal(
    products: &[Product],
    upsells: &[NormalizedUpsell<'_>],
    selected: &UpsellSelection,
    currency: &CurrencyCode,
) -> Decimal {
    let products_total: Decimal = products
        .iter()
        .map(|product| product.effective_price(currency))
        .sum();

    let upsells_total: Decimal = upsells
        .iter()
        .filter(|upsell| upsell.bump.enabled)
        .filter(|upsell| selected.contains(&upsell.bump.id))
        .map(|upsell| upsell.bump.price())
        .sum();

    products_total + upsells_total
}

/// A priced checkout: subtotal, any applied discount, payable total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl PricingSummary {
    /// Summary with no discount applied.
    #[must_use]
    pub fn of(subtotal: Decimal) -> Self {
        Self {
            subtotal,
            discount: Decimal::ZERO,
            total: subtotal,
        }
    }

    /// Apply `discount`, clamping so the total never goes negative.
    #[must_use]
    pub fn with_discount(subtotal: Decimal, discount: &AppliedDiscount) -> Self {
        let amount = discount.amount.min(subtotal).max(Decimal::ZERO);
        Self {
            subtotal,
            discount: amount,
            total: (subtotal - amount).max(Decimal::ZERO),
        }
    }

    /// Remove any applied discount - the exact inverse of application.
    #[must_use]
    pub fn without_discount(&self) -> Self {
        Self::of(self.subtotal)
    }
}
