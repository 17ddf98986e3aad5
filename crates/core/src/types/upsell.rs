//! Order bumps (upsells) and their offer shapes.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::id::UpsellId;

/// Round a derived amount to cents, away from zero on midpoints.
fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The offer shape of an order bump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "offer_type", rename_all = "snake_case")]
pub enum Offer {
    /// One-time flat price.
    Flat { price: Decimal },
    /// A bundle of `duration_months` months at `monthly_price` each.
    ///
    /// Invariant: `price` equals `monthly_price * duration_months` rounded
    /// to cents. It is re-derived whenever either factor changes.
    MultiMonth {
        monthly_price: Decimal,
        duration_months: u32,
        price: Decimal,
    },
}

impl Offer {
    /// Build a multi-month bundle with the derived total.
    #[must_use]
    pub fn multi_month(monthly_price: Decimal, duration_months: u32) -> Self {
        Self::MultiMonth {
            monthly_price,
            duration_months,
            price: round_cents(monthly_price * Decimal::from(duration_months)),
        }
    }

    /// The price charged when the bump is selected.
    #[must_use]
    pub fn price(&self) -> Decimal {
        match *self {
            Self::Flat { price } | Self::MultiMonth { price, .. } => price,
        }
    }

    /// Update the monthly unit price, re-deriving the bundle total.
    ///
    /// No-op for flat offers.
    pub fn set_monthly_price(&mut self, monthly: Decimal) {
        if let Self::MultiMonth {
            monthly_price,
            duration_months,
            price,
        } = self
        {
            *monthly_price = monthly;
            *price = round_cents(monthly * Decimal::from(*duration_months));
        }
    }

    /// Update the bundle duration, re-deriving the total.
    ///
    /// No-op for flat offers.
    pub fn set_duration_months(&mut self, months: u32) {
        if let Self::MultiMonth {
            monthly_price,
            duration_months,
            price,
        } = self
        {
            *duration_months = months;
            *price = round_cents(*monthly_price * Decimal::from(months));
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// An optional add-on offered alongside the main products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBump {
    pub id: UpsellId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Disabled bumps are removed from the candidate list entirely, not
    /// merely made unselectable.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub offer: Offer,
}

impl OrderBump {
    /// Create an enabled flat-priced bump.
    #[must_use]
    pub fn flat(title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: UpsellId::generate(),
            title: title.into(),
            description: None,
            enabled: true,
            offer: Offer::Flat { price },
        }
    }

    /// Create an enabled multi-month bump with the derived total.
    #[must_use]
    pub fn multi_month(title: impl Into<String>, monthly_price: Decimal, months: u32) -> Self {
        Self {
            id: UpsellId::generate(),
            title: title.into(),
            description: None,
            enabled: true,
            offer: Offer::multi_month(monthly_price, months),
        }
    }

    /// The price charged when selected.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.offer.price()
    }
}

/// Where a normalized upsell came from.
///
/// Older checkouts carry a single `upsell` field; newer ones carry a list.
/// Both are merged into one tagged sequence at load time so nothing
/// downstream branches on shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsellOrigin {
    Legacy,
    List,
}

/// A borrowed view of an order bump tagged with its origin.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedUpsell<'a> {
    pub origin: UpsellOrigin,
    pub bump: &'a OrderBump,
}

/// Merge the legacy single upsell and the upsell list into one sequence.
///
/// The legacy entry, when present, comes first.
#[must_use]
pub fn normalize_upsells<'a>(
    legacy: Option<&'a OrderBump>,
    list: &'a [OrderBump],
) -> Vec<NormalizedUpsell<'a>> {
    let mut merged = Vec::with_capacity(list.len() + usize::from(legacy.is_some()));
    if let Some(bump) = legacy {
        merged.push(NormalizedUpsell {
            origin: UpsellOrigin::Legacy,
            bump,
        });
    }
    merged.extend(list.iter().map(|bump| NormalizedUpsell {
        origin: UpsellOrigin::List,
        bump,
    }));
    merged
}
