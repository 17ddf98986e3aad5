//! The publish readiness gate.
//!
//! A four-step linear wizard drives a checkout from first save to publish:
//! `Settings -> Products -> Upsells -> ThankYou`. The machine itself is
//! pure - callers persist the draft BEFORE asking for a transition
//! (save-on-next), then apply the returned effect. Moving forward
//! validates the step being left; publishing runs the full cross-cutting
//! validation; moving backward is always allowed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CheckoutPage;

/// Wizard steps in order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Settings,
    Products,
    Upsells,
    ThankYou,
}

impl WizardStep {
    /// Steps in wizard order.
    pub const ALL: [Self; 4] = [Self::Settings, Self::Products, Self::Upsells, Self::ThankYou];

    /// The following step, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Settings => Some(Self::Products),
            Self::Products => Some(Self::Upsells),
            Self::Upsells => Some(Self::ThankYou),
            Self::ThankYou => None,
        }
    }

    /// The preceding step, if any.
    #[must_use]
    pub const fn prev(self) -> Option<Self> {
        match self {
            Self::Settings => None,
            Self::Products => Some(Self::Settings),
            Self::Upsells => Some(Self::Products),
            Self::ThankYou => Some(Self::Upsells),
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Settings => write!(f, "settings"),
            Self::Products => write!(f, "products"),
            Self::Upsells => write!(f, "upsells"),
            Self::ThankYou => write!(f, "thankyou"),
        }
    }
}

/// What the builder asked the wizard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    Next,
    Back,
    Publish,
}

/// A blocked transition: one human-readable message, and the step to land
/// on.
///
/// For publish failures the landing step is the offending earlier step,
/// not the final one, so the builder can jump the merchant straight to
/// the fix.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct StepBlocked {
    pub message: String,
    pub step: WizardStep,
}

impl StepBlocked {
    fn at(step: WizardStep, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            step,
        }
    }
}

/// A permitted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to the given step.
    Moved(WizardStep),
    /// All validation passed; the caller flips the checkout to published.
    Published,
}

/// The transition table: `step x action -> transition | blocked`.
///
/// Callers must persist the draft before calling this, regardless of the
/// outcome - a step transition is always also a save. `Next` on the final
/// step is treated as `Publish`.
///
/// # Errors
///
/// Returns [`StepBlocked`] with the message to show and the step to land
/// on. A blocked forward transition leaves the wizard on the current step.
pub fn advance(
    current: WizardStep,
    action: WizardAction,
    checkout: &CheckoutPage,
) -> Result<Transition, StepBlocked> {
    match (current, action) {
        // Backward movement is always allowed, floor at the first step
        (step, WizardAction::Back) => Ok(Transition::Moved(step.prev().unwrap_or(step))),
        (WizardStep::Settings, WizardAction::Next) => {
            validate_settings(checkout)?;
            Ok(Transition::Moved(WizardStep::Products))
        }
        (WizardStep::Products, WizardAction::Next) => {
            validate_products(checkout)?;
            Ok(Transition::Moved(WizardStep::Upsells))
        }
        // Upsells are optional, so leaving the step validates nothing
        (WizardStep::Upsells, WizardAction::Next) => Ok(Transition::Moved(WizardStep::ThankYou)),
        (WizardStep::ThankYou, WizardAction::Next | WizardAction::Publish) => {
            validate_for_publish(checkout)?;
            Ok(Transition::Published)
        }
        (step, WizardAction::Publish) => Err(StepBlocked::at(
            step,
            "Complete the remaining steps before publishing",
        )),
    }
}

fn validate_settings(checkout: &CheckoutPage) -> Result<(), StepBlocked> {
    if checkout.internal_name.trim().is_empty() {
        return Err(StepBlocked::at(
            WizardStep::Settings,
            "Give this checkout an internal name",
        ));
    }
    if checkout.payment_methods.is_empty() {
        return Err(StepBlocked::at(
            WizardStep::Settings,
            "Enable at least one payment method",
        ));
    }
    Ok(())
}

fn validate_products(checkout: &CheckoutPage) -> Result<(), StepBlocked> {
    if checkout.products.is_empty() {
        return Err(StepBlocked::at(
            WizardStep::Products,
            "Add at least one product",
        ));
    }
    Ok(())
}

/// Full cross-cutting validation run before publish.
///
/// Also used directly by `lp-cli validate`. Failures point at the step
/// where the fix lives.
///
/// # Errors
///
/// Returns the first blocking problem found, in step order.
pub fn validate_for_publish(checkout: &CheckoutPage) -> Result<(), StepBlocked> {
    if checkout.products.is_empty() {
        return Err(StepBlocked::at(
            WizardStep::Products,
            "Add at least one product",
        ));
    }
    if let Some(unpriced) = checkout
        .products
        .iter()
        .find(|product| !product.is_priced(&checkout.currency))
    {
        return Err(StepBlocked::at(
            WizardStep::Products,
            format!("\"{}\" needs a price greater than zero", unpriced.name),
        ));
    }
    if checkout.payment_methods.is_empty() {
        return Err(StepBlocked::at(
            WizardStep::Settings,
            "Enable at least one payment method",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurrencyCode, PaymentMethod, Product, TenantId};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn draft() -> CheckoutPage {
        CheckoutPage::draft(TenantId::new("tnt_demo"), "Spring launch", "spring", Utc::now())
    }

    fn publishable() -> CheckoutPage {
        let mut page = draft();
        page.payment_methods = vec![PaymentMethod::Card];
        page.products = vec![Product::one_time(
            "Course",
            CurrencyCode::usd(),
            Decimal::new(49_99, 2),
        )];
        page
    }

    #[test]
    fn test_settings_requires_internal_name() {
        let mut page = draft();
        page.internal_name = "   ".to_owned();
        page.payment_methods = vec![PaymentMethod::Card];

        let err = advance(WizardStep::Settings, WizardAction::Next, &page)
            .expect_err("blank name blocks");
        assert_eq!(err.step, WizardStep::Settings);
        assert_eq!(err.message, "Give this checkout an internal name");
    }

    #[test]
    fn test_settings_requires_payment_method() {
        let page = draft();
        let err = advance(WizardStep::Settings, WizardAction::Next, &page)
            .expect_err("no methods blocks");
        assert_eq!(err.message, "Enable at least one payment method");
    }

    #[test]
    fn test_products_step_blocks_with_zero_products() {
        // Next on the products step with nothing added stays put
        let mut page = draft();
        page.payment_methods = vec![PaymentMethod::Card];

        let err = advance(WizardStep::Products, WizardAction::Next, &page)
            .expect_err("empty products blocks");
        assert_eq!(err.step, WizardStep::Products);
        assert_eq!(err.message, "Add at least one product");
    }

    #[test]
    fn test_upsells_step_has_no_validation() {
        let page = draft();
        let transition =
            advance(WizardStep::Upsells, WizardAction::Next, &page).expect("upsells are optional");
        assert_eq!(transition, Transition::Moved(WizardStep::ThankYou));
    }

    #[test]
    fn test_back_is_always_allowed() {
        let page = draft();
        for step in WizardStep::ALL {
            let transition =
                advance(step, WizardAction::Back, &page).expect("back never validates");
            assert_eq!(transition, Transition::Moved(step.prev().unwrap_or(step)));
        }
    }

    #[test]
    fn test_publish_happy_path() {
        let page = publishable();
        let transition =
            advance(WizardStep::ThankYou, WizardAction::Publish, &page).expect("publishable");
        assert_eq!(transition, Transition::Published);
    }

    #[test]
    fn test_next_on_final_step_publishes() {
        let page = publishable();
        let transition =
            advance(WizardStep::ThankYou, WizardAction::Next, &page).expect("publishable");
        assert_eq!(transition, Transition::Published);
    }

    #[test]
    fn test_publish_jumps_back_to_unpriced_product() {
        let mut page = publishable();
        page.products.push(Product::one_time(
            "Freebie",
            CurrencyCode::usd(),
            Decimal::ZERO,
        ));

        let err = advance(WizardStep::ThankYou, WizardAction::Publish, &page)
            .expect_err("unpriced product blocks");
        assert_eq!(err.step, WizardStep::Products);
        assert!(err.message.contains("Freebie"));
    }

    #[test]
    fn test_publish_jumps_back_to_settings_without_methods() {
        let mut page = publishable();
        page.payment_methods.clear();

        let err = advance(WizardStep::ThankYou, WizardAction::Publish, &page)
            .expect_err("no methods blocks");
        assert_eq!(err.step, WizardStep::Settings);
    }

    #[test]
    fn test_publish_before_final_step_is_blocked() {
        let page = publishable();
        let err = advance(WizardStep::Products, WizardAction::Publish, &page)
            .expect_err("publish only at the end");
        assert_eq!(err.step, WizardStep::Products);
    }
}
