//! Checkout page route handlers.
//!
//! Assembles render-ready view models from the public config and serves
//! the pricing preview the page re-requests on every selection or coupon
//! change. All pricing runs through `launchpay-core`; these handlers only
//! shape data for the page.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use launchpay_core::{
    CheckoutId, CurrencyCode, PaymentMethod, PricingMode, Product, ProductId, UpsellId,
    payments::resolve_offerable,
    pricing::{self, PricingSummary, UpsellSelection, evaluate_coupon},
    types::upsell::{NormalizedUpsell, Offer},
};

use crate::error::{AppError, Result};
use crate::processor::{PaymentIntent, PaymentOutcome};
use crate::state::AppState;
use crate::store::PublicConfig;

// =============================================================================
// View Models
// =============================================================================

/// Product display data for the checkout page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: String,
    /// "per month" / "3 installments", absent for one-time pricing.
    pub billing_note: Option<String>,
}

/// Order bump display data for the checkout page.
#[derive(Debug, Clone, Serialize)]
pub struct UpsellView {
    pub id: UpsellId,
    pub title: String,
    pub description: Option<String>,
    pub price: String,
    /// "$2.99/mo for 12 months" breakdown for bundles.
    pub bundle_note: Option<String>,
}

/// A payment method the customer can actually pick.
#[derive(Debug, Clone, Serialize)]
pub struct MethodView {
    pub method: PaymentMethod,
    pub label: &'static str,
    pub is_default: bool,
}

/// Render-ready checkout page data.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub id: CheckoutId,
    pub title: String,
    pub currency: String,
    pub products: Vec<ProductView>,
    pub upsells: Vec<UpsellView>,
    pub payment_methods: Vec<MethodView>,
    /// True when no stored method survives gateway resolution. The page
    /// must render a blocking "no payment methods available" state, not
    /// an empty method list.
    pub payments_blocked: bool,
    pub collect_phone: bool,
    pub collect_billing_address: bool,
    pub subtotal: String,
    pub country: String,
    /// Present only when the card method is offerable.
    pub card_publishable_key: Option<String>,
}

impl CheckoutView {
    fn assemble(config: &PublicConfig, country: String) -> Self {
        let checkout = &config.checkout;
        let currency = &checkout.currency;

        let offerable = resolve_offerable(&checkout.payment_methods, &config.gateways);
        let payments_blocked = offerable.is_empty();

        let payment_methods = offerable
            .iter()
            .enumerate()
            .map(|(index, method)| MethodView {
                method: *method,
                label: method.label(),
                is_default: index == 0,
            })
            .collect();

        let card_publishable_key = if offerable.contains(&PaymentMethod::Card) {
            config.card_publishable_key.clone()
        } else {
            None
        };

        let merged = checkout.all_upsells();
        let upsells = merged
            .iter()
            .filter(|upsell| upsell.bump.enabled)
            .map(|upsell| upsell_view(upsell, currency))
            .collect();

        let subtotal = pricing::subtotal(
            &checkout.products,
            &merged,
            &UpsellSelection::new(),
            currency,
        );

        Self {
            id: checkout.id.clone(),
            title: checkout.title.clone(),
            currency: currency.as_str().to_string(),
            products: checkout
                .products
                .iter()
                .map(|product| product_view(product, currency))
                .collect(),
            upsells,
            payment_methods,
            payments_blocked,
            collect_phone: checkout.customer_fields.collect_phone,
            collect_billing_address: checkout.customer_fields.collect_billing_address,
            subtotal: format_price(subtotal, currency),
            country,
            card_publishable_key,
        }
    }
}

/// Format an amount for display, e.g. "$49.99" or "35.88 SEK".
fn format_price(amount: Decimal, currency: &CurrencyCode) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    currency.symbol().map_or_else(
        || format!("{rounded} {}", currency.as_str().to_uppercase()),
        |symbol| format!("{symbol}{rounded}"),
    )
}

fn product_view(product: &Product, currency: &CurrencyCode) -> ProductView {
    let billing_note = match product.pricing.active {
        PricingMode::OneTime => None,
        PricingMode::Subscription => {
            Some(format!("per {}", product.pricing.subscription.interval))
        }
        PricingMode::PaymentPlan => Some(format!(
            "{} installments",
            product.pricing.payment_plan.installments
        )),
    };

    ProductView {
        id: product.id.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        image_url: product.image_url.clone(),
        price: format_price(product.effective_price(currency), currency),
        billing_note,
    }
}

fn upsell_view(upsell: &NormalizedUpsell<'_>, currency: &CurrencyCode) -> UpsellView {
    let bump = upsell.bump;
    let bundle_note = match &bump.offer {
        Offer::Flat { .. } => None,
        Offer::MultiMonth {
            monthly_price,
            duration_months,
            ..
        } => Some(format!(
            "{}/mo for {duration_months} months",
            format_price(*monthly_price, currency)
        )),
    };

    UpsellView {
        id: bump.id.clone(),
        title: bump.title.clone(),
        description: bump.description.clone(),
        price: format_price(bump.price(), currency),
        bundle_note,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Client IP forwarded by the edge proxy, if any.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
}

/// Render-ready checkout view.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    Path(checkout_id): Path<CheckoutId>,
    headers: HeaderMap,
) -> Result<Json<CheckoutView>> {
    let config = state.store().get_public_config(&checkout_id).await?;

    // Country detection degrades to the default; it never blocks a render
    let ip = forwarded_ip(&headers);
    let country = state.geo().detect(ip.as_deref()).await;

    Ok(Json(CheckoutView::assemble(&config, country)))
}

/// Pricing preview request: current selection plus an optional coupon.
#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub selected_upsell_ids: Vec<UpsellId>,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// Pricing preview response.
///
/// Coupon rejections ride along as `coupon_error` and never fail the
/// request - a bad code still prices the page.
#[derive(Debug, Serialize, Deserialize)]
pub struct PricingView {
    pub subtotal: String,
    pub discount: String,
    pub total: String,
    pub summary: PricingSummary,
    pub applied_code: Option<String>,
    pub coupon_error: Option<String>,
}

/// Re-price the checkout for the current selection and coupon.
#[instrument(skip(state, request))]
pub async fn price(
    State(state): State<AppState>,
    Path(checkout_id): Path<CheckoutId>,
    Json(request): Json<PriceRequest>,
) -> Result<Json<PricingView>> {
    let config = state.store().get_public_config(&checkout_id).await?;
    let checkout = &config.checkout;

    let selection = UpsellSelection::from_iter(request.selected_upsell_ids);
    let merged = checkout.all_upsells();
    let subtotal = pricing::subtotal(&checkout.products, &merged, &selection, &checkout.currency);

    let (summary, applied_code, coupon_error) = match request.coupon_code.as_deref() {
        None | Some("") => (PricingSummary::of(subtotal), None, None),
        Some(code) => match evaluate_coupon(code, &config.coupons, subtotal, Utc::now()) {
            Ok(applied) => {
                let summary = PricingSummary::with_discount(subtotal, &applied);
                (summary, Some(applied.code), None)
            }
            Err(rejection) => (
                PricingSummary::of(subtotal),
                None,
                Some(rejection.user_message().to_string()),
            ),
        },
    };

    let currency = &checkout.currency;
    Ok(Json(PricingView {
        subtotal: format_price(summary.subtotal, currency),
        discount: format_price(summary.discount, currency),
        total: format_price(summary.total, currency),
        summary,
        applied_code,
        coupon_error,
    }))
}

/// Payment intent request.
#[derive(Debug, Deserialize)]
pub struct PayRequest {
    pub customer_email: String,
    pub customer_name: String,
    #[serde(default)]
    pub selected_upsell_ids: Vec<UpsellId>,
}

/// Create a payment intent for the checkout.
///
/// Only selected upsell ids are forwarded - the processor recomputes the
/// charge amount server-side.
#[instrument(skip(state, request))]
pub async fn pay(
    State(state): State<AppState>,
    Path(checkout_id): Path<CheckoutId>,
    Json(request): Json<PayRequest>,
) -> Result<Json<PaymentIntent>> {
    if !request.customer_email.contains('@') {
        return Err(AppError::BadRequest("Enter a valid email address".to_string()));
    }

    let config = state.store().get_public_config(&checkout_id).await?;
    let offerable = resolve_offerable(&config.checkout.payment_methods, &config.gateways);
    if offerable.is_empty() {
        return Err(AppError::BadRequest(
            "No payment methods are available for this checkout".to_string(),
        ));
    }

    let intent = state
        .processor()
        .create_intent(
            &checkout_id,
            &request.customer_email,
            &request.customer_name,
            &request.selected_upsell_ids,
        )
        .await?;

    Ok(Json(intent))
}

/// Payment confirmation request.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub client_secret: String,
    pub payment_details: serde_json::Value,
}

/// Confirm a payment intent.
///
/// Declines map to 402 with the processor's message and mutate nothing.
/// Settled transactions are verified with the processor before the
/// outcome is returned.
#[instrument(skip(state, request))]
pub async fn confirm(
    State(state): State<AppState>,
    Path(checkout_id): Path<CheckoutId>,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<PaymentOutcome>> {
    let outcome = state
        .processor()
        .confirm(&request.client_secret, &request.payment_details)
        .await?;

    state.processor().verify(&outcome.transaction_id).await?;

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use launchpay_core::{
        CheckoutPage, GatewayFlags, OrderBump, TenantId,
    };

    fn fixture() -> PublicConfig {
        let mut checkout = CheckoutPage::draft(
            TenantId::new("tnt_demo"),
            "Spring launch",
            "spring",
            Utc::now(),
        );
        checkout.title = "Spring Course".to_string();
        checkout.products = vec![Product::one_time(
            "Course",
            CurrencyCode::usd(),
            Decimal::new(49_99, 2),
        )];
        checkout.payment_methods = vec![PaymentMethod::Card, PaymentMethod::Crypto];
        checkout.upsells = vec![OrderBump::multi_month(
            "Coaching",
            Decimal::new(2_99, 2),
            12,
        )];

        PublicConfig {
            checkout,
            gateways: GatewayFlags::all_enabled(),
            coupons: Vec::new(),
            card_publishable_key: Some("pk_live_x1y2z3".to_string()),
        }
    }

    #[test]
    fn test_format_price_known_symbol() {
        assert_eq!(
            format_price(Decimal::new(49_99, 2), &CurrencyCode::usd()),
            "$49.99"
        );
    }

    #[test]
    fn test_format_price_pads_cents() {
        assert_eq!(
            format_price(Decimal::new(499, 1), &CurrencyCode::usd()),
            "$49.90"
        );
    }

    #[test]
    fn test_format_price_unknown_currency_uses_code() {
        assert_eq!(
            format_price(Decimal::new(35_88, 2), &CurrencyCode::new("sek")),
            "35.88 SEK"
        );
    }

    #[test]
    fn test_assemble_marks_first_offerable_as_default() {
        let view = CheckoutView::assemble(&fixture(), "US".to_string());
        assert!(!view.payments_blocked);
        assert_eq!(view.payment_methods.len(), 2);
        assert!(view.payment_methods[0].is_default);
        assert_eq!(view.payment_methods[0].method, PaymentMethod::Card);
        assert!(!view.payment_methods[1].is_default);
    }

    #[test]
    fn test_assemble_blocks_when_no_gateway_enabled() {
        let mut config = fixture();
        config.gateways = GatewayFlags::default();

        let view = CheckoutView::assemble(&config, "US".to_string());
        assert!(view.payments_blocked);
        assert!(view.payment_methods.is_empty());
        // Without the card method there is nothing for the widget to do
        assert!(view.card_publishable_key.is_none());
    }

    #[test]
    fn test_assemble_resolution_respects_gateway_subset() {
        let mut config = fixture();
        config.gateways = GatewayFlags {
            crypto: true,
            ..GatewayFlags::default()
        };

        let view = CheckoutView::assemble(&config, "US".to_string());
        assert_eq!(view.payment_methods.len(), 1);
        assert_eq!(view.payment_methods[0].method, PaymentMethod::Crypto);
        assert!(view.card_publishable_key.is_none());
    }

    #[test]
    fn test_assemble_excludes_disabled_upsells() {
        let mut config = fixture();
        config.checkout.upsells[0].enabled = false;

        let view = CheckoutView::assemble(&config, "US".to_string());
        assert!(view.upsells.is_empty());
    }

    #[test]
    fn test_assemble_bundle_note() {
        let view = CheckoutView::assemble(&fixture(), "US".to_string());
        assert_eq!(view.upsells[0].price, "$35.88");
        assert_eq!(
            view.upsells[0].bundle_note.as_deref(),
            Some("$2.99/mo for 12 months")
        );
    }

    #[test]
    fn test_assemble_subtotal_excludes_unselected_upsells() {
        let view = CheckoutView::assemble(&fixture(), "US".to_string());
        assert_eq!(view.subtotal, "$49.99");
    }
}
