//! Seed a tenant with sample data.
//!
//! Writes a settings singleton, a small coupon catalog, and one draft
//! checkout straight through the remote store client. Seeding requires
//! the store to be reachable - there is no offline fallback here.

use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::info;
use url::Url;

use launchpay_builder::config::StoreApiConfig;
use launchpay_builder::store::{StoreClient, checkouts_key, coupons_key, settings_key};
use launchpay_core::{
    CheckoutPage, Coupon, CouponValue, CurrencyCode, OrderBump, PaymentMethod, Product,
    StoreSettings, TenantId,
};

/// Seed sample data under `tenant`.
///
/// # Errors
///
/// Returns an error if environment variables are missing or the store is
/// unreachable.
pub async fn sample_data(tenant: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let base_url = std::env::var("STORE_API_URL").map_err(|_| "STORE_API_URL not set")?;
    let token = std::env::var("STORE_API_TOKEN")
        .map(SecretString::from)
        .map_err(|_| "STORE_API_TOKEN not set")?;

    let client = StoreClient::new(&StoreApiConfig {
        base_url: Url::parse(&base_url)?,
        token,
    });

    let tenant = TenantId::new(tenant);
    info!(tenant = %tenant, "Seeding sample data");

    // Settings: card and bank transfer on, the rest off
    let mut settings = StoreSettings::new(tenant.clone());
    settings.card.enabled = true;
    settings.card.publishable_key = "pk_test_51demo".to_string();
    settings.bank_transfer.enabled = true;
    settings.bank_transfer.instructions =
        "Wire to IBAN DE02 1203 0000 0000 2020 51 and reference your order id.".to_string();
    client.put(&settings_key(&tenant), &settings).await?;
    info!("Settings written");

    // Coupons: one capped percentage code, one small fixed code
    let mut launch = Coupon::new(
        "LAUNCH20",
        CouponValue::Percentage(Decimal::from(20)),
        Utc::now(),
    );
    launch.usage_limit = Some(100);
    let welcome = Coupon::new(
        "WELCOME5",
        CouponValue::Fixed(Decimal::new(5_00, 2)),
        Utc::now(),
    );
    let coupons = vec![launch, welcome];
    client.put(&coupons_key(&tenant), &coupons).await?;
    info!(count = coupons.len(), "Coupons written");

    // One draft checkout with a product and a multi-month bump
    let mut checkout = CheckoutPage::draft(tenant.clone(), "Demo checkout", "demo", Utc::now());
    checkout.title = "LaunchPay Demo Course".to_string();
    checkout.products = vec![Product::one_time(
        "Demo Course",
        CurrencyCode::usd(),
        Decimal::new(49_99, 2),
    )];
    checkout.upsells = vec![OrderBump::multi_month(
        "Monthly coaching add-on",
        Decimal::new(2_99, 2),
        12,
    )];
    checkout.payment_methods = vec![PaymentMethod::Card, PaymentMethod::BankTransfer];

    let checkouts = vec![checkout];
    client.put(&checkouts_key(&tenant), &checkouts).await?;
    info!("Draft checkout written");

    info!("Seeding complete!");
    Ok(())
}
