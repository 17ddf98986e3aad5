//! Core types for LaunchPay.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod checkout;
pub mod coupon;
pub mod currency;
pub mod id;
pub mod payment;
pub mod product;
pub mod settings;
pub mod upsell;

pub use checkout::{CheckoutPage, CheckoutStatus, CustomerFields, ThankYouPage};
pub use coupon::{Coupon, CouponStatus, CouponValue, normalize_code};
pub use currency::{CurrencyCode, PriceTable};
pub use id::*;
pub use payment::PaymentMethod;
pub use product::{BillingInterval, PricingMode, PricingOptions, Product};
pub use settings::{
    BankTransferGateway, CardGateway, CryptoGateway, CryptoWallet, GatewayFlags, ManualGateway,
    StoreSettings,
};
pub use upsell::{NormalizedUpsell, Offer, OrderBump, UpsellOrigin, normalize_upsells};
