//! Coupon evaluation.
//!
//! Evaluation is stateless and re-run on every apply attempt; eligibility
//! is never cached. Incrementing `used_count` is tied to confirmed payment
//! and happens outside this crate - applying or removing a coupon at
//! checkout mutates nothing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Coupon, CouponStatus, CouponValue, normalize_code};

/// Why a coupon attempt was rejected.
///
/// `Expired` and `Exhausted` stay distinct so merchant analytics can tell
/// them apart, but customers see the same message for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponRejection {
    /// No active coupon matches the entered code.
    #[error("invalid coupon code")]
    InvalidCode,
    /// The coupon's expiry date has passed.
    #[error("coupon expired")]
    Expired,
    /// The usage cap has been reached.
    #[error("coupon usage limit reached")]
    Exhausted,
}

impl CouponRejection {
    /// Customer-facing message, shown next to the coupon input.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::InvalidCode => "That coupon code isn't valid",
            Self::Expired | Self::Exhausted => "That coupon has expired",
        }
    }
}

/// A successfully applied discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// The coupon code as stored (not the customer's casing).
    pub code: String,
    /// Discount amount, already clamped to the subtotal.
    pub amount: Decimal,
}

/// Evaluate `entered` against the catalog for a checkout at `subtotal`.
///
/// 1. Normalize the entered code and match against active coupons only.
/// 2. Reject exhausted usage caps, then passed expiry dates.
/// 3. Percentage values take `value`% of the subtotal; fixed values apply
///    verbatim. Either way the result is clamped to `[0, subtotal]` so the
///    total can never go negative.
///
/// # Errors
///
/// Returns the typed rejection; callers surface `user_message()` inline
/// next to the coupon input. Rejections never block checkout.
pub fn evaluate_coupon(
    entered: &str,
    catalog: &[Coupon],
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Result<AppliedDiscount, CouponRejection> {
    let needle = normalize_code(entered);
    let coupon = catalog
        .iter()
        .find(|coupon| {
            coupon.status == CouponStatus::Active && coupon.normalized_code() == needle
        })
        .ok_or(CouponRejection::InvalidCode)?;

    if coupon.is_exhausted() {
        return Err(CouponRejection::Exhausted);
    }
    if coupon.is_expired_at(now) {
        return Err(CouponRejection::Expired);
    }

    let raw = match coupon.value {
        CouponValue::Percentage(percent) => subtotal * percent / Decimal::ONE_HUNDRED,
        CouponValue::Fixed(amount) => amount,
    };

    Ok(AppliedDiscount {
        code: coupon.code.clone(),
        amount: raw.min(subtotal).max(Decimal::ZERO),
    })
}
