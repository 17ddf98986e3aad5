//! Coupons (discount codes).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::CouponId;

/// Coupon lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    #[default]
    Active,
    Expired,
    Disabled,
}

impl std::fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// What a coupon is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CouponValue {
    /// Percentage off the subtotal, 0-100.
    Percentage(Decimal),
    /// Fixed amount off, in the checkout currency.
    Fixed(Decimal),
}

/// A merchant-created discount code.
///
/// Codes are unique per tenant and matched case-insensitively. Eligibility
/// is re-checked on every apply attempt, never cached. `used_count` is
/// incremented externally on confirmed purchase only - applying a coupon
/// at checkout does not consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub value: CouponValue,
    #[serde(default)]
    pub status: CouponStatus,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// Create an active coupon with no usage or calendar limits.
    #[must_use]
    pub fn new(code: impl Into<String>, value: CouponValue, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CouponId::generate(),
            code: code.into(),
            value,
            status: CouponStatus::Active,
            usage_limit: None,
            used_count: 0,
            expires_at: None,
            created_at,
        }
    }

    /// The code as matched: trimmed and lowercased.
    #[must_use]
    pub fn normalized_code(&self) -> String {
        normalize_code(&self.code)
    }

    /// Whether the usage cap has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.used_count >= limit)
    }

    /// Whether the calendar expiry has passed as of `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry < now)
    }
}

/// Normalize a user-entered code for matching.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  SAVE20 "), "save20");
    }

    #[test]
    fn test_exhausted_at_cap() {
        let mut coupon = Coupon::new(
            "save20",
            CouponValue::Percentage(Decimal::from(20)),
            Utc::now(),
        );
        assert!(!coupon.is_exhausted());

        coupon.usage_limit = Some(3);
        coupon.used_count = 2;
        assert!(!coupon.is_exhausted());

        coupon.used_count = 3;
        assert!(coupon.is_exhausted());
    }

    #[test]
    fn test_expiry_comparison() {
        let now = Utc::now();
        let mut coupon = Coupon::new("launch", CouponValue::Fixed(Decimal::from(5)), now);
        assert!(!coupon.is_expired_at(now));

        coupon.expires_at = Some(now - chrono::Duration::hours(1));
        assert!(coupon.is_expired_at(now));

        coupon.expires_at = Some(now + chrono::Duration::hours(1));
        assert!(!coupon.is_expired_at(now));
    }
}
