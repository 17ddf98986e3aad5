//! Coupon catalog route handlers.
//!
//! The builder creates and retires codes; it never touches `used_count`.
//! That counter belongs to the payment pipeline and moves only on
//! confirmed purchases.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use launchpay_core::{Coupon, CouponId, CouponStatus, CouponValue, TenantId, normalize_code};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Coupon create/update form data.
#[derive(Debug, Deserialize)]
pub struct CouponRequest {
    pub code: String,
    pub value: CouponValue,
    #[serde(default)]
    pub status: Option<CouponStatus>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// The catalog after a mutation.
#[derive(Debug, Serialize)]
pub struct CouponsResponse {
    pub coupons: Vec<Coupon>,
    pub offline: bool,
}

fn validate(request: &CouponRequest) -> Result<()> {
    if request.code.trim().is_empty() {
        return Err(AppError::BadRequest("Enter a coupon code".to_string()));
    }
    match request.value {
        CouponValue::Percentage(percent) => {
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                return Err(AppError::BadRequest(
                    "Percentage must be between 0 and 100".to_string(),
                ));
            }
        }
        CouponValue::Fixed(amount) => {
            if amount < Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "Fixed discounts cannot be negative".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// List a tenant's coupon catalog.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> Result<Json<Vec<Coupon>>> {
    Ok(Json(state.store().load_coupons(&tenant_id).await?))
}

/// Create a coupon.
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(request): Json<CouponRequest>,
) -> Result<Json<CouponsResponse>> {
    validate(&request)?;

    let mut coupons = state.store().load_coupons(&tenant_id).await?;

    let normalized = normalize_code(&request.code);
    if coupons
        .iter()
        .any(|coupon| coupon.normalized_code() == normalized)
    {
        return Err(AppError::BadRequest(
            "A coupon with this code already exists".to_string(),
        ));
    }

    let mut coupon = Coupon::new(request.code.trim(), request.value, Utc::now());
    coupon.status = request.status.unwrap_or_default();
    coupon.usage_limit = request.usage_limit;
    coupon.expires_at = request.expires_at;
    coupons.push(coupon);

    state.store().save_coupons(&tenant_id, &coupons).await?;

    Ok(Json(CouponsResponse {
        coupons,
        offline: state.store().is_offline(),
    }))
}

/// Update a coupon in place.
///
/// `used_count` is deliberately not accepted from the client.
#[instrument(skip(state, request))]
pub async fn update(
    State(state): State<AppState>,
    Path((tenant_id, coupon_id)): Path<(TenantId, CouponId)>,
    Json(request): Json<CouponRequest>,
) -> Result<Json<CouponsResponse>> {
    validate(&request)?;

    let mut coupons = state.store().load_coupons(&tenant_id).await?;

    let normalized = normalize_code(&request.code);
    if coupons
        .iter()
        .any(|coupon| coupon.id != coupon_id && coupon.normalized_code() == normalized)
    {
        return Err(AppError::BadRequest(
            "A coupon with this code already exists".to_string(),
        ));
    }

    let Some(coupon) = coupons.iter_mut().find(|coupon| coupon.id == coupon_id) else {
        return Err(AppError::NotFound(coupon_id.as_str().to_string()));
    };

    coupon.code = request.code.trim().to_string();
    coupon.value = request.value;
    if let Some(status) = request.status {
        coupon.status = status;
    }
    coupon.usage_limit = request.usage_limit;
    coupon.expires_at = request.expires_at;

    state.store().save_coupons(&tenant_id, &coupons).await?;

    Ok(Json(CouponsResponse {
        coupons,
        offline: state.store().is_offline(),
    }))
}

/// Delete a coupon from the catalog.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path((tenant_id, coupon_id)): Path<(TenantId, CouponId)>,
) -> Result<Json<CouponsResponse>> {
    let mut coupons = state.store().load_coupons(&tenant_id).await?;
    let before = coupons.len();
    coupons.retain(|coupon| coupon.id != coupon_id);

    if coupons.len() == before {
        return Err(AppError::NotFound(coupon_id.as_str().to_string()));
    }

    state.store().save_coupons(&tenant_id, &coupons).await?;

    Ok(Json(CouponsResponse {
        coupons,
        offline: state.store().is_offline(),
    }))
}
