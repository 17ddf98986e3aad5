//! Payment method management route handlers.
//!
//! Adding is filtered by the tenant's global gateway enablement; removal
//! and reordering are not. Disabling a gateway globally after the fact
//! never mutates a checkout's stored list - it only shrinks what the
//! renderer resolves.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use launchpay_core::{
    CheckoutId, GatewayFlags, PaymentMethod, TenantId,
    payments::{self, MoveDirection},
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Add method form data.
#[derive(Debug, Deserialize)]
pub struct AddMethodRequest {
    pub method: PaymentMethod,
}

/// Reorder form data.
#[derive(Debug, Deserialize)]
pub struct MoveMethodRequest {
    pub direction: MoveDirection,
}

/// The checkout's stored method list after a mutation.
#[derive(Debug, Serialize)]
pub struct MethodsResponse {
    pub payment_methods: Vec<PaymentMethod>,
    pub changed: bool,
    pub offline: bool,
}

async fn tenant_flags(state: &AppState, tenant_id: &TenantId) -> Result<GatewayFlags> {
    Ok(state
        .store()
        .load_settings(tenant_id)
        .await?
        .map(|settings| settings.flags())
        .unwrap_or_default())
}

/// Add a payment method to a checkout.
#[instrument(skip(state, request))]
pub async fn add(
    State(state): State<AppState>,
    Path((tenant_id, checkout_id)): Path<(TenantId, CheckoutId)>,
    Json(request): Json<AddMethodRequest>,
) -> Result<Json<MethodsResponse>> {
    let flags = tenant_flags(&state, &tenant_id).await?;

    let mut checkouts = state.store().load_checkouts(&tenant_id).await?;
    let Some(checkout) = checkouts
        .iter_mut()
        .find(|checkout| checkout.id == checkout_id)
    else {
        return Err(AppError::NotFound(checkout_id.as_str().to_string()));
    };

    payments::add_method(&mut checkout.payment_methods, request.method, &flags)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    checkout.updated_at = Utc::now();
    let methods = checkout.payment_methods.clone();

    state.store().save_checkouts(&tenant_id, &checkouts).await?;

    Ok(Json(MethodsResponse {
        payment_methods: methods,
        changed: true,
        offline: state.store().is_offline(),
    }))
}

/// Remove a payment method from a checkout.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path((tenant_id, checkout_id, method)): Path<(TenantId, CheckoutId, PaymentMethod)>,
) -> Result<Json<MethodsResponse>> {
    let mut checkouts = state.store().load_checkouts(&tenant_id).await?;
    let Some(checkout) = checkouts
        .iter_mut()
        .find(|checkout| checkout.id == checkout_id)
    else {
        return Err(AppError::NotFound(checkout_id.as_str().to_string()));
    };

    let changed = payments::remove_method(&mut checkout.payment_methods, method);
    let methods = checkout.payment_methods.clone();
    if changed {
        checkout.updated_at = Utc::now();
        state.store().save_checkouts(&tenant_id, &checkouts).await?;
    }

    Ok(Json(MethodsResponse {
        payment_methods: methods,
        changed,
        offline: state.store().is_offline(),
    }))
}

/// Swap a payment method with its adjacent neighbor.
#[instrument(skip(state, request))]
pub async fn reorder(
    State(state): State<AppState>,
    Path((tenant_id, checkout_id, method)): Path<(TenantId, CheckoutId, PaymentMethod)>,
    Json(request): Json<MoveMethodRequest>,
) -> Result<Json<MethodsResponse>> {
    let mut checkouts = state.store().load_checkouts(&tenant_id).await?;
    let Some(checkout) = checkouts
        .iter_mut()
        .find(|checkout| checkout.id == checkout_id)
    else {
        return Err(AppError::NotFound(checkout_id.as_str().to_string()));
    };

    let changed =
        payments::move_method(&mut checkout.payment_methods, method, request.direction);
    let methods = checkout.payment_methods.clone();
    if changed {
        checkout.updated_at = Utc::now();
        state.store().save_checkouts(&tenant_id, &checkouts).await?;
    }

    Ok(Json(MethodsResponse {
        payment_methods: methods,
        changed,
        offline: state.store().is_offline(),
    }))
}
