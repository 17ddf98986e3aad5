//! Checkout CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use launchpay_core::{CheckoutId, CheckoutPage, CheckoutStatus, TenantId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create checkout form data.
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    pub internal_name: String,
}

/// Checkout list row for the dashboard.
#[derive(Debug, Serialize)]
pub struct CheckoutSummary {
    pub id: CheckoutId,
    pub internal_name: String,
    pub status: CheckoutStatus,
    pub product_count: usize,
    pub updated_at: DateTime<Utc>,
    /// Only present once published.
    pub share_url: Option<String>,
}

/// A single checkout with the session offline flag.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout: CheckoutPage,
    pub offline: bool,
}

/// Deletion acknowledgement.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub offline: bool,
}

/// Generate a short random slug for share links.
fn generate_slug() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(10)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// List a tenant's checkouts.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> Result<Json<Vec<CheckoutSummary>>> {
    let checkouts = state.store().load_checkouts(&tenant_id).await?;

    let summaries = checkouts
        .iter()
        .map(|checkout| CheckoutSummary {
            id: checkout.id.clone(),
            internal_name: checkout.internal_name.clone(),
            status: checkout.status,
            product_count: checkout.products.len(),
            updated_at: checkout.updated_at,
            share_url: checkout
                .is_published()
                .then(|| state.config().share_url(&checkout.id)),
        })
        .collect();

    Ok(Json(summaries))
}

/// Create a new draft checkout.
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    if request.internal_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Give this checkout an internal name".to_string(),
        ));
    }

    let mut checkouts = state.store().load_checkouts(&tenant_id).await?;
    let checkout = CheckoutPage::draft(
        tenant_id.clone(),
        request.internal_name.trim(),
        generate_slug(),
        Utc::now(),
    );
    checkouts.push(checkout.clone());
    state.store().save_checkouts(&tenant_id, &checkouts).await?;

    Ok(Json(CheckoutResponse {
        checkout,
        offline: state.store().is_offline(),
    }))
}

/// Fetch one checkout.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((tenant_id, checkout_id)): Path<(TenantId, CheckoutId)>,
) -> Result<Json<CheckoutPage>> {
    let checkouts = state.store().load_checkouts(&tenant_id).await?;

    checkouts
        .into_iter()
        .find(|checkout| checkout.id == checkout_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(checkout_id.as_str().to_string()))
}

/// Hard-delete a checkout from the tenant's collection.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path((tenant_id, checkout_id)): Path<(TenantId, CheckoutId)>,
) -> Result<Json<DeleteResponse>> {
    let mut checkouts = state.store().load_checkouts(&tenant_id).await?;
    let before = checkouts.len();
    checkouts.retain(|checkout| checkout.id != checkout_id);

    if checkouts.len() == before {
        return Err(AppError::NotFound(checkout_id.as_str().to_string()));
    }

    state.store().save_checkouts(&tenant_id, &checkouts).await?;

    Ok(Json(DeleteResponse {
        deleted: true,
        offline: state.store().is_offline(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug_shape() {
        let slug = generate_slug();
        assert_eq!(slug.len(), 10);
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generated_slugs_differ() {
        assert_ne!(generate_slug(), generate_slug());
    }
}
