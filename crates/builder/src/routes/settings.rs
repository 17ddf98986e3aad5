//! Store settings route handlers.
//!
//! The settings singleton carries gateway credentials, so responses never
//! echo the card secret key - the dashboard only learns whether one is
//! set. An empty secret on update means "keep the existing key".

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use launchpay_core::{
    BankTransferGateway, CryptoGateway, ManualGateway, StoreSettings, TenantId,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Card gateway view with the secret key masked.
#[derive(Debug, Serialize)]
pub struct CardGatewayView {
    pub enabled: bool,
    pub publishable_key: String,
    /// Whether a secret key is configured; the key itself never leaves
    /// the server.
    pub secret_key_set: bool,
}

/// Settings response with credentials masked.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub tenant_id: TenantId,
    pub card: CardGatewayView,
    pub bank_transfer: BankTransferGateway,
    pub crypto: CryptoGateway,
    pub manual: ManualGateway,
    pub offline: bool,
}

impl SettingsView {
    fn from_settings(settings: StoreSettings, offline: bool) -> Self {
        Self {
            tenant_id: settings.tenant_id,
            card: CardGatewayView {
                enabled: settings.card.enabled,
                publishable_key: settings.card.publishable_key,
                secret_key_set: !settings.card.secret_key.is_empty(),
            },
            bank_transfer: settings.bank_transfer,
            crypto: settings.crypto,
            manual: settings.manual,
            offline,
        }
    }
}

/// Fetch the tenant settings singleton (all gateways disabled if never
/// saved).
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> Result<Json<SettingsView>> {
    let settings = state
        .store()
        .load_settings(&tenant_id)
        .await?
        .unwrap_or_else(|| StoreSettings::new(tenant_id.clone()));

    Ok(Json(SettingsView::from_settings(
        settings,
        state.store().is_offline(),
    )))
}

/// Replace the tenant settings singleton.
#[instrument(skip(state, incoming))]
pub async fn update(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(mut incoming): Json<StoreSettings>,
) -> Result<Json<SettingsView>> {
    if incoming.tenant_id != tenant_id {
        return Err(AppError::BadRequest(
            "Tenant id in the payload does not match the URL".to_string(),
        ));
    }

    // An empty secret key means "keep the one already stored"
    if incoming.card.secret_key.is_empty()
        && let Some(existing) = state.store().load_settings(&tenant_id).await?
    {
        incoming.card.secret_key = existing.card.secret_key;
    }

    state.store().save_settings(&tenant_id, &incoming).await?;

    Ok(Json(SettingsView::from_settings(
        incoming,
        state.store().is_offline(),
    )))
}
