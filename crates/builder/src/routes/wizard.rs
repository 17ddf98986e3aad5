//! Publish wizard route handler.
//!
//! The builder UI posts the edited draft together with the current step
//! and the requested action. Persisting happens BEFORE validation - a
//! step transition is always also a save, even when the transition ends
//! up blocked.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use launchpay_core::{
    CheckoutId, CheckoutPage, CheckoutStatus, TenantId,
    wizard::{self, Transition, WizardAction, WizardStep},
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Wizard transition request: the edited draft plus the intent.
#[derive(Debug, Deserialize)]
pub struct WizardRequest {
    pub step: WizardStep,
    pub action: WizardAction,
    pub checkout: CheckoutPage,
}

/// Wizard transition response.
#[derive(Debug, Serialize)]
pub struct WizardResponse {
    /// Step the wizard is now on (the offending step when blocked).
    pub step: WizardStep,
    pub published: bool,
    /// Single human-readable message when the transition was blocked.
    pub error: Option<String>,
    /// Valid once published.
    pub share_url: Option<String>,
    pub offline: bool,
}

/// Save the draft, then run the publish gate transition.
#[instrument(skip(state, request))]
pub async fn advance(
    State(state): State<AppState>,
    Path((tenant_id, checkout_id)): Path<(TenantId, CheckoutId)>,
    Json(request): Json<WizardRequest>,
) -> Result<Json<WizardResponse>> {
    if request.checkout.id != checkout_id {
        return Err(AppError::BadRequest(
            "Checkout id in the payload does not match the URL".to_string(),
        ));
    }

    let mut checkouts = state.store().load_checkouts(&tenant_id).await?;
    let Some(slot) = checkouts
        .iter_mut()
        .find(|checkout| checkout.id == checkout_id)
    else {
        return Err(AppError::NotFound(checkout_id.as_str().to_string()));
    };

    // Save-on-next: the edited draft replaces the stored copy
    // unconditionally, before any validation runs. Last write wins.
    let mut draft = request.checkout;
    draft.tenant_id = tenant_id.clone();
    draft.status = slot.status;
    draft.updated_at = Utc::now();
    *slot = draft.clone();
    state.store().save_checkouts(&tenant_id, &checkouts).await?;

    let offline = state.store().is_offline();

    match wizard::advance(request.step, request.action, &draft) {
        Ok(Transition::Moved(step)) => Ok(Json(WizardResponse {
            step,
            published: false,
            error: None,
            share_url: None,
            offline,
        })),
        Ok(Transition::Published) => {
            // Validation passed: flip to active and persist again
            let mut checkouts = state.store().load_checkouts(&tenant_id).await?;
            if let Some(slot) = checkouts
                .iter_mut()
                .find(|checkout| checkout.id == checkout_id)
            {
                slot.status = CheckoutStatus::Active;
                slot.updated_at = Utc::now();
            }
            state.store().save_checkouts(&tenant_id, &checkouts).await?;

            Ok(Json(WizardResponse {
                step: WizardStep::ThankYou,
                published: true,
                error: None,
                share_url: Some(state.config().share_url(&checkout_id)),
                offline: state.store().is_offline(),
            }))
        }
        Err(blocked) => Ok(Json(WizardResponse {
            step: blocked.step,
            published: false,
            error: Some(blocked.message),
            share_url: None,
            offline,
        })),
    }
}
