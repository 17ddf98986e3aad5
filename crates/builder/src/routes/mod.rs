//! HTTP route handlers for the builder API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                    - Liveness check
//! GET  /health/ready                              - Readiness check
//!
//! # Checkouts
//! GET    /tenants/{tenant_id}/checkouts           - List checkouts
//! POST   /tenants/{tenant_id}/checkouts           - Create a draft
//! GET    /tenants/{tenant_id}/checkouts/{id}      - Fetch one checkout
//! DELETE /tenants/{tenant_id}/checkouts/{id}      - Hard delete
//!
//! # Wizard
//! POST /tenants/{tenant_id}/checkouts/{id}/wizard - Save-on-next + advance
//!
//! # Payment methods
//! POST   /tenants/{tenant_id}/checkouts/{id}/methods                - Add
//! DELETE /tenants/{tenant_id}/checkouts/{id}/methods/{method}       - Remove
//! POST   /tenants/{tenant_id}/checkouts/{id}/methods/{method}/move  - Reorder
//!
//! # Coupons
//! GET    /tenants/{tenant_id}/coupons             - List catalog
//! POST   /tenants/{tenant_id}/coupons             - Create
//! PUT    /tenants/{tenant_id}/coupons/{coupon_id} - Update
//! DELETE /tenants/{tenant_id}/coupons/{coupon_id} - Delete
//!
//! # Settings
//! GET /tenants/{tenant_id}/settings               - Fetch (secrets masked)
//! PUT /tenants/{tenant_id}/settings               - Replace
//! ```
//!
//! Every mutation response carries an `offline` flag so the dashboard can
//! show its persistent offline indicator without treating it as an error.

pub mod checkouts;
pub mod coupons;
pub mod methods;
pub mod settings;
pub mod wizard;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the checkout management routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants/{tenant_id}/checkouts",
            get(checkouts::list).post(checkouts::create),
        )
        .route(
            "/tenants/{tenant_id}/checkouts/{checkout_id}",
            get(checkouts::show).delete(checkouts::destroy),
        )
        .route(
            "/tenants/{tenant_id}/checkouts/{checkout_id}/wizard",
            post(wizard::advance),
        )
        .route(
            "/tenants/{tenant_id}/checkouts/{checkout_id}/methods",
            post(methods::add),
        )
        .route(
            "/tenants/{tenant_id}/checkouts/{checkout_id}/methods/{method}",
            delete(methods::remove),
        )
        .route(
            "/tenants/{tenant_id}/checkouts/{checkout_id}/methods/{method}/move",
            post(methods::reorder),
        )
}

/// Create the coupon catalog routes router.
pub fn coupon_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants/{tenant_id}/coupons",
            get(coupons::list).post(coupons::create),
        )
        .route(
            "/tenants/{tenant_id}/coupons/{coupon_id}",
            axum::routing::put(coupons::update).delete(coupons::destroy),
        )
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/tenants/{tenant_id}/settings",
        get(settings::show).put(settings::update),
    )
}

/// All builder routes merged.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(checkout_routes())
        .merge(coupon_routes())
        .merge(settings_routes())
}
