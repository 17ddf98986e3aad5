//! HTTP route handlers for the public checkout renderer.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the store API)
//!
//! # Checkout
//! GET  /c/{checkout_id}         - Render-ready checkout view
//! POST /c/{checkout_id}/price   - Pricing preview (upsell selection + coupon)
//! POST /c/{checkout_id}/pay     - Create a payment intent
//! POST /c/{checkout_id}/confirm - Confirm a payment intent
//! ```

pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the public checkout routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/c/{checkout_id}", get(checkout::show))
        .route("/c/{checkout_id}/price", post(checkout::price))
        .route("/c/{checkout_id}/pay", post(checkout::pay))
        .route("/c/{checkout_id}/confirm", post(checkout::confirm))
}
