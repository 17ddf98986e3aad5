//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return
//! `Result<T, AppError>`.
//!
//! Pricing, discount, and method resolution never surface here - they are
//! total functions in `launchpay-core` and degrade to safe values instead
//! of erroring. What remains is upstream connectivity (store, processor),
//! bad client input, and declined payments.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::processor::ProcessorError;
use crate::store::StoreError;

/// Application-level error type for the checkout renderer.
#[derive(Debug, Error)]
pub enum AppError {
    /// External store fetch failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Payment processor operation failed.
    #[error("Processor error: {0}")]
    Processor(#[from] ProcessorError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Store(_) | Self::Internal(_) | Self::Processor(ProcessorError::Http(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            // A decline is the customer's problem to fix, not an outage
            Self::Processor(ProcessorError::Declined(_)) => StatusCode::PAYMENT_REQUIRED,
            Self::Processor(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(StoreError::NotFound(id)) => format!("Checkout not found: {id}"),
            Self::Store(_) => "External service error".to_string(),
            // Declines surface the processor's message verbatim
            Self::Processor(ProcessorError::Declined(reason)) => reason.clone(),
            Self::Processor(_) => "Payment service error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("chk_123".to_string());
        assert_eq!(err.to_string(), "Not found: chk_123");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Processor(ProcessorError::Declined(
                "Card declined".to_string()
            ))),
            StatusCode::PAYMENT_REQUIRED
        );
    }

    #[test]
    fn test_declined_payment_keeps_processor_message() {
        let err = AppError::Processor(ProcessorError::Declined(
            "Insufficient funds".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_missing_checkout_maps_to_404() {
        let err = AppError::Store(StoreError::NotFound("chk_missing".to_string()));
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);
    }
}
