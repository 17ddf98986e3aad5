//! Payment processor client.
//!
//! Thin REST client for the hosted card processor. The renderer only ever
//! sends *selected upsell ids*, never computed totals - the processor is
//! the source of truth for the final charged amount server-side. A decline
//! is terminal for the attempt and mutates no local state.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use launchpay_core::{CheckoutId, UpsellId};

use crate::config::ProcessorConfig;

/// Errors that can occur when talking to the payment processor.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The processor declined the payment; the message is customer-safe.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// Processor API returned a non-success status.
    #[error("Processor API returned status {0}")]
    Status(u16),
}

/// Outcome status of a confirmed payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Succeeded,
    Declined,
    Pending,
}

/// A created payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// The result of confirming a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub status: PaymentStatus,
    pub transaction_id: String,
    /// Processor-supplied message, present on declines.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
struct CreateIntentBody<'a> {
    checkout_id: &'a CheckoutId,
    customer_email: &'a str,
    customer_name: &'a str,
    selected_upsell_ids: &'a [UpsellId],
}

#[derive(Serialize)]
struct ConfirmBody<'a> {
    client_secret: &'a str,
    payment_details: &'a serde_json::Value,
}

/// Client for the hosted payment processor API.
#[derive(Clone)]
pub struct ProcessorClient {
    inner: Arc<ProcessorClientInner>,
}

struct ProcessorClientInner {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl ProcessorClient {
    /// Create a new processor client.
    #[must_use]
    pub fn new(config: &ProcessorConfig) -> Self {
        Self {
            inner: Arc::new(ProcessorClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                secret_key: config.secret_key.expose_secret().to_string(),
            }),
        }
    }

    /// Create a payment intent for a checkout.
    ///
    /// The processor recomputes the charge amount server-side from the
    /// checkout id and the selected upsell ids.
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError` on connectivity or decode failures.
    #[instrument(skip(self, customer_email, customer_name))]
    pub async fn create_intent(
        &self,
        checkout_id: &CheckoutId,
        customer_email: &str,
        customer_name: &str,
        selected_upsell_ids: &[UpsellId],
    ) -> Result<PaymentIntent, ProcessorError> {
        let body = CreateIntentBody {
            checkout_id,
            customer_email,
            customer_name,
            selected_upsell_ids,
        };
        self.post_json("/v1/intents", &body).await
    }

    /// Confirm a payment intent with the customer's payment details.
    ///
    /// A declined outcome is returned as `ProcessorError::Declined` with
    /// the processor's message.
    ///
    /// # Errors
    ///
    /// Returns `Declined` for declined payments, other variants for
    /// connectivity or decode failures.
    #[instrument(skip(self, client_secret, payment_details))]
    pub async fn confirm(
        &self,
        client_secret: &str,
        payment_details: &serde_json::Value,
    ) -> Result<PaymentOutcome, ProcessorError> {
        let body = ConfirmBody {
            client_secret,
            payment_details,
        };
        let outcome: PaymentOutcome = self.post_json("/v1/intents/confirm", &body).await?;

        if outcome.status == PaymentStatus::Declined {
            let reason = outcome
                .message
                .unwrap_or_else(|| "Your payment was declined".to_string());
            return Err(ProcessorError::Declined(reason));
        }

        Ok(outcome)
    }

    /// Verify a settled transaction.
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError::Status` if the processor does not
    /// acknowledge the transaction.
    #[instrument(skip(self))]
    pub async fn verify(&self, transaction_id: &str) -> Result<(), ProcessorError> {
        let url = format!("{}/v1/transactions/{transaction_id}/verify", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.secret_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProcessorError::Status(status.as_u16()))
        }
    }

    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ProcessorError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.secret_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Processor API returned non-success status"
            );
            return Err(ProcessorError::Status(status.as_u16()));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse processor response"
            );
            ProcessorError::Parse(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processor_error_display() {
        let err = ProcessorError::Declined("Insufficient funds".to_string());
        assert_eq!(err.to_string(), "Payment declined: Insufficient funds");

        let err = ProcessorError::Status(503);
        assert_eq!(err.to_string(), "Processor API returned status 503");
    }

    #[test]
    fn test_payment_outcome_decodes_decline() {
        let json = r#"{"status":"declined","transaction_id":"txn_9","message":"Card expired"}"#;
        let outcome: PaymentOutcome = serde_json::from_str(json).expect("deserialize");
        assert_eq!(outcome.status, PaymentStatus::Declined);
        assert_eq!(outcome.message.as_deref(), Some("Card expired"));
    }

    #[test]
    fn test_payment_outcome_message_optional() {
        let json = r#"{"status":"succeeded","transaction_id":"txn_1"}"#;
        let outcome: PaymentOutcome = serde_json::from_str(json).expect("deserialize");
        assert_eq!(outcome.status, PaymentStatus::Succeeded);
        assert!(outcome.message.is_none());
    }
}
