//! Run the publish gate over a checkout JSON file.

use std::path::Path;

use tracing::{error, info};

use launchpay_core::CheckoutPage;
use launchpay_core::wizard::validate_for_publish;

/// Validate the checkout in `file_path` for publish readiness.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// checkout fails publish validation.
pub async fn checkout_file(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Verify file exists
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let checkout: CheckoutPage = serde_json::from_str(&content)?;

    info!(
        checkout_id = %checkout.id,
        products = checkout.products.len(),
        methods = checkout.payment_methods.len(),
        "Loaded checkout"
    );

    match validate_for_publish(&checkout) {
        Ok(()) => {
            info!("Checkout is ready to publish");
            Ok(())
        }
        Err(blocked) => {
            error!(step = %blocked.step, "Not ready: {}", blocked.message);
            Err(format!(
                "validation failed at step {}: {}",
                blocked.step, blocked.message
            )
            .into())
        }
    }
}
