//! Integration tests for LaunchPay.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the external store stub and both services
//! cargo run -p launchpay-builder
//! cargo run -p launchpay-checkout
//!
//! # Seed a demo tenant
//! cargo run -p launchpay-cli -- seed --tenant tnt_demo
//!
//! # Run integration tests
//! cargo test -p launchpay-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `builder_checkouts` - Checkout CRUD against the builder API
//! - `builder_wizard` - Publish gate transitions and save-on-next
//! - `checkout_pricing` - Public view assembly and pricing previews
//!
//! Base URLs are configurable via `BUILDER_BASE_URL` and
//! `CHECKOUT_BASE_URL`.
