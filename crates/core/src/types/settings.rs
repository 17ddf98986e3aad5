//! Tenant-wide store settings.

use serde::{Deserialize, Serialize};

use super::id::TenantId;
use super::payment::PaymentMethod;

/// Card processor gateway configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardGateway {
    #[serde(default)]
    pub enabled: bool,
    /// Publishable key, safe to expose to the checkout page.
    #[serde(default)]
    pub publishable_key: String,
    /// Secret key, server-side only.
    #[serde(default)]
    pub secret_key: String,
}

impl std::fmt::Debug for CardGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardGateway")
            .field("enabled", &self.enabled)
            .field("publishable_key", &self.publishable_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Bank transfer gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankTransferGateway {
    #[serde(default)]
    pub enabled: bool,
    /// Instructions shown to the customer after choosing bank transfer.
    #[serde(default)]
    pub instructions: String,
}

/// A crypto wallet a customer can pay into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoWallet {
    /// Asset ticker, e.g. `BTC`.
    pub asset: String,
    pub address: String,
}

/// Crypto gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CryptoGateway {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub wallets: Vec<CryptoWallet>,
}

/// Manual payment gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualGateway {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub instructions: String,
}

/// Per-gateway enablement flags - the publicly safe projection of
/// [`StoreSettings`] that method resolution and the public config carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayFlags {
    #[serde(default)]
    pub card: bool,
    #[serde(default)]
    pub bank_transfer: bool,
    #[serde(default)]
    pub crypto: bool,
    #[serde(default)]
    pub manual: bool,
}

impl GatewayFlags {
    /// Whether the tenant has globally enabled the gateway behind `method`.
    #[must_use]
    pub const fn enabled(&self, method: PaymentMethod) -> bool {
        match method {
            PaymentMethod::Card => self.card,
            PaymentMethod::BankTransfer => self.bank_transfer,
            PaymentMethod::Crypto => self.crypto,
            PaymentMethod::Manual => self.manual,
        }
    }

    /// Flags with every gateway enabled.
    #[must_use]
    pub const fn all_enabled() -> Self {
        Self {
            card: true,
            bank_transfer: true,
            crypto: true,
            manual: true,
        }
    }
}

/// Tenant-wide configuration singleton.
///
/// Referenced by every checkout, owned by none. Disabling a gateway here
/// hides it from every checkout at render time without mutating any
/// checkout's stored method list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub card: CardGateway,
    #[serde(default)]
    pub bank_transfer: BankTransferGateway,
    #[serde(default)]
    pub crypto: CryptoGateway,
    #[serde(default)]
    pub manual: ManualGateway,
}

impl StoreSettings {
    /// Settings with every gateway disabled.
    #[must_use]
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            card: CardGateway::default(),
            bank_transfer: BankTransferGateway::default(),
            crypto: CryptoGateway::default(),
            manual: ManualGateway::default(),
        }
    }

    /// Public projection of the enablement flags.
    #[must_use]
    pub const fn flags(&self) -> GatewayFlags {
        GatewayFlags {
            card: self.card.enabled,
            bank_transfer: self.bank_transfer.enabled,
            crypto: self.crypto.enabled,
            manual: self.manual.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_mirror_gateway_enablement() {
        let mut settings = StoreSettings::new(TenantId::new("tnt_demo"));
        settings.crypto.enabled = true;

        let flags = settings.flags();
        assert!(flags.enabled(PaymentMethod::Crypto));
        assert!(!flags.enabled(PaymentMethod::Card));
        assert!(!flags.enabled(PaymentMethod::BankTransfer));
        assert!(!flags.enabled(PaymentMethod::Manual));
    }

    #[test]
    fn test_card_gateway_debug_redacts_secret() {
        let gateway = CardGateway {
            enabled: true,
            publishable_key: "pk_live_visible".to_owned(),
            secret_key: "sk_live_super_secret".to_owned(),
        };

        let debug_output = format!("{gateway:?}");
        assert!(debug_output.contains("pk_live_visible"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk_live_super_secret"));
    }
}
