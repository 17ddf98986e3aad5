//! Payment method identifiers.

use serde::{Deserialize, Serialize};

/// A payment method that can be offered on a checkout.
///
/// The order methods appear in on a checkout is merchant-controlled and
/// significant: the first offerable method is the default selection at
/// render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Hosted card processor.
    Card,
    /// Bank transfer settled against merchant instructions.
    BankTransfer,
    /// Transfer to a merchant crypto wallet.
    Crypto,
    /// Any other manually settled arrangement.
    Manual,
}

impl PaymentMethod {
    /// All known methods, in canonical display order.
    pub const ALL: [Self; 4] = [Self::Card, Self::BankTransfer, Self::Crypto, Self::Manual];

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Pay by card",
            Self::BankTransfer => "Bank transfer",
            Self::Crypto => "Pay with crypto",
            Self::Manual => "Manual payment",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::BankTransfer => write!(f, "bank_transfer"),
            Self::Crypto => write!(f, "crypto"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "bank_transfer" => Ok(Self::BankTransfer),
            "crypto" => Ok(Self::Crypto),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
